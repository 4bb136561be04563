//! Message Rendering
//!
//! Turns a [`WordRecord`] into a subject line plus plain-text and HTML bodies.
//! Long examples are clipped here, at the delivery boundary.

use vocab_core::record::WordRecord;

/// Examples longer than this many characters are truncated.
pub const MAX_EXAMPLE_CHARS: usize = 600;

const FEEDBACK_PROMPT: &str = "Reply 'Y' if you like it or 'N' if not.";

/// A rendered email, independent of the transport that sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Clips `text` to `max_chars` characters and appends `...` when it is longer.
pub fn truncate_example(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max_chars).collect();
    clipped.push_str("...");
    clipped
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders `record` into an email.
///
/// # Arguments
///
/// * `record` - The word and its gathered content.
///
/// # Returns
///
/// A [`RenderedMessage`] whose subject is `Word of the Day: <word>`. Both
/// bodies carry the same content, and any example is clipped to
/// [`MAX_EXAMPLE_CHARS`].
pub fn render(record: &WordRecord) -> RenderedMessage {
    let subject = format!("Word of the Day: {}", record.word);
    let example = record
        .example
        .as_deref()
        .map(|e| truncate_example(e, MAX_EXAMPLE_CHARS));
    let synonyms = if record.synonyms.is_empty() {
        "none found".to_string()
    } else {
        record.synonyms.join(", ")
    };

    let mut text = format!(
        "Word of the Day: {}\nTopic: {}\n\nDefinition: {}\n",
        record.word, record.topic, record.definition
    );
    if let Some(example) = &example {
        text.push_str(&format!("Example: {}\n", example));
    }
    text.push_str(&format!("Synonyms: {}\n\n{}\n", synonyms, FEEDBACK_PROMPT));

    let mut html = format!(
        "<html><body>\
         <h2>Word of the Day: {}</h2>\
         <p><em>Topic: {}</em></p>\
         <p><strong>Definition:</strong> {}</p>",
        escape_html(&record.word),
        escape_html(&record.topic),
        escape_html(&record.definition)
    );
    if let Some(example) = &example {
        html.push_str(&format!(
            "<p><strong>Example:</strong> {}</p>",
            escape_html(example)
        ));
    }
    html.push_str(&format!(
        "<p><strong>Synonyms:</strong> {}</p><p>{}</p></body></html>",
        escape_html(&synonyms),
        escape_html(FEEDBACK_PROMPT)
    ));

    RenderedMessage {
        subject,
        text,
        html,
    }
}
