//! Main Entrypoint for the Vocabulary Mailer
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Building the content providers and the lexical database.
//! 3. Selecting an unsent word and gathering its content.
//! 4. Delivering the result by email, or to stdout on a dry run.

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use vocab_core::{
    candidates::TopicalCandidateSource,
    definition::{
        DefinitionFetcher, DefinitionStrategy, DictionaryStrategy, EncyclopediaStrategy,
        LexiconStrategy,
    },
    digest::WordOfTheDay,
    lexicon::{JsonLexicon, LexicalDatabase},
    providers::{DatamuseClient, FreeDictionaryClient, WikipediaClient, http_client},
    selector::WordSelector,
    store::SentWordLog,
    synonyms::SynonymFetcher,
};
use vocab_mailer::{
    config::Config,
    notifier::{Notifier, SmtpNotifier, StdoutNotifier},
};

#[derive(Parser, Debug)]
#[command(version, about = "Mails a new vocabulary word with its definition and synonyms")]
struct Args {
    /// Print the message instead of sending it.
    #[arg(long)]
    dry_run: bool,

    /// Forget every previously sent word before selecting.
    #[arg(long)]
    reset_history: bool,
}

/// Loads the lexicon named in the config, falling back to an empty one.
fn load_lexicon(config: &Config) -> JsonLexicon {
    let Some(path) = &config.lexicon_path else {
        info!("No LEXICON_PATH set, offline fallbacks are disabled.");
        return JsonLexicon::empty();
    };
    match JsonLexicon::load(path) {
        Ok(lexicon) => {
            info!(path = %path.display(), entries = lexicon.len(), "Lexicon loaded.");
            lexicon
        }
        Err(e) => {
            warn!(error = ?e, "Could not load lexicon, continuing without it.");
            JsonLexicon::empty()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Building providers...");

    // --- 3. Initialize Providers ---
    let http = http_client(config.http_timeout)?;
    // SMTP setup must fail before any word is recorded as sent.
    let notifier: Box<dyn Notifier> = if args.dry_run {
        Box::new(StdoutNotifier)
    } else {
        Box::new(SmtpNotifier::new(&config.sender, &config.smtp)?)
    };

    let words_api = Arc::new(DatamuseClient::new(http.clone()));
    let lexicon: Arc<dyn LexicalDatabase> = Arc::new(load_lexicon(&config));

    let mut strategies: Vec<Box<dyn DefinitionStrategy>> = vec![Box::new(
        EncyclopediaStrategy::new(Arc::new(WikipediaClient::new(http.clone())?)),
    )];
    if config.dictionary_lookup {
        strategies.push(Box::new(DictionaryStrategy::new(Arc::new(
            FreeDictionaryClient::new(http.clone()),
        ))));
    }
    strategies.push(Box::new(LexiconStrategy::new(lexicon.clone())));

    let log = SentWordLog::new(&config.sent_words_path);
    if args.reset_history {
        log.clear();
        info!(path = %config.sent_words_path.display(), "Sent-word history cleared.");
    }

    let selector = WordSelector::new(
        log,
        Arc::new(TopicalCandidateSource::new(
            words_api.clone(),
            config.min_candidates,
        )),
        config.selection(),
    );
    let mut daily = WordOfTheDay::new(
        selector,
        SynonymFetcher::new(words_api, lexicon),
        DefinitionFetcher::new(strategies),
    );

    // --- 4. Select and Gather ---
    let record = daily.compose().await.context("Failed to select a word")?;
    info!(word = %record.word, topic = %record.topic, "Word of the day ready.");

    // --- 5. Deliver ---
    notifier
        .deliver(&record, &config.recipients)
        .await
        .context("Failed to deliver word of the day")?;

    Ok(())
}
