//! Delivery of a rendered word record.

use crate::config::SmtpConfig;
use crate::message::{RenderedMessage, render};
use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;
use vocab_core::record::WordRecord;

/// Delivers a word record to a list of recipients.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, record: &WordRecord, recipients: &[String]) -> Result<()>;
}

/// Sends mail through an authenticated SMTP relay over implicit TLS.
pub struct SmtpNotifier {
    sender: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    pub fn new(sender: &str, smtp: &SmtpConfig) -> Result<Self> {
        let password = smtp
            .password
            .clone()
            .context("APP_PASSWORD must be set to send email")?;
        let sender = sender
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid sender address '{}'", sender))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
            .with_context(|| format!("Invalid SMTP relay '{}'", smtp.host))?
            .port(smtp.port)
            .credentials(Credentials::new(smtp.username.clone(), password))
            .build();

        Ok(Self { sender, transport })
    }
}

/// Builds a multipart/alternative message addressed to every recipient.
fn build_message(
    sender: &Mailbox,
    recipients: &[String],
    rendered: RenderedMessage,
) -> Result<Message> {
    let mut builder = Message::builder()
        .from(sender.clone())
        .subject(rendered.subject);
    for recipient in recipients {
        let mailbox = recipient
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid recipient address '{}'", recipient))?;
        builder = builder.to(mailbox);
    }
    builder
        .multipart(MultiPart::alternative_plain_html(rendered.text, rendered.html))
        .context("Failed to build email message")
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn deliver(&self, record: &WordRecord, recipients: &[String]) -> Result<()> {
        let message = build_message(&self.sender, recipients, render(record))?;
        self.transport
            .send(message)
            .await
            .context("SMTP delivery failed")?;
        info!(word = %record.word, recipients = ?recipients, "Sent word of the day");
        Ok(())
    }
}

/// Prints the rendered message instead of sending it.
pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn deliver(&self, record: &WordRecord, recipients: &[String]) -> Result<()> {
        let rendered = render(record);
        println!("To: {}", recipients.join(", "));
        println!("Subject: {}", rendered.subject);
        println!();
        print!("{}", rendered.text);
        info!(word = %record.word, "Dry run, message not sent");
        Ok(())
    }
}
