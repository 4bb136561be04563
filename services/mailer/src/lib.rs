//! Vocabulary Mailer Library Crate
//!
//! Configuration, message rendering and delivery for the daily word mail.
//! The `mailer` binary wires these together with the selection logic in
//! `vocab-core`.

pub mod config;
pub mod message;
pub mod notifier;
