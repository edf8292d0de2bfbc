//! # Import
//!
//! Restores secrets from a JSON backup stream into the store.

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::provider::SecretStore;
use crate::record::SecretRecord;

/// Why a record was rejected before reaching the store
#[derive(Debug, Error)]
pub enum RecordError {
    /// Entry could not be decoded into a secret record
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Record decoded but carries no usable name
    #[error("record has an empty name")]
    EmptyName,
}

/// Outcome counts for an import run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Secrets created or updated
    pub applied: usize,
    /// Secrets whose stored state already matched
    pub unchanged: usize,
    /// Entries skipped - malformed, nameless, or rejected by the store
    pub skipped: usize,
}

/// Import secrets from a JSON array read from `reader`
///
/// Malformed entries and per-record store rejections are logged and
/// skipped; only an unreadable or non-array document aborts the run.
pub async fn import_secrets(
    store: &dyn SecretStore,
    reader: &mut dyn Read,
) -> Result<ImportSummary> {
    let entries: Vec<Value> = serde_json::from_reader(reader)
        .context("Input is not a JSON array of secret records")?;
    info!("Importing {} records", entries.len());

    let mut summary = ImportSummary::default();

    for (index, entry) in entries.into_iter().enumerate() {
        let record = match decode_record(entry) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping entry {}: {}", index, e);
                summary.skipped += 1;
                continue;
            }
        };

        match store.create_or_update_secret(&record).await {
            Ok(true) => {
                summary.applied += 1;
            }
            Ok(false) => {
                debug!("Secret {} already up to date", record.name);
                summary.unchanged += 1;
            }
            Err(e) => {
                error!("Failed to store secret {}: {}", record.name, e);
                summary.skipped += 1;
            }
        }
    }

    info!(
        "Import complete: {} applied, {} unchanged, {} skipped",
        summary.applied, summary.unchanged, summary.skipped
    );
    Ok(summary)
}

/// Decode one JSON entry into a validated secret record
fn decode_record(entry: Value) -> Result<SecretRecord, RecordError> {
    let record: SecretRecord = serde_json::from_value(entry)?;
    if record.name.trim().is_empty() {
        return Err(RecordError::EmptyName);
    }
    Ok(record)
}
