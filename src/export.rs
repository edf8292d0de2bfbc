//! # Export
//!
//! Dumps secrets from the store to a JSON backup stream.
//!
//! Enumeration happens first so the filter and sort run on names alone;
//! values are only fetched for secrets that end up in the export.

use anyhow::{Context, Result};
use regex::Regex;
use std::io::Write;
use tracing::{debug, info, warn};

use crate::cli::SortOrder;
use crate::provider::SecretStore;
use crate::record::{SecretListing, SecretRecord};

/// Options controlling which secrets are exported and in what order
#[derive(Debug, Default)]
pub struct ExportOptions {
    /// Only export secrets whose name matches
    pub filter: Option<Regex>,
    /// Sort records by name before writing
    pub sort: Option<SortOrder>,
}

/// Outcome counts for an export run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Records written to the output
    pub exported: usize,
    /// Secrets skipped because their value could not be fetched
    pub skipped: usize,
}

/// Export secrets to `writer` as a pretty-printed JSON array
///
/// Secrets whose value cannot be fetched (including secrets deleted
/// between enumeration and retrieval) are logged and skipped; the run
/// continues with the remaining secrets.
pub async fn export_secrets(
    store: &dyn SecretStore,
    options: &ExportOptions,
    writer: &mut dyn Write,
) -> Result<ExportSummary> {
    let listings = store.list_secrets().await?;
    let total = listings.len();

    let mut selected = filter_listings(listings, options.filter.as_ref());
    if let Some(order) = options.sort {
        sort_listings(&mut selected, order);
    }
    info!("Exporting {} of {} secrets", selected.len(), total);

    let mut summary = ExportSummary::default();
    let mut records: Vec<SecretRecord> = Vec::with_capacity(selected.len());

    for listing in selected {
        match store.get_secret_value(&listing.name).await {
            Ok(Some(value)) => {
                debug!("Fetched secret value: {}", listing.name);
                records.push(listing.into_record(value));
                summary.exported += 1;
            }
            Ok(None) => {
                warn!(
                    "Secret {} disappeared during export, skipping",
                    listing.name
                );
                summary.skipped += 1;
            }
            Err(e) => {
                warn!("Failed to fetch secret {}, skipping: {}", listing.name, e);
                summary.skipped += 1;
            }
        }
    }

    serde_json::to_writer_pretty(&mut *writer, &records)
        .context("Failed to serialize secrets to output")?;
    writeln!(writer).context("Failed to write to output")?;

    info!(
        "Export complete: {} exported, {} skipped",
        summary.exported, summary.skipped
    );
    Ok(summary)
}

/// Retain listings whose name matches the filter; no filter keeps everything
fn filter_listings(
    listings: Vec<SecretListing>,
    filter: Option<&Regex>,
) -> Vec<SecretListing> {
    match filter {
        Some(regex) => listings
            .into_iter()
            .filter(|listing| regex.is_match(&listing.name))
            .collect(),
        None => listings,
    }
}

/// Sort listings by secret name
fn sort_listings(listings: &mut [SecretListing], order: SortOrder) {
    listings.sort_by(|a, b| match order {
        SortOrder::Ascending => a.name.cmp(&b.name),
        SortOrder::Descending => b.name.cmp(&a.name),
    });
}
