//! # Store Trait
//!
//! Abstract interface for the remote secrets store.
//!
//! The export/import passes talk to this trait rather than to the AWS
//! client directly, so they can be exercised against an in-memory store
//! in tests.

use anyhow::Result;
use async_trait::async_trait;

use crate::record::{SecretListing, SecretRecord};

/// Store trait for the remote secrets service
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Enumerate all secrets - names and metadata, no values
    async fn list_secrets(&self) -> Result<Vec<SecretListing>>;

    /// Get the latest secret value
    /// Returns None when the secret does not (or no longer) exists
    async fn get_secret_value(&self, secret_name: &str) -> Result<Option<String>>;

    /// Create or update a secret from a backup record
    /// Returns true if the secret was created/updated, false if no change was needed
    async fn create_or_update_secret(&self, record: &SecretRecord) -> Result<bool>;
}
