//! # Secret Records
//!
//! Data model for the backup file format and for enumeration results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single secret as stored in the backup file
///
/// The backup file is a JSON array of these records. `description` and
/// `tags` are omitted from the output when absent and tolerated when
/// missing on input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SecretRecord {
    /// Secret name - the unique key within a service endpoint/region
    pub name: String,
    /// Secret value (plaintext or a JSON-encoded payload)
    pub value: String,
    /// Description attached to the secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags attached to the secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

/// A secret as returned by enumeration, before its value is fetched
///
/// Filtering and sorting operate on listings so that values are only
/// retrieved for secrets that end up in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretListing {
    pub name: String,
    pub description: Option<String>,
    pub tags: Option<BTreeMap<String, String>>,
}

impl SecretListing {
    /// Attach a value, producing the record that lands in the backup file
    pub fn into_record(self, value: String) -> SecretRecord {
        SecretRecord {
            name: self.name,
            value,
            description: self.description,
            tags: self.tags,
        }
    }
}
