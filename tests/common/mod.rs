//! Shared test fixtures: an in-memory secret store.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Mutex;

use secrets_manager_backup::provider::SecretStore;
use secrets_manager_backup::record::{SecretListing, SecretRecord};

/// In-memory store standing in for AWS Secrets Manager
///
/// Enumeration order is insertion order, so tests can pin the unsorted
/// case. Names registered via `reject` fail every operation, which
/// exercises the log-and-skip paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    secrets: Mutex<Vec<SecretRecord>>,
    rejected: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secrets(records: Vec<SecretRecord>) -> Self {
        Self {
            secrets: Mutex::new(records),
            rejected: Vec::new(),
        }
    }

    /// Make every operation on `name` fail
    pub fn reject(mut self, name: &str) -> Self {
        self.rejected.push(name.to_string());
        self
    }

    pub fn names(&self) -> Vec<String> {
        self.secrets
            .lock()
            .unwrap()
            .iter()
            .map(|record| record.name.clone())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<SecretRecord> {
        self.secrets
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.name == name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.secrets.lock().unwrap().len()
    }

    fn is_rejected(&self, name: &str) -> bool {
        self.rejected.iter().any(|rejected| rejected == name)
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    async fn list_secrets(&self) -> Result<Vec<SecretListing>> {
        Ok(self
            .secrets
            .lock()
            .unwrap()
            .iter()
            .map(|record| SecretListing {
                name: record.name.clone(),
                description: record.description.clone(),
                tags: record.tags.clone(),
            })
            .collect())
    }

    async fn get_secret_value(&self, secret_name: &str) -> Result<Option<String>> {
        if self.is_rejected(secret_name) {
            return Err(anyhow!("access denied to {secret_name}"));
        }
        Ok(self.get(secret_name).map(|record| record.value))
    }

    async fn create_or_update_secret(&self, record: &SecretRecord) -> Result<bool> {
        if self.is_rejected(&record.name) {
            return Err(anyhow!("access denied to {}", record.name));
        }

        let mut secrets = self.secrets.lock().unwrap();
        match secrets.iter_mut().find(|stored| stored.name == record.name) {
            Some(existing) => {
                if existing.value == record.value && existing.description == record.description {
                    return Ok(false);
                }
                existing.value = record.value.clone();
                existing.description = record.description.clone();
                Ok(true)
            }
            None => {
                secrets.push(record.clone());
                Ok(true)
            }
        }
    }
}

/// Shorthand for a plain name/value record
pub fn record(name: &str, value: &str) -> SecretRecord {
    SecretRecord {
        name: name.to_string(),
        value: value.to_string(),
        description: None,
        tags: None,
    }
}
