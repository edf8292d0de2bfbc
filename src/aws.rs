//! # AWS Secrets Manager Client
//!
//! Client for interacting with the AWS Secrets Manager API.
//!
//! This module provides functionality to:
//! - Enumerate secrets with their metadata (paginated)
//! - Retrieve secret values
//! - Create and update secrets from backup records

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_secretsmanager::operation::describe_secret::DescribeSecretError;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use aws_sdk_secretsmanager::types::Tag;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::provider::SecretStore;
use crate::record::{SecretListing, SecretRecord};
use crate::AwsConfig;

/// Page size for ListSecrets (the API caps a page at 100 entries)
const LIST_SECRETS_PAGE_SIZE: i32 = 100;

/// AWS Secrets Manager store implementation
#[derive(Debug)]
pub struct AwsSecretsManager {
    client: SecretsManagerClient,
}

impl AwsSecretsManager {
    /// Create a new AWS Secrets Manager client
    /// Honours the profile and region flags; anything unset falls back to
    /// the SDK default credential/region chain.
    pub async fn new(config: &AwsConfig) -> Result<Self> {
        let sdk_config = create_sdk_config(config).await;
        let client = SecretsManagerClient::new(&sdk_config);

        Ok(Self { client })
    }
}

/// Build the AWS SDK config from the resolved CLI flags
async fn create_sdk_config(config: &AwsConfig) -> SdkConfig {
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(profile) = &config.profile {
        info!("Using AWS credentials profile: {}", profile);
        builder = builder.profile_name(profile);
    }

    if let Some(region) = &config.region {
        info!("Using AWS region override: {}", region);
        builder = builder.region(aws_config::Region::new(region.clone()));
    }

    builder.load().await
}

/// Convert API tags into the record tag map, dropping entries without a key
fn tags_to_map(tags: &[Tag]) -> Option<BTreeMap<String, String>> {
    let map: BTreeMap<String, String> = tags
        .iter()
        .filter_map(|tag| match (tag.key(), tag.value()) {
            (Some(key), Some(value)) => Some((key.to_string(), value.to_string())),
            _ => None,
        })
        .collect();

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Convert a record tag map into API tags
fn map_to_tags(map: &BTreeMap<String, String>) -> Vec<Tag> {
    map.iter()
        .map(|(key, value)| Tag::builder().key(key).value(value).build())
        .collect()
}

#[async_trait]
impl SecretStore for AwsSecretsManager {
    async fn list_secrets(&self) -> Result<Vec<SecretListing>> {
        let mut listings = Vec::new();
        let mut pages = self
            .client
            .list_secrets()
            .max_results(LIST_SECRETS_PAGE_SIZE)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.context("Failed to list AWS secrets")?;
            for entry in page.secret_list() {
                // Entries without a name cannot be exported or re-imported
                let Some(name) = entry.name() else {
                    continue;
                };
                listings.push(SecretListing {
                    name: name.to_string(),
                    description: entry.description().map(ToString::to_string),
                    tags: tags_to_map(entry.tags()),
                });
            }
        }

        debug!("Listed {} AWS secrets", listings.len());
        Ok(listings)
    }

    async fn get_secret_value(&self, secret_name: &str) -> Result<Option<String>> {
        match self
            .client
            .get_secret_value()
            .secret_id(secret_name)
            .send()
            .await
        {
            Ok(response) => {
                let value = response
                    .secret_string()
                    .map(ToString::to_string)
                    .or_else(|| {
                        response
                            .secret_binary()
                            .map(|blob| String::from_utf8_lossy(blob.as_ref()).to_string())
                    });

                match value {
                    Some(v) => Ok(Some(v)),
                    None => Err(anyhow::anyhow!(
                        "Secret {secret_name} has no string or binary value"
                    )),
                }
            }
            Err(e) => {
                if e.as_service_error()
                    .is_some_and(GetSecretValueError::is_resource_not_found_exception)
                {
                    Ok(None)
                } else {
                    Err(anyhow::anyhow!("Failed to get AWS secret {secret_name}: {e}"))
                }
            }
        }
    }

    async fn create_or_update_secret(&self, record: &SecretRecord) -> Result<bool> {
        let described = match self
            .client
            .describe_secret()
            .secret_id(&record.name)
            .send()
            .await
        {
            Ok(described) => Some(described),
            Err(e)
                if e.as_service_error()
                    .is_some_and(DescribeSecretError::is_resource_not_found_exception) =>
            {
                None
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to describe AWS secret {}: {e}",
                    record.name
                ))
            }
        };

        let Some(described) = described else {
            info!("Creating AWS secret: {}", record.name);
            let mut request = self
                .client
                .create_secret()
                .name(&record.name)
                .secret_string(&record.value);
            if let Some(description) = &record.description {
                request = request.description(description);
            }
            if let Some(tags) = &record.tags {
                request = request.set_tags(Some(map_to_tags(tags)));
            }
            request
                .send()
                .await
                .with_context(|| format!("Failed to create AWS secret {}", record.name))?;
            return Ok(true);
        };

        // Existing secret: only write a new version when the value changed
        let current_value = self.get_secret_value(&record.name).await?;
        let value_changed = current_value.as_deref() != Some(record.value.as_str());

        if value_changed {
            info!("Updating AWS secret: {}", record.name);
            self.client
                .put_secret_value()
                .secret_id(&record.name)
                .secret_string(&record.value)
                .send()
                .await
                .with_context(|| format!("Failed to update AWS secret {}", record.name))?;
        }

        // Description drift is corrected independently of the value
        let description_changed = record.description.is_some()
            && record.description.as_deref() != described.description();

        if description_changed {
            debug!("Updating description for AWS secret: {}", record.name);
            self.client
                .update_secret()
                .secret_id(&record.name)
                .set_description(record.description.clone())
                .send()
                .await
                .with_context(|| {
                    format!("Failed to update description for AWS secret {}", record.name)
                })?;
        }

        if !value_changed && !description_changed {
            debug!("AWS secret {} unchanged, skipping update", record.name);
            return Ok(false);
        }

        Ok(true)
    }
}
