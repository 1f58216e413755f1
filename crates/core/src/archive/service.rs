//! Archive service implementation using Apache OpenDAL.

use opendal::{ErrorKind, Operator, services};

use super::config::{ArchiveConfig, ArchiveProvider};
use super::error::StorageError;

/// Content type for report artifacts.
pub const REPORT_CONTENT_TYPE: &str = "application/pdf";

/// Archive service for report artifacts.
pub struct ArchiveService {
    operator: Operator,
    config: ArchiveConfig,
}

impl ArchiveService {
    /// Create a new archive service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: ArchiveConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &ArchiveProvider) -> Result<Operator, StorageError> {
        match provider {
            ArchiveProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            ArchiveProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Object key for a report artifact.
    ///
    /// Format: `{period}/{branch_name_with_underscores}_{period}.pdf`
    #[must_use]
    pub fn report_key(period_label: &str, branch_name: &str) -> String {
        let file_name = Self::report_file_name(period_label, branch_name);
        format!("{period_label}/{file_name}")
    }

    /// File name component of a report artifact key.
    #[must_use]
    pub fn report_file_name(period_label: &str, branch_name: &str) -> String {
        format!("{}_{period_label}.pdf", collapse_whitespace(branch_name))
    }

    /// Store a report artifact, overwriting any prior object at the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    pub async fn store(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.operator
            .write_with(key, bytes)
            .content_type(REPORT_CONTENT_TYPE)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Read a stored report artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or cannot be read.
    pub async fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let buffer = self.operator.read(key).await.map_err(StorageError::from)?;
        Ok(buffer.to_vec())
    }

    /// Delete a report artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::from)
    }

    /// Check if an artifact exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(_) => false,
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

/// Replaces each run of whitespace with a single underscore.
fn collapse_whitespace(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}
