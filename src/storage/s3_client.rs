//! S3 Client
//!
//! Wraps a `rust-s3` bucket handle behind [`ObjectStore`]. Construction never
//! fails because credentials are absent: an unauthenticated client is built
//! and refuses every transfer with [`StoreError::CredentialsMissing`], so the
//! caller can report the problem instead of dying at startup.

use super::{ObjectStore, StoreError};
use crate::config::StorageConfig;
use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::region::Region;
use s3::Bucket;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

pub struct S3Client {
    bucket: Bucket,
    authenticated: bool,
}

impl S3Client {
    /// Build a client for the configured bucket, resolving credentials from
    /// the static key pair or the default provider chain.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StoreError> {
        let credentials = resolve_credentials(config);
        Self::with_credentials(config, credentials)
    }

    /// Build a client with explicit credentials. `None` yields a client that
    /// rejects transfers.
    pub fn with_credentials(
        config: &StorageConfig,
        credentials: Option<Credentials>,
    ) -> Result<Self, StoreError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config.region.parse::<Region>().map_err(|e| {
                StoreError::Client(format!("invalid region `{}`: {}", config.region, e))
            })?,
        };

        let authenticated = credentials.is_some();
        let credentials = match credentials {
            Some(credentials) => credentials,
            None => Credentials::anonymous().map_err(|e| StoreError::Client(e.to_string()))?,
        };

        let mut bucket_box = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StoreError::Client(e.to_string()))?;

        // Custom endpoints (MinIO, localstack) rarely support virtual hosts.
        if config.endpoint.is_some() {
            bucket_box = bucket_box.with_path_style();
        }

        let bucket: Bucket = bucket_box;
        debug!(
            "S3 client ready for bucket {} (authenticated: {})",
            config.bucket, authenticated
        );

        Ok(Self {
            bucket,
            authenticated,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn ensure_credentials(&self) -> Result<(), StoreError> {
        if self.authenticated {
            Ok(())
        } else {
            Err(StoreError::CredentialsMissing)
        }
    }
}

fn resolve_credentials(config: &StorageConfig) -> Option<Credentials> {
    if let (Some(access_key), Some(secret_key)) =
        (&config.access_key_id, &config.secret_access_key)
    {
        return match Credentials::new(
            Some(access_key.as_str()),
            Some(secret_key.as_str()),
            None,
            config.session_token.as_deref(),
            None,
        ) {
            Ok(credentials) => Some(credentials),
            Err(e) => {
                warn!("Rejected static AWS credentials: {}", e);
                None
            }
        };
    }

    match Credentials::default() {
        Ok(credentials) => usable_credentials(credentials),
        Err(e) => {
            warn!("No AWS credentials found in the default provider chain: {}", e);
            None
        }
    }
}

/// The provider chain reads `AWS_ACCESS_KEY_ID`/`AWS_SECRET_ACCESS_KEY` on
/// its own and accepts blank values; those count as no credentials.
fn usable_credentials(credentials: Credentials) -> Option<Credentials> {
    let present = |value: &Option<String>| {
        value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
    };
    if present(&credentials.access_key) && present(&credentials.secret_key) {
        Some(credentials)
    } else {
        warn!("Ignoring blank AWS credentials from the default provider chain");
        None
    }
}

fn map_s3_error(key: &str, err: S3Error) -> StoreError {
    match err {
        S3Error::HttpFailWithBody(404, _) => StoreError::NotFound(key.to_string()),
        S3Error::HttpFailWithBody(status, message) => StoreError::Status { status, message },
        other => StoreError::Transfer(other.to_string()),
    }
}

fn check_status(status: u16) -> Result<(), StoreError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(StoreError::Status {
            status,
            message: "unexpected response status".to_string(),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    fn bucket_name(&self) -> &str {
        &self.bucket.name
    }

    async fn download(&self, key: &str, dest: &Path) -> Result<u64, StoreError> {
        self.ensure_credentials()?;

        let mut file = tokio::fs::File::create(dest).await?;
        let status = self
            .bucket
            .get_object_to_writer(key, &mut file)
            .await
            .map_err(|e| map_s3_error(key, e))?;
        check_status(status)?;
        file.flush().await?;

        Ok(file.metadata().await?.len())
    }

    async fn upload(&self, src: &Path, key: &str, content_type: &str) -> Result<(), StoreError> {
        self.ensure_credentials()?;

        let content = tokio::fs::read(src).await?;
        let response = self
            .bucket
            .put_object_with_content_type(key, &content, content_type)
            .await
            .map_err(|e| map_s3_error(key, e))?;
        check_status(response.status_code())
    }
}
