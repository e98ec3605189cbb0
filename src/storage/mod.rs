// Storage layer (S3-compatible)

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

pub mod s3_client;

#[cfg(test)]
pub(crate) mod memory;

pub use s3_client::*;

/// Errors raised by an [`ObjectStore`] transfer or while building one.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("AWS credentials not configured properly")]
    CredentialsMissing,

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transfer failed: {0}")]
    Transfer(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to build storage client: {0}")]
    Client(String),
}

/// A bucket the report workflow reads from and writes to.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the bucket every key is resolved against.
    fn bucket_name(&self) -> &str;

    /// Copy the object at `key` into the local file `dest`, returning the
    /// number of bytes written.
    async fn download(&self, key: &str, dest: &Path) -> Result<u64, StoreError>;

    /// Store the contents of the local file `src` under `key`.
    async fn upload(&self, src: &Path, key: &str, content_type: &str) -> Result<(), StoreError>;
}

/// Virtual-hosted style URL for an object. Not signed and not checked for
/// existence; it only resolves when the bucket allows public reads.
pub fn public_url(bucket: &str, key: &str) -> String {
    format!("https://{}.s3.amazonaws.com/{}", bucket, key)
}

/// Content type to send with an upload, guessed from the file extension.
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().to_string()
}
