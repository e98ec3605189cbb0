// Result and error types for a processing run

use serde::Serialize;
use thiserror::Error;

use crate::storage::StoreError;

pub const SUCCESS_MESSAGE: &str = "Processing complete";

/// Why a processing run failed.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("AWS credentials not configured properly")]
    CredentialsMissing,

    #[error("failed to download {key}: {source}")]
    DownloadFailed {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to upload {key}: {source}")]
    UploadFailed {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to serialize compliance report: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ProcessError {
    pub(crate) fn download(key: &str, source: StoreError) -> Self {
        match source {
            StoreError::CredentialsMissing => Self::CredentialsMissing,
            source => Self::DownloadFailed {
                key: key.to_string(),
                source,
            },
        }
    }

    pub(crate) fn upload(key: &str, source: StoreError) -> Self {
        match source {
            StoreError::CredentialsMissing => Self::CredentialsMissing,
            source => Self::UploadFailed {
                key: key.to_string(),
                source,
            },
        }
    }
}

impl From<std::io::Error> for ProcessError {
    fn from(err: std::io::Error) -> Self {
        ProcessError::Other(err.to_string())
    }
}

/// Where a successful run put its report.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedReport {
    pub report_key: String,
    pub report_url: String,
}

/// The single JSON object written to stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProcessResult {
    Success {
        message: String,
        report_key: String,
        report_url: String,
    },
    Failure {
        error: String,
    },
}

impl From<Result<ProcessedReport, ProcessError>> for ProcessResult {
    fn from(result: Result<ProcessedReport, ProcessError>) -> Self {
        match result {
            Ok(report) => ProcessResult::Success {
                message: SUCCESS_MESSAGE.to_string(),
                report_key: report.report_key,
                report_url: report.report_url,
            },
            Err(err) => ProcessResult::Failure {
                error: err.to_string(),
            },
        }
    }
}
