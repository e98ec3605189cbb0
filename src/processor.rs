//! File Processor
//!
//! Runs one report cycle for an object key:
//!
//! 1. download the object into a scratch directory
//! 2. build the placeholder compliance report
//! 3. write it as JSON next to the download
//! 4. upload it under `reports/compliance_report_<uuid>.json`
//!
//! The scratch directory is a [`TempDir`], removed when it goes out of scope
//! whichever way this function returns.

use std::path::Path;
use tempfile::TempDir;
use tracing::info;

use crate::models::ComplianceReport;
use crate::storage::{content_type_for, public_url, ObjectStore};
use crate::types::{ProcessError, ProcessedReport};

pub const REPORT_PREFIX: &str = "reports/";

/// Key under which a freshly generated report is uploaded.
pub fn new_report_key() -> String {
    format!("{}compliance_report_{}.json", REPORT_PREFIX, uuid::Uuid::new_v4())
}

pub async fn process_file(
    store: &dyn ObjectStore,
    file_key: &str,
) -> Result<ProcessedReport, ProcessError> {
    process_file_in(store, file_key, &std::env::temp_dir()).await
}

/// Same as [`process_file`], with the scratch directory created under
/// `scratch_root`.
pub async fn process_file_in(
    store: &dyn ObjectStore,
    file_key: &str,
    scratch_root: &Path,
) -> Result<ProcessedReport, ProcessError> {
    let bucket = store.bucket_name();
    info!("Downloading file: {} from S3", file_key);

    let file_name = Path::new(file_key)
        .file_name()
        .filter(|_| !file_key.ends_with('/'))
        .ok_or_else(|| ProcessError::Other(format!("object key `{}` has no file name", file_key)))?;

    let scratch = tempfile::Builder::new()
        .prefix("policy-report-")
        .tempdir_in(scratch_root)?;

    let download_path = scratch.path().join(file_name);
    let size = store
        .download(file_key, &download_path)
        .await
        .map_err(|e| ProcessError::download(file_key, e))?;
    info!("File downloaded to {} ({} bytes)", download_path.display(), size);

    info!("Processing the file...");
    let report = ComplianceReport::placeholder(bucket, file_key);

    let output_path = write_report(&scratch, &report).await?;
    info!("Compliance report generated: {}", output_path.display());

    let report_key = new_report_key();
    store
        .upload(&output_path, &report_key, &content_type_for(&output_path))
        .await
        .map_err(|e| ProcessError::upload(&report_key, e))?;
    info!("Compliance report uploaded to S3: {}", report_key);

    let report_url = public_url(bucket, &report_key);
    info!("Compliance report S3 URL: {}", report_url);

    Ok(ProcessedReport {
        report_key,
        report_url,
    })
}

async fn write_report(
    scratch: &TempDir,
    report: &ComplianceReport,
) -> Result<std::path::PathBuf, ProcessError> {
    let output_path = scratch
        .path()
        .join(format!("compliance_report_{}.json", uuid::Uuid::new_v4()));
    let body = report.to_pretty_json()?;
    tokio::fs::write(&output_path, body).await?;
    Ok(output_path)
}
