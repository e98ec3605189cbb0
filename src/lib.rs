// Policy Report - compliance report generation for objects stored in S3

pub mod cli;
pub mod config;
pub mod models;
pub mod processor;
pub mod storage;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use processor::process_file;
pub use storage::{ObjectStore, S3Client};
pub use types::{ProcessError, ProcessResult};
