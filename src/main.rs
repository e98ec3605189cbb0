use anyhow::Context;
use clap::Parser;
use policy_report::{
    cli::Args, config::Config, process_file, utils::init_logger, ProcessResult, S3Client,
};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            error!("Usage: policy-report <s3_key>");
            err.print()?;
            anyhow::bail!("invalid arguments");
        }
    };

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config.storage);

    let client = S3Client::from_config(&config.storage)
        .map_err(|e| {
            error!("Error initializing S3 client: {}", e);
            e
        })
        .context("failed to initialize S3 client")?;

    info!("Received S3 Key: {}", args.s3_key);
    info!("Starting processing workflow...");
    let result = ProcessResult::from(process_file(&client, &args.s3_key).await);
    info!("Result: {:?}", result);

    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}
