//! yc-key-manager — ensures a Yandex Cloud KMS symmetric key exists.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use tracing::{error, info};

use yc_key_manager::{
    cli::Cli,
    config::Config,
    handler::KeyHandler,
    iam::{ServiceAccountKey, TokenProvider},
    kms::KmsClient,
    server, setup_tracing,
};

/// Upper bound on client setup and the startup token acquisition; also the
/// total timeout of every outbound call made through the shared client.
const SETUP_TIMEOUT: Duration = Duration::from_secs(15);

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let sink_url = config.logging_url.as_deref().filter(|url| !url.is_empty());
    if let Err(e) = setup_tracing(&cli.log_level, cli.log_format.as_deref(), sink_url) {
        eprintln!("Failed to setup tracing: {e}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "startup failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let http = reqwest::Client::builder()
        .timeout(SETUP_TIMEOUT)
        .build()
        .context("unable to create http client")?;

    let key = ServiceAccountKey::load(
        &config.service_account_id,
        &config.key_id,
        &config.key_file,
    )
    .context("unable to load service account key")?;
    let tokens = Arc::new(TokenProvider::new(
        key,
        config.iam_endpoint.clone(),
        http.clone(),
    ));

    // Authentication failures are fatal before serving: acquire a token now
    // rather than on the first request.
    tokio::time::timeout(SETUP_TIMEOUT, tokens.get_token())
        .await
        .context("token acquisition timed out")?
        .context("token acquisition failed")?;
    info!(service_account_id = %config.service_account_id, "IAM token acquired");

    let kms = Arc::new(KmsClient::new(http, &config.kms_endpoint, tokens));
    let handler = Arc::new(KeyHandler::new(
        kms,
        config.folder_id.clone(),
        config.key_name.clone(),
    ));

    server::serve(&config.address, handler).await?;
    Ok(())
}
