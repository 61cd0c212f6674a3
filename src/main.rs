mod bitbucket;
mod cli;
mod config;
mod credentials;
mod error;
mod logging;
mod retry;
mod status;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use bitbucket::{BitbucketClient, ResilientDelivery};
use cli::Cli;
use config::StatusConfig;

const APP: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = StatusConfig::from_cli(Cli::parse());
    logging::init(config.log_format);
    info!(app = APP, version = VERSION, "starting");

    match run(&config).await {
        Ok(()) => {
            info!(app = APP, "finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let message = format!("{err:#}");
            error!(error = %message, "updating bitbucket build status failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &StatusConfig) -> Result<()> {
    let credentials_path = credentials::resolve_path(&config.credentials_path);
    let token = credentials::load_token(&credentials_path).context("loading credentials")?;

    let payload = status::translate(config);

    let client = BitbucketClient::new().context("creating bitbucket client")?;
    ResilientDelivery::new(client, config.retry)
        .deliver(&token, &config.repo_fullname, &config.revision, &payload)
        .await
        .with_context(|| {
            format!(
                "setting build status for {} at {}",
                config.repo_fullname, config.revision
            )
        })?;

    Ok(())
}
