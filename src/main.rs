use anyhow::{Context, Result};
use locale_sync::config::Config;
use locale_sync::i18n::SyncReport;
use locale_sync::providers::ProviderTranslator;
use locale_sync::sync::LocaleSynchronizer;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file (absent in CI)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("locale_sync=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(report) => {
            info!("Translation completed! {}", report);
            if !report.is_complete() {
                warn!(
                    "{} value(s) kept their source text; re-run to retry them",
                    report.keys_fallback
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error during translation: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<SyncReport> {
    let config = Config::from_env()?;
    let sync_config = config.sync_config()?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let translator = ProviderTranslator::from_config(&config, client)?;
    info!("Using {} for translation", translator.name());

    let synchronizer = LocaleSynchronizer::new(sync_config, translator);
    let report = synchronizer.run().await?;

    Ok(report)
}
