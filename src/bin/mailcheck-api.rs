use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use mailcheck_api::{AppConfig, EmailVerifier, Verifier, serve};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[path = "mailcheck-api/args.rs"]
mod args;

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailcheck_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_raw(cli.settings.into_raw()).context("invalid configuration")?;
    let verifier = EmailVerifier::new(config.verifier_options());

    match cli.cmd.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            info!(
                version = env!("CARGO_PKG_VERSION"),
                proxy = %config.proxy,
                max_batch = config.max_batch,
                "starting mailcheck-api"
            );
            serve(Arc::new(config), Arc::new(verifier))
                .await
                .context("server stopped with an error")?;
        }
        Commands::Verify { email } => {
            let result = tokio::task::spawn_blocking(move || verifier.verify(&email))
                .await
                .context("verification task failed")??;
            println!("{}", serde_json::to_string_pretty(&result)?);
            // 0 valid syntax, 2 invalid, 1 fatal
            if !result.syntax.valid {
                std::process::exit(2);
            }
        }
    }
    Ok(())
}
