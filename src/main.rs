//! Fee portal main entry point

use anyhow::Context;
use clap::Parser;
use feeportal_api::start_server;
use feeportal_config::Config;
use feeportal_core::{HttpPaymentsClient, PaymentsApi};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "feeportal")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web front-end for the school-fee payments API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config_found = args.config.exists();
    let config = match Config::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => anyhow::bail!(
            "Failed to load configuration from {}\n{}",
            args.config.display(),
            e.to_details()
        ),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    if config_found {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }

    let client = HttpPaymentsClient::new(&config.payments_api).context("Failed to build payments API client")?;
    log::info!("Payments API client ready for {}", client.base_url());
    let api: Arc<dyn PaymentsApi> = Arc::new(client);

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, api))
        .context("Server error")?;

    Ok(())
}
