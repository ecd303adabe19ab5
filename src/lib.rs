pub mod cli;
pub mod client;
pub mod core;
pub mod providers;

pub use client::ConverterClient;

use anyhow::Result;
use rust_decimal::Decimal;
use tracing::{debug, info};

pub enum AppCommand {
    Rate {
        from: String,
        to: String,
    },
    Convert {
        amount: Decimal,
        from: String,
        to: Option<String>,
    },
    Rates,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>, json: bool) -> Result<()> {
    info!("ecbfx starting...");

    let config = match config_path {
        Some(path) => core::config::AppConfig::load_from_path(path)?,
        None => core::config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let client = ConverterClient::from_config(&config)?;

    match command {
        AppCommand::Rate { from, to } => cli::convert::rate(&client, &from, &to, json).await,
        AppCommand::Convert { amount, from, to } => {
            let to = to.unwrap_or_else(|| config.currency.to_string());
            cli::convert::convert(&client, amount, &from, &to, json).await
        }
        AppCommand::Rates => cli::rates::run(&client, json).await,
    }
}
