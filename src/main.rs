use clap::{CommandFactory, Parser, Subcommand};
use ecbfx::cli::ui::{StyleType, style_text};
use ecbfx::core::log::init_logging;
use rust_decimal::Decimal;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for ecbfx::AppCommand {
    fn from(cmd: Commands) -> ecbfx::AppCommand {
        match cmd {
            Commands::Rate { from, to } => ecbfx::AppCommand::Rate { from, to },
            Commands::Convert { amount, from, to } => {
                ecbfx::AppCommand::Convert { amount, from, to }
            }
            Commands::Rates => ecbfx::AppCommand::Rates,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the exchange rate between two currencies
    Rate {
        /// Source currency, e.g. USD
        from: String,
        /// Target currency, e.g. GBP
        to: String,
    },
    /// Convert an amount between currencies
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
        /// Source currency
        from: String,
        /// Target currency, defaults to the configured currency
        to: Option<String>,
    },
    /// List the latest ECB reference rates
    Rates,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ecbfx::cli::setup::setup(),
        Some(cmd) => ecbfx::run_command(cmd.into(), cli.config_path.as_deref(), cli.json).await,
        None => Cli::command().print_help().map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            eprintln!("{}", style_text(&format!("Error: {e:#}"), StyleType::Error));
            ExitCode::FAILURE
        }
    }
}
