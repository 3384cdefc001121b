//! Ratex CLI
//!
//! Binary that wires together all the components:
//! - Load configuration from environment and flags
//! - Initialize the rate cache and the remote provider
//! - Create the repository and view model
//! - Run one command and print its result

mod config;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ratex_client::{FixerClient, ManualConnectivity, TcpProbe};
use ratex_core::{ConversionViewModel, CurrencyRepository, parse_amount};
use ratex_repo::{Store, build_store};
use ratex_types::ConnectivityOracle;

type ViewModel = ConversionViewModel<FixerClient, Store, Box<dyn ConnectivityOracle>>;

#[derive(Parser)]
#[command(name = "ratex")]
#[command(author, version, about = "Currency converter with offline rate cache", long_about = None)]
struct Cli {
    /// Base URL of the rate provider API
    #[arg(long, env = "FIXER_BASE_URL")]
    api_url: Option<String>,

    /// Rate cache location (`sqlite://...` or `memory://`)
    #[arg(long, env = "RATEX_DATABASE_URL")]
    database_url: Option<String>,

    /// Skip the network and answer from the cache only
    #[arg(long)]
    offline: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest exchange rates
    Rates,
    /// Show the supported currencies
    Symbols,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        amount: String,
        /// Source currency code
        from: String,
        /// Target currency code
        to: String,
    },
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,ratex_core=debug,ratex_client=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json);

    let mut config = config::Config::from_env(cli.offline)?;
    if let Some(url) = cli.api_url {
        config.provider.base_url = url;
    }
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }

    tracing::debug!(?config, "Loaded configuration");

    // Build store (handles connection and migration)
    let store = build_store(&config.database_url).await?;
    let client = FixerClient::new(config.provider)?;
    let connectivity: Box<dyn ConnectivityOracle> = if cli.offline {
        Box::new(ManualConnectivity::new(false))
    } else {
        Box::new(TcpProbe::new(config.probe_addr))
    };

    let repository = CurrencyRepository::new(client, store, connectivity);
    let vm: ViewModel = ConversionViewModel::new(Arc::new(repository));

    match cli.command {
        Commands::Rates => {
            vm.fetch_exchange_rates().await;
            let state = vm.state();
            if let Some(error) = state.error {
                anyhow::bail!(error);
            }
            for rate in &state.exchange_rates {
                println!("{}\t{}", rate.currency_code, rate.rate);
            }
        }
        Commands::Symbols => {
            vm.fetch_currency_symbols().await;
            let state = vm.state();
            if let Some(error) = state.error {
                anyhow::bail!(error);
            }
            for symbol in &state.currency_symbols {
                println!("{}\t{}", symbol.code, symbol.display_name);
            }
        }
        Commands::Convert { amount, from, to } => {
            let amount = parse_amount(&amount);
            let (from, to) = (from.to_uppercase(), to.to_uppercase());

            // Refresh the cache first; conversion itself only reads it.
            vm.fetch_exchange_rates().await;
            vm.set_error(None);

            vm.convert_currency(amount, &from, &to).await;
            let state = vm.state();
            if let Some(error) = state.error {
                anyhow::bail!(error);
            }
            println!("{amount} {from} = {:.4} {to}", state.converted_amount);
        }
    }

    Ok(())
}
