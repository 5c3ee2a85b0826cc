use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tableseed::config::{BootstrapConfig, WaitConfig, DEFAULT_ENDPOINT_URL, DEFAULT_REGION};
use tableseed::prelude::*;
use tableseed::runner;
use tableseed::storage::{create_client, DynamoDbStore, InMemoryStore};
use tableseed_core::plan;

/// Provision, seed and print the sample tables
#[derive(Debug, Parser)]
#[command(name = "tableseed")]
#[command(version, about, long_about = "Provision, seed and print the sample tables.

Deletes the Article, Tag, Account and Appointment tables if present,
recreates them, inserts the sample records and prints the contents of
Article, Tag and Account.

Credentials are read from AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY.")]
struct Cli {
    /// Endpoint of the target store
    #[arg(long, env = "TABLESEED_ENDPOINT_URL", default_value = DEFAULT_ENDPOINT_URL)]
    endpoint_url: String,

    /// Region label sent to the endpoint
    #[arg(long, env = "TABLESEED_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// Store backend to run against
    #[arg(long, value_enum, default_value_t = StoreKind::Dynamodb)]
    store: StoreKind,

    /// Print the run plan without contacting the store
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum StoreKind {
    /// DynamoDB or DynamoDB Local
    Dynamodb,
    /// In-process store, discarded on exit
    Memory,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "tableseed=debug"
    } else {
        "tableseed=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.dry_run {
        aprintln!("{}", p_c("Bootstrap Plan:"));
        for step in plan::bootstrap_steps() {
            aprintln!("  {}", plan::format_step(&step));
        }
        return Ok(());
    }

    let wait = WaitConfig::default();

    match cli.store {
        StoreKind::Dynamodb => {
            let config = BootstrapConfig::new(cli.endpoint_url, cli.region);
            tracing::info!("target: {}", config.target_display());
            if config.credentials.is_none() {
                tracing::warn!("AWS credentials not set in the environment, using the default chain");
            }

            let store = DynamoDbStore::new(create_client(&config).await);
            runner::run(&store, wait)
                .await
                .context("bootstrap against DynamoDB failed")?;
        }
        StoreKind::Memory => {
            tracing::info!("target: in-memory store");
            runner::run(&InMemoryStore::new(), wait)
                .await
                .context("bootstrap against the in-memory store failed")?;
        }
    }

    Ok(())
}
