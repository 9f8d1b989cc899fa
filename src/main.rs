//! username-probe binary.
//!
//! The default `run` command performs the full smoke flow: derive the dev
//! identity, connect, submit a set-username transaction, wait for
//! inclusion, query the value back, print a report. A failed run is
//! reported on stderr and the process still exits normally after
//! disconnecting.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use username_probe::chain::ChainClient;
use username_probe::config::validation::validate_config;
use username_probe::config::{load_config, ConfigError, ProbeConfig, WaitStrategy};
use username_probe::keyring::Pair;
use username_probe::observability::init_logging;
use username_probe::probe::SmokeProbe;

#[derive(Parser)]
#[command(name = "username-probe")]
#[command(about = "Smoke-test client for the username-storage chain", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Node WebSocket endpoint (overrides config)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Username to submit (overrides config)
    #[arg(short, long)]
    username: Option<String>,

    /// Derivation URI for the signing identity (overrides config)
    #[arg(short = 'd', long = "derive")]
    derivation_uri: Option<String>,

    /// Use a fixed inclusion wait of this many milliseconds
    #[arg(long)]
    wait_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full smoke flow: submit, wait, query back (default)
    Run,
    /// Submit a set-username transaction and print its hash
    Set,
    /// Query the stored username for the derived identity
    Get,
    /// Probe node health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProbeConfig::default(),
    };

    if let Some(endpoint) = cli.endpoint {
        config.node.endpoint = endpoint;
    }
    if let Some(username) = cli.username {
        config.run.username = username;
    }
    if let Some(uri) = cli.derivation_uri {
        config.identity.derivation_uri = uri;
    }
    if let Some(delay_ms) = cli.wait_ms {
        config.run.wait = WaitStrategy::Fixed { delay_ms };
    }

    // CLI overrides can invalidate a previously valid config.
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability.log_filter);

    tracing::info!(
        endpoint = %config.node.endpoint,
        derivation_uri = %config.identity.derivation_uri,
        "username-probe v0.1.0 starting"
    );

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let report = SmokeProbe::new(config).run().await;
            print!("{}", report.render());
        }
        Commands::Set => {
            let pair = Pair::from_uri(&config.identity.derivation_uri)?;
            let client = ChainClient::connect(&config.node).await?;
            let result = client.submit_set_username(&pair, &config.run.username).await;
            client.disconnect().await;
            println!("Transaction hash: {}", result?);
        }
        Commands::Get => {
            let pair = Pair::from_uri(&config.identity.derivation_uri)?;
            let client = ChainClient::connect(&config.node).await?;
            let result = client.username_of(&pair.address()).await;
            client.disconnect().await;
            match result? {
                Some(username) => println!("Stored username: {username}"),
                None => println!("Stored username: <none>"),
            }
        }
        Commands::Health => {
            let client = ChainClient::connect(&config.node).await?;
            let result = client.health().await;
            client.disconnect().await;
            let health = result?;
            println!(
                "peers: {}, syncing: {}, should_have_peers: {}",
                health.peers, health.is_syncing, health.should_have_peers
            );
        }
    }

    Ok(())
}
