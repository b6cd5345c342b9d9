//! # rosterdex
//!
//! Interactive terminal client for searching the Pokémon catalog and
//! building persisted teams of up to six.
//!
//! The binary wires three layers together: the store backend (hosted REST
//! or in-memory), the team repository that owns local state, and a
//! line-oriented command loop on top.

mod render;
mod repl;

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rosterdex_client::{PokeApiClient, TeamRepository};
use rosterdex_store::{MemoryTeamStore, RestTeamStore, StoreConfig, TeamStore};

/// Search the Pokémon catalog and build teams of up to six.
#[derive(Parser)]
#[command(name = "rosterdex")]
#[command(version)]
struct Cli {
    /// Base URL of the hosted team store (overrides TEAM_STORE_URL)
    #[arg(long)]
    store_url: Option<String>,

    /// API key for the hosted team store (overrides TEAM_STORE_KEY)
    #[arg(long)]
    store_key: Option<String>,

    /// Base URL of the Pokémon catalog (overrides DEX_API_URL)
    #[arg(long)]
    dex_url: Option<String>,

    /// Keep teams in memory only, even when store credentials exist
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    // Default to warnings only: info-level logs would interleave with the
    // interactive prompt.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Resolve store configuration (flags override environment)
    // -----------------------------------------------------------------------
    let store_config = if cli.ephemeral {
        None
    } else if cli.store_url.is_none() && cli.store_key.is_none() {
        StoreConfig::from_env()
    } else {
        let url = cli
            .store_url
            .clone()
            .or_else(|| std::env::var("TEAM_STORE_URL").ok());
        let key = cli
            .store_key
            .clone()
            .or_else(|| std::env::var("TEAM_STORE_KEY").ok());
        url.zip(key).and_then(|(url, key)| StoreConfig::new(url, key))
    };

    let persistent = store_config.is_some();
    let store: Arc<dyn TeamStore> = match &store_config {
        Some(config) => {
            info!(url = %config.url, "Using the hosted team store");
            Arc::new(RestTeamStore::new(config))
        }
        None => {
            warn!("No store credentials configured; teams will not outlive this session");
            Arc::new(MemoryTeamStore::new())
        }
    };

    // -----------------------------------------------------------------------
    // 3. Build the catalog client
    // -----------------------------------------------------------------------
    let dex_url = cli
        .dex_url
        .clone()
        .or_else(|| std::env::var("DEX_API_URL").ok());
    let lookup = match dex_url {
        Some(url) => PokeApiClient::with_base_url(url),
        None => PokeApiClient::new(),
    };

    // -----------------------------------------------------------------------
    // 4. Load the team working set
    // -----------------------------------------------------------------------
    let mut repository = TeamRepository::new(store);
    if let Err(e) = repository.initialize().await {
        tracing::error!(error = %e, "Initial team load failed");
        eprintln!("Could not load teams: {e}");
        eprintln!("Continuing with an empty working set; `team create <name>` to retry.");
    }

    // -----------------------------------------------------------------------
    // 5. Run the interactive session (blocks until quit)
    // -----------------------------------------------------------------------
    repl::run(repository, lookup, persistent).await
}
