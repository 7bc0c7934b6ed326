//! costwise service binary.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use costwise::classifier::HttpClassifier;
use costwise::config::Config;
use costwise::llm::TierDispatcher;
use costwise::orchestrator::Orchestrator;
use costwise::routing::{AccuracyTable, ModelRouter};
use costwise::server::{AppState, build_router, serve};

/// Cost-aware question router.
#[derive(Debug, Parser)]
#[command(name = "costwise", version, about)]
struct Cli {
    /// Address to bind the HTTP server to (overrides BIND_ADDR).
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Path to the accuracy table TOML file (overrides ACCURACY_TABLE).
    #[arg(long)]
    table: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("costwise=info,tower_http=info"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(table) = cli.table {
        config.routing.table_path = table;
    }

    let table = AccuracyTable::load(&config.routing.table_path)
        .with_context(|| format!("failed to load {}", config.routing.table_path.display()))?;
    tracing::info!(
        rows = table.len(),
        path = %config.routing.table_path.display(),
        threshold = config.routing.threshold,
        "accuracy table loaded"
    );

    let classifier =
        HttpClassifier::new(&config.classifier).context("failed to build classifier client")?;
    tracing::info!(url = config.classifier.base_url, "classifier configured");

    let dispatcher =
        TierDispatcher::from_config(&config.llm).context("failed to build LLM dispatcher")?;

    let orchestrator = Orchestrator::new(
        Arc::new(classifier),
        ModelRouter::new(table, config.routing.threshold),
        dispatcher,
    );

    let state = Arc::new(AppState { orchestrator });
    let app = build_router(state, &config.server);

    serve(config.server.bind, app)
        .await
        .context("server error")?;

    Ok(())
}
