//! Tender Intelligence chat service binary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tia_agent::TenderAgent;
use tia_core::{HttpRetriever, TiaConfig};
use tia_server::{create_router, SessionStore, APP_SUBTITLE, APP_TITLE};

#[derive(Parser, Debug)]
#[command(name = "tia-server", version, about = "Hebrew chat service over a tender index")]
struct Args {
    /// Path to a TOML config file; discovered upward from the working
    /// directory when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind host, overriding the config file.
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding the config file.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TiaConfig::load_from(path)?,
        None => TiaConfig::load()?,
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("starting {APP_TITLE}");
    tracing::info!("{APP_SUBTITLE}");

    let agent = Arc::new(build_agent(&config));
    let store = Arc::new(SessionStore::new());
    let app = create_router(agent, store);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_agent(config: &TiaConfig) -> TenderAgent {
    let mut builder = TenderAgent::builder()
        .csv_path(config.dataset.path.clone())
        .top_k(config.retrieval.top_k)
        .summary_limit(config.retrieval.summary_limit);

    match &config.retrieval.endpoint {
        Some(endpoint) => {
            tracing::info!(%endpoint, "retrieval backend configured");
            builder = builder.retriever(Arc::new(HttpRetriever::new(endpoint.clone())));
        }
        None => {
            tracing::warn!(
                "no retrieval endpoint configured; answers will ask the operator to wire one"
            );
        }
    }

    builder.build()
}
