//! bufete server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! configured document store, seeds sample data if asked to, and serves the
//! REST API over HTTP.

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use bufete_core::{
  DocumentStore, MemoryStore, seed,
  service::{ClientService, LawyerService},
};
use bufete_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{Backend, ServerConfig, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "Lawyer and client records over a document store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  match server_cfg.backend {
    Backend::Sqlite => {
      let store_path = expand_tilde(&server_cfg.store_path);
      let store = SqliteStore::open(&store_path)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      serve(Arc::new(store), &server_cfg).await
    }
    Backend::Memory => {
      tracing::warn!("using in-memory store; data will not survive a restart");
      serve(Arc::new(MemoryStore::new()), &server_cfg).await
    }
  }
}

async fn serve<S>(store: Arc<S>, server_cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: DocumentStore + 'static,
{
  let lawyers = LawyerService::new(Arc::clone(&store));
  if server_cfg.seed_sample_data
    && let Err(e) = seed::seed_lawyers(&lawyers).await
  {
    tracing::error!(error = %e, "failed to seed sample lawyers");
  }
  if server_cfg.fake_records > 0 {
    let clients = ClientService::new(Arc::clone(&store));
    if let Err(e) =
      seed::seed_fake_records(&lawyers, &clients, server_cfg.fake_records).await
    {
      tracing::error!(error = %e, "failed to generate fake records");
    }
  }

  let app = bufete_api::router(store, &server_cfg.base_url)
    .layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutdown requested");
}
