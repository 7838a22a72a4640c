//! VeriVoice server binary.
//!
//! Reads `verivoice.toml` (or the path given with `--config`), opens the
//! configured petition store and serves the JSON API under `/api`.
//!
//! # Changing a petition's status
//!
//! The API never transitions petitions. For a local SQLite store:
//!
//! ```text
//! verivoice set-status <petition-id> closed
//! ```

mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use verivoice_core::{petition::PetitionStatus, store::PetitionStore};
use verivoice_store_rest::RestStore;
use verivoice_store_sqlite::SqliteStore;

use crate::config::{ServerConfig, StoreConfig, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "VeriVoice petition server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "verivoice.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API (the default).
  Serve,
  /// Set a petition's status in a local SQLite store.
  SetStatus {
    id:     Uuid,
    /// `active`, `under_review` or `closed`.
    status: PetitionStatus,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => match server_cfg.store.clone() {
      StoreConfig::Sqlite { path } => {
        let store = open_sqlite(&path).await?;
        serve(Arc::new(store), &server_cfg).await
      }
      StoreConfig::Rest(rest) => {
        tracing::info!(url = %rest.url, "using hosted petition store");
        let store = RestStore::new(rest).context("failed to build REST store client")?;
        serve(Arc::new(store), &server_cfg).await
      }
    },
    Command::SetStatus { id, status } => {
      let StoreConfig::Sqlite { path } = &server_cfg.store else {
        anyhow::bail!("set-status only works against a local SQLite store");
      };
      let store = open_sqlite(path).await?;
      if !store.set_status(id, status).await? {
        anyhow::bail!("petition {id} not found");
      }
      println!("petition {id} is now {status}");
      Ok(())
    }
  }
}

async fn open_sqlite(path: &std::path::Path) -> anyhow::Result<SqliteStore> {
  let store_path = expand_tilde(path);
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }
  tracing::info!(path = ?store_path, "opening SQLite petition store");
  SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))
}

async fn serve<S>(store: Arc<S>, server_cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: PetitionStore + 'static,
{
  let app = Router::new()
    .nest("/api", verivoice_api::api_router(store))
    .layer(TraceLayer::new_for_http());

  let address = server_cfg.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  tracing::info!("Listening on http://{address}");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
