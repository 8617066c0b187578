//! scorekeep server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `SCOREKEEP_*` environment variables, opens the SQLite score store, and
//! serves the JSON API over HTTP.

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use scorekeep_api::{AppState, cors};
use scorekeep_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Wallet score service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
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

  let server_cfg = settings::load(&cli.config).context("failed to load configuration")?;
  let store_path = settings::expand_tilde(&server_cfg.database_path);

  // The store handle is created once here and shared by every request.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!(path = ?store_path, "opened score store");

  let state = AppState {
    store:                Arc::new(store),
    expose_error_details: server_cfg.expose_error_details(),
  };

  let app = scorekeep_api::app(state, &server_cfg.allowed_origins)
    .context("invalid entry in allowed_origins")?;

  match cors::restricted_origins(&server_cfg.allowed_origins) {
    None => tracing::info!("CORS: allowing any origin"),
    Some(origins) => tracing::info!(?origins, "CORS: restricted origins"),
  }

  let address = server_cfg.address();
  tracing::info!(environment = ?server_cfg.environment, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
