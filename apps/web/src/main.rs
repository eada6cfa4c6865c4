mod api;
mod catalog;
mod config;
mod errors;
mod models;
mod render;
mod routes;
mod state;
mod views;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::{CatalogSource, RemoteCatalog, StaticCatalog, TracingObserver};
use crate::config::{Config, SourceKind};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("competency_matrix={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting competency matrix v{}", env!("CARGO_PKG_VERSION"));

    let source = build_catalog_source(&config)?;
    let sheets = source.list_sheets().await;
    match &sheets {
        Ok(sheets) => info!("Catalog ready: {} sheet(s) from {}", sheets.len(), source.kind()),
        // A remote service that is down at startup is not fatal; views report it per request
        Err(e) => tracing::warn!("Catalog not reachable at startup: {e}"),
    }

    let port = config.port;
    let state = AppState::new(source, config);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the catalog backend selected by `CATALOG_SOURCE`.
fn build_catalog_source(config: &Config) -> Result<Arc<dyn CatalogSource>> {
    match config.catalog_source {
        SourceKind::Static => {
            let catalog = match &config.static_catalog_path {
                Some(path) => StaticCatalog::from_path(path)
                    .with_context(|| format!("loading catalog from {}", path.display()))?,
                None => StaticCatalog::embedded().context("loading embedded catalog")?,
            };
            info!("Static catalog initialized");
            Ok(Arc::new(catalog))
        }
        SourceKind::Remote => {
            let base_url = config
                .api_base_url
                .as_deref()
                .context("MATRIX_API_BASE_URL is required for the remote catalog")?;
            let remote = RemoteCatalog::new(
                base_url,
                Duration::from_secs(config.request_timeout_secs),
                Arc::new(TracingObserver),
            )?;
            info!("Remote catalog client initialized ({})", remote.base_url());
            Ok(Arc::new(remote))
        }
    }
}
