//! Catalog access: one trait, two backends.
//!
//! `StaticCatalog` serves the build-time catalog, `RemoteCatalog` reads the
//! competency-matrix HTTP service. `AppState` carries an
//! `Arc<dyn CatalogSource>` chosen at startup from `CATALOG_SOURCE`.

pub mod filter;
pub mod observer;
pub mod remote;
pub mod static_catalog;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::catalog::{ItemDetail, Section};

pub use filter::filter_sections;
pub use observer::{RequestObserver, TracingObserver};
pub use remote::RemoteCatalog;
pub use static_catalog::StaticCatalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Competency matrix item {0} not found")]
    NotFound(i64),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only view of a competency-matrix catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short backend name reported by `/health` and in logs.
    fn kind(&self) -> &'static str;

    /// Sheet names in display order.
    async fn list_sheets(&self) -> Result<Vec<String>, CatalogError>;

    /// Section tree of one sheet. An unknown sheet yields no sections.
    async fn sheet_sections(&self, sheet: &str) -> Result<Vec<Section>, CatalogError>;

    async fn item_detail(&self, id: i64) -> Result<ItemDetail, CatalogError>;
}
