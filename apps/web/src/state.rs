use std::sync::Arc;

use crate::catalog::CatalogSource;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Static or remote catalog, picked at startup from `CATALOG_SOURCE`.
    pub source: Arc<dyn CatalogSource>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(source: Arc<dyn CatalogSource>, config: Config) -> Self {
        Self {
            source,
            config: Arc::new(config),
        }
    }

    /// State around a given source with default settings otherwise.
    #[cfg(test)]
    pub fn for_source(source: Arc<dyn CatalogSource>) -> Self {
        Self::new(
            source,
            Config {
                port: 0,
                rust_log: "debug".to_string(),
                catalog_source: crate::config::SourceKind::Static,
                api_base_url: None,
                static_catalog_path: None,
                request_timeout_secs: 5,
                default_sheet: None,
            },
        )
    }
}
