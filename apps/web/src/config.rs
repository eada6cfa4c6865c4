use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Where the catalog comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Static,
    Remote,
}

/// Application configuration loaded from environment variables.
/// Startup fails if a value is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub catalog_source: SourceKind,
    /// Base URL of the competency-matrix service; required for `remote`.
    pub api_base_url: Option<String>,
    /// JSON file replacing the embedded catalog for `static`.
    pub static_catalog_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub default_sheet: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let catalog_source = match var("CATALOG_SOURCE").as_deref().map(str::trim) {
            None | Some("static") => SourceKind::Static,
            Some("remote") => SourceKind::Remote,
            Some(other) => bail!("CATALOG_SOURCE must be 'static' or 'remote', got '{other}'"),
        };

        let api_base_url = var("MATRIX_API_BASE_URL");
        if catalog_source == SourceKind::Remote && api_base_url.is_none() {
            bail!("Required environment variable 'MATRIX_API_BASE_URL' is not set (CATALOG_SOURCE=remote)");
        }

        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            catalog_source,
            api_base_url,
            static_catalog_path: var("STATIC_CATALOG_PATH").map(PathBuf::from),
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            default_sheet: var("DEFAULT_SHEET"),
        })
    }
}
