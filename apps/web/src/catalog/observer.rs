use std::time::Duration;

use tracing::{debug, info, warn};

use crate::catalog::CatalogError;

/// Hook invoked around every upstream call made by `RemoteCatalog`.
///
/// Injected at construction so the client never logs on its own; the
/// default is [`TracingObserver`].
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, method: &str, url: &str);
    fn on_response(&self, method: &str, url: &str, status: u16, elapsed: Duration);
    fn on_error(&self, method: &str, url: &str, error: &CatalogError);
}

/// Emits structured `tracing` events for upstream calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, method: &str, url: &str) {
        debug!(method, url, "catalog request");
    }

    fn on_response(&self, method: &str, url: &str, status: u16, elapsed: Duration) {
        let elapsed_ms = elapsed.as_millis() as u64;
        if status >= 400 {
            warn!(method, url, status, elapsed_ms, "catalog response");
        } else {
            info!(method, url, status, elapsed_ms, "catalog response");
        }
    }

    fn on_error(&self, method: &str, url: &str, error: &CatalogError) {
        warn!(method, url, error = %error, "catalog request failed");
    }
}
