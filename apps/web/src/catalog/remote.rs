//! Remote catalog: reads the competency-matrix HTTP service.
//!
//! Three read-only GET endpoints, JSON in camelCase. No retries and no
//! pagination. A failed call is reported to the caller as-is and the view
//! layer shows it to the user.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::catalog::{CatalogError, CatalogSource, RequestObserver};
use crate::models::catalog::{ItemDetail, Section};
use crate::models::wire::{ItemDetailResponse, ItemsResponse, SheetsResponse};

const SHEETS_PATH: &str = "/api/competency-matrix/sheets/";
const ITEMS_PATH: &str = "/api/competency-matrix/items/";

#[derive(Clone)]
pub struct RemoteCatalog {
    client: Client,
    base_url: String,
    observer: Arc<dyn RequestObserver>,
}

impl RemoteCatalog {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        observer: Arc<dyn RequestObserver>,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            observer,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();
        self.observer.on_request("GET", &url);

        let result = self.fetch(&url, query, started).await;
        if let Err(e) = &result {
            self.observer.on_error("GET", &url, e);
        }
        result
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        started: Instant,
    ) -> Result<T, CatalogError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        self.observer
            .on_response("GET", url, status.as_u16(), started.elapsed());

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| CatalogError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalog {
    fn kind(&self) -> &'static str {
        "remote"
    }

    async fn list_sheets(&self) -> Result<Vec<String>, CatalogError> {
        let response: SheetsResponse = self.get_json(SHEETS_PATH, &[]).await?;
        Ok(response.sheets)
    }

    async fn sheet_sections(&self, sheet: &str) -> Result<Vec<Section>, CatalogError> {
        let response: ItemsResponse = self
            .get_json(ITEMS_PATH, &[("sheetName", sheet)])
            .await?;
        Ok(response.into_sections())
    }

    async fn item_detail(&self, id: i64) -> Result<ItemDetail, CatalogError> {
        let path = format!("{ITEMS_PATH}{id}/");
        match self.get_json::<ItemDetailResponse>(&path, &[]).await {
            Ok(response) => Ok(response.into()),
            Err(CatalogError::Status { status: 404, .. }) => Err(CatalogError::NotFound(id)),
            Err(e) => Err(e),
        }
    }
}
