use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::wire::{ItemDetailResponse, ItemsResponse, SheetsResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsParams {
    pub sheet_name: String,
}

/// GET /api/competency-matrix/sheets/
pub async fn handle_list_sheets(
    State(state): State<AppState>,
) -> Result<Json<SheetsResponse>, AppError> {
    let sheets = state.source.list_sheets().await?;
    Ok(Json(SheetsResponse { sheets }))
}

/// GET /api/competency-matrix/items/?sheetName=
pub async fn handle_list_items(
    State(state): State<AppState>,
    Query(params): Query<ListItemsParams>,
) -> Result<Json<ItemsResponse>, AppError> {
    let sections = state.source.sheet_sections(&params.sheet_name).await?;
    Ok(Json(ItemsResponse::from_sections(&params.sheet_name, &sections)))
}

/// GET /api/competency-matrix/items/:id/
pub async fn handle_get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ItemDetailResponse>, AppError> {
    let item = state.source.item_detail(id).await?;
    Ok(Json(ItemDetailResponse::from(&item)))
}
