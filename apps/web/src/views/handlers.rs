use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::{filter_sections, CatalogError};
use crate::errors::ViewError;
use crate::render::detail::{render_item_detail, render_item_not_found};
use crate::render::html::url_with_query;
use crate::render::matrix::{
    render_matrix_update, render_no_catalogs, render_sheet_badges, render_workspace,
};
use crate::render::page::{render_page, APP_TITLE, MATRIX_PATH};
use crate::render::{Layout, MatrixView};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub sheet: Option<String>,
    #[serde(default)]
    pub q: String,
    pub layout: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItemsParams {
    #[serde(rename = "sheetName", alias = "sheet")]
    pub sheet_name: String,
    #[serde(default)]
    pub q: String,
    pub layout: Option<String>,
}

/// Requested sheet if it exists, then the configured default, then the first.
fn select_sheet<'a>(
    sheets: &'a [String],
    requested: Option<&str>,
    preferred: Option<&str>,
) -> Option<&'a str> {
    [requested, preferred]
        .into_iter()
        .flatten()
        .find_map(|name| sheets.iter().find(|s| s.as_str() == name))
        .or_else(|| sheets.first())
        .map(String::as_str)
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request")
}

/// GET /
pub async fn handle_root() -> Redirect {
    Redirect::to(MATRIX_PATH)
}

/// GET /competency-matrix
pub async fn handle_matrix_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Html<String>, ViewError> {
    let sheets = state.source.list_sheets().await.map_err(ViewError::page)?;

    let Some(sheet) = select_sheet(
        &sheets,
        params.sheet.as_deref(),
        state.config.default_sheet.as_deref(),
    ) else {
        warn!("Catalog source '{}' has no sheets", state.source.kind());
        return Ok(Html(render_page(APP_TITLE, &render_no_catalogs())));
    };

    let sections = state
        .source
        .sheet_sections(sheet)
        .await
        .map_err(ViewError::page)?;
    let filtered = filter_sections(&sections, &params.q);
    debug!(
        sheet,
        query = %params.q,
        sections = filtered.len(),
        "rendering matrix page"
    );

    let view = MatrixView {
        sheet,
        query: &params.q,
        layout: Layout::parse(params.layout.as_deref()),
        sections: &filtered,
    };
    Ok(Html(render_page(
        &format!("{sheet} · {APP_TITLE}"),
        &render_workspace(&sheets, &view),
    )))
}

/// GET /competency-matrix/sheets
pub async fn handle_sheets_fragment(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Html<String>, ViewError> {
    let sheets = state
        .source
        .list_sheets()
        .await
        .map_err(ViewError::fragment)?;

    let Some(sheet) = select_sheet(
        &sheets,
        params.sheet.as_deref(),
        state.config.default_sheet.as_deref(),
    ) else {
        warn!("Catalog source '{}' has no sheets", state.source.kind());
        return Ok(Html(render_no_catalogs()));
    };

    let view = MatrixView {
        sheet,
        query: &params.q,
        layout: Layout::parse(params.layout.as_deref()),
        sections: &[],
    };
    Ok(Html(render_sheet_badges(&sheets, &view)))
}

/// GET /competency-matrix/items
///
/// The badges come along out-of-band so sheet switching keeps the filter.
pub async fn handle_items_fragment(
    State(state): State<AppState>,
    Query(params): Query<ItemsParams>,
) -> Result<Html<String>, ViewError> {
    let sections = state
        .source
        .sheet_sections(&params.sheet_name)
        .await
        .map_err(ViewError::fragment)?;
    let sheets = state
        .source
        .list_sheets()
        .await
        .map_err(ViewError::fragment)?;
    let filtered = filter_sections(&sections, &params.q);

    let view = MatrixView {
        sheet: &params.sheet_name,
        query: &params.q,
        layout: Layout::parse(params.layout.as_deref()),
        sections: &filtered,
    };
    Ok(Html(render_matrix_update(&sheets, &view)))
}

/// GET /competency-matrix/items/:id
///
/// HTMX requests get the bare modal; direct navigation gets a full page.
pub async fn handle_item_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let fragment = is_htmx(&headers);

    match state.source.item_detail(id).await {
        Ok(item) => {
            let modal = render_item_detail(&item);
            if fragment {
                return Html(modal).into_response();
            }
            let back = url_with_query(MATRIX_PATH, &[("sheet", item.sheet.as_str())]);
            let body = format!(
                "<p><a class=\"back-link\" href=\"{}\">← {APP_TITLE}</a></p>\n{modal}",
                crate::render::html::escape(&back)
            );
            Html(render_page(&item.question, &body)).into_response()
        }
        Err(CatalogError::NotFound(_)) => {
            debug!(id, "competency matrix item not found");
            let modal = render_item_not_found();
            let body = if fragment {
                modal
            } else {
                render_page(APP_TITLE, &modal)
            };
            (StatusCode::NOT_FOUND, Html(body)).into_response()
        }
        Err(e) if fragment => ViewError::fragment(e).into_response(),
        Err(e) => ViewError::page(e).into_response(),
    }
}
