pub mod health;

use axum::{routing::get, Router};

use crate::api::handlers as api;
use crate::render::matrix::{ITEMS_PATH, SHEETS_PATH};
use crate::render::page::MATRIX_PATH;
use crate::state::AppState;
use crate::views::handlers as views;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Browsing views
        .route("/", get(views::handle_root))
        .route(MATRIX_PATH, get(views::handle_matrix_page))
        .route(SHEETS_PATH, get(views::handle_sheets_fragment))
        .route(ITEMS_PATH, get(views::handle_items_fragment))
        .route(
            "/competency-matrix/items/:id",
            get(views::handle_item_detail),
        )
        // JSON read API
        .route(
            "/api/competency-matrix/sheets/",
            get(api::handle_list_sheets),
        )
        .route("/api/competency-matrix/items/", get(api::handle_list_items))
        .route(
            "/api/competency-matrix/items/:id/",
            get(api::handle_get_item),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, Response, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::{CatalogError, CatalogSource, StaticCatalog};
    use crate::models::catalog::{ItemDetail, Section};

    struct EmptySource;

    #[async_trait]
    impl CatalogSource for EmptySource {
        fn kind(&self) -> &'static str {
            "empty"
        }

        async fn list_sheets(&self) -> Result<Vec<String>, CatalogError> {
            Ok(vec![])
        }

        async fn sheet_sections(&self, _sheet: &str) -> Result<Vec<Section>, CatalogError> {
            Ok(vec![])
        }

        async fn item_detail(&self, id: i64) -> Result<ItemDetail, CatalogError> {
            Err(CatalogError::NotFound(id))
        }
    }

    struct DownSource;

    #[async_trait]
    impl CatalogSource for DownSource {
        fn kind(&self) -> &'static str {
            "down"
        }

        async fn list_sheets(&self) -> Result<Vec<String>, CatalogError> {
            Err(CatalogError::Status {
                status: 503,
                url: "http://upstream/api/competency-matrix/sheets/".to_string(),
            })
        }

        async fn sheet_sections(&self, _sheet: &str) -> Result<Vec<Section>, CatalogError> {
            Err(CatalogError::Status {
                status: 500,
                url: "http://upstream/api/competency-matrix/items/".to_string(),
            })
        }

        async fn item_detail(&self, _id: i64) -> Result<ItemDetail, CatalogError> {
            Err(CatalogError::Status {
                status: 500,
                url: "http://upstream/api/competency-matrix/items/1/".to_string(),
            })
        }
    }

    fn static_app() -> Router {
        let source = Arc::new(StaticCatalog::embedded().unwrap());
        build_router(AppState::for_source(source))
    }

    fn app_with(source: Arc<dyn CatalogSource>) -> Router {
        build_router(AppState::for_source(source))
    }

    async fn get(app: Router, uri: &str) -> Response<Body> {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn get_htmx(app: Router, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .uri(uri)
            .header("HX-Request", "true")
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_source() {
        let response = get(static_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["source"], "static");
    }

    #[tokio::test]
    async fn test_root_redirects_to_matrix() {
        let response = get(static_app(), "/").await;
        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers()[header::LOCATION],
            "/competency-matrix"
        );
    }

    #[tokio::test]
    async fn test_matrix_page_defaults_to_first_sheet_in_list_layout() {
        let response = get(static_app(), "/competency-matrix").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"data-sheet="Python""#));
        assert!(html.contains("matrix-list"));
        assert!(html.contains("Асинхронное программирование"));
        assert!(html.contains(r#"class="badge active" aria-current="page""#));
        assert!(html.contains(">SQL</a>"));
    }

    #[tokio::test]
    async fn test_matrix_page_filters_by_query() {
        let uri = format!(
            "/competency-matrix?sheet=Python&layout=grid&q={}",
            urlencoding::encode("функция")
        );
        let html = body_text(get(static_app(), &uri).await).await;

        assert!(html.contains("matrix-grid"));
        assert!(html.contains("<td class=\"subsection-cell\">Функции</td>"));
        assert!(!html.contains("Типы данных"));
        assert!(!html.contains("ООП"));
    }

    #[tokio::test]
    async fn test_unknown_sheet_falls_back_to_first() {
        let html = body_text(get(static_app(), "/competency-matrix?sheet=Cobol").await).await;
        assert!(html.contains(r#"data-sheet="Python""#));
    }

    #[tokio::test]
    async fn test_items_fragment_accepts_sheet_name_and_sheet() {
        let response = get(static_app(), "/competency-matrix/items?sheetName=SQL&layout=grid").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.starts_with(r#"<div id="matrix" class="matrix matrix-grid" data-sheet="SQL""#));
        assert!(!html.contains("<!DOCTYPE"));

        let html = body_text(get(static_app(), "/competency-matrix/items?sheet=SQL").await).await;
        assert!(html.contains("Нормализация"));
    }

    #[tokio::test]
    async fn test_items_fragment_keeps_badges_in_step_with_filters() {
        let html = body_text(
            get(static_app(), "/competency-matrix/items?sheet=Python&layout=grid&q=asyncio").await,
        )
        .await;

        assert!(html.contains(r#"<nav id="sheets" class="sheets" hx-swap-oob="true">"#));
        assert!(html.contains(
            r#"href="/competency-matrix?sheet=SQL&amp;layout=grid&amp;q=asyncio""#
        ));
        assert!(html.contains(r#"<span id="clear-search" hx-swap-oob="true"><a class="clear-search""#));
    }

    #[tokio::test]
    async fn test_item_detail_renders_markdown_answer() {
        let html = body_text(get_htmx(static_app(), "/competency-matrix/items/4").await).await;
        assert!(html.contains("<code>__init__</code>"));
        assert!(!html.contains("<strong>init</strong>"));
    }

    #[tokio::test]
    async fn test_items_fragment_without_match_says_nothing_found() {
        let html = body_text(
            get(static_app(), "/competency-matrix/items?sheetName=SQL&q=zzz").await,
        )
        .await;
        assert!(html.contains("Ничего не найдено"));
    }

    #[tokio::test]
    async fn test_items_fragment_requires_sheet() {
        let response = get(static_app(), "/competency-matrix/items").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_sheets_fragment_marks_requested_sheet() {
        let html = body_text(get(static_app(), "/competency-matrix/sheets?sheet=SQL").await).await;
        assert!(html.starts_with(r#"<nav id="sheets""#));
        assert!(html.contains(r#"class="badge active" aria-current="page" href="/competency-matrix?sheet=SQL"#));
    }

    #[tokio::test]
    async fn test_item_detail_fragment_for_htmx() {
        let response = get_htmx(static_app(), "/competency-matrix/items/5").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.starts_with(r#"<div class="modal""#));
        assert!(html.contains("Объясните разницу между __str__ и __repr__"));
    }

    #[tokio::test]
    async fn test_item_detail_full_page_without_htmx() {
        let html = body_text(get(static_app(), "/competency-matrix/items/12").await).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Что такое индекс в SQL?"));
        assert!(html.contains(r#"class="back-link" href="/competency-matrix?sheet=SQL""#));
    }

    #[tokio::test]
    async fn test_item_detail_not_found_modal() {
        let response = get_htmx(static_app(), "/competency-matrix/items/777").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Вопрос не найден"));
    }

    #[tokio::test]
    async fn test_empty_catalog_shows_message() {
        let response = get(app_with(Arc::new(EmptySource)), "/competency-matrix").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Матрицы компетенций пока не опубликованы."));
        assert!(!html.contains("id=\"matrix\""));
    }

    #[tokio::test]
    async fn test_upstream_failure_renders_error_panel() {
        let response = get(app_with(Arc::new(DownSource)), "/competency-matrix").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(response).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"class="error-panel""#));

        let response = get(
            app_with(Arc::new(DownSource)),
            "/competency-matrix/items?sheetName=Python",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(response).await;
        assert!(html.starts_with(r#"<div class="error-panel""#));
    }

    #[tokio::test]
    async fn test_api_sheets_and_items() {
        let json = body_json(get(static_app(), "/api/competency-matrix/sheets/").await).await;
        assert_eq!(json["sheets"], serde_json::json!(["Python", "SQL", "Architecture"]));

        let json = body_json(
            get(static_app(), "/api/competency-matrix/items/?sheetName=Architecture").await,
        )
        .await;
        assert_eq!(json["sheet"], "Architecture");
        assert_eq!(json["sections"][1]["section"], "Проектирование систем");
        assert_eq!(
            json["sections"][1]["subsections"][0]["grades"][0]["grade"],
            "Middle+"
        );
        assert_eq!(
            json["sections"][1]["subsections"][0]["grades"][0]["items"][0]["id"],
            20
        );
    }

    #[tokio::test]
    async fn test_api_unknown_sheet_is_empty_list() {
        let json = body_json(
            get(static_app(), "/api/competency-matrix/items/?sheetName=Cobol").await,
        )
        .await;
        assert_eq!(json["sheet"], "Cobol");
        assert_eq!(json["sections"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_api_item_detail_and_not_found() {
        let response = get(static_app(), "/api/competency-matrix/items/1/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["question"], "Что такое функция в Python?");
        assert_eq!(json["interviewExpectedAnswer"], "");
        assert_eq!(json["subsection"], "Функции");

        let response = get(static_app(), "/api/competency-matrix/items/999/").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_api_upstream_failure_is_bad_gateway() {
        let response = get(app_with(Arc::new(DownSource)), "/api/competency-matrix/sheets/").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "UPSTREAM_ERROR");
    }
}
