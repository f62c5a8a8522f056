use super::page::render_page;
use crate::charts::ChartKind;
use crate::dashboard::generate_dashboard;
use crate::data::PopulationTable;
use crate::stats::DatasetSummary;
use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{error, info};

/// Shared by every request. The table is never written after startup.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<PopulationTable>,
}

impl AppState {
    pub fn new(table: PopulationTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/charts/:slug", get(chart))
        .route("/api/summary", get(summary))
        .route("/healthz", get(healthz))
        .with_state(state)
}

pub async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("dashboard listening on http://{}", addr);

    axum::serve(listener, router(state))
        .await
        .context("Server failed")
}

fn internal_error(err: impl Display) -> Response {
    let message = err.to_string();
    error!(error = %message, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}

async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

async fn index(State(st): State<AppState>) -> Response {
    // Rendering is CPU-bound; keep it off the async workers
    let table = Arc::clone(&st.table);
    let join = tokio::task::spawn_blocking(move || {
        generate_dashboard(&table).map(|dashboard| render_page(&dashboard))
    });

    match join.await {
        Ok(Ok(html)) => Html(html).into_response(),
        Ok(Err(e)) => internal_error(e),
        Err(e) => internal_error(format!("join error: {e}")),
    }
}

async fn chart(State(st): State<AppState>, Path(slug): Path<String>) -> Response {
    let Some(kind) = ChartKind::from_slug(&slug) else {
        return (StatusCode::NOT_FOUND, format!("Unknown chart '{slug}'")).into_response();
    };

    let table = Arc::clone(&st.table);
    match tokio::task::spawn_blocking(move || kind.render(&table)).await {
        Ok(Ok(png)) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Ok(Err(e)) => internal_error(e),
        Err(e) => internal_error(format!("join error: {e}")),
    }
}

async fn summary(State(st): State<AppState>) -> Response {
    let table = Arc::clone(&st.table);
    match tokio::task::spawn_blocking(move || DatasetSummary::compute(&table)).await {
        Ok(Ok(summary)) => Json(summary).into_response(),
        Ok(Err(e)) => internal_error(e),
        Err(e) => internal_error(format!("join error: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{raw_frame, two_states};
    use crate::data::DatasetLoader;

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    fn state() -> AppState {
        AppState::new(two_states())
    }

    #[tokio::test]
    async fn index_embeds_all_charts() {
        let response = index(State(state())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert_eq!(html.matches("data:image/png;base64,").count(), ChartKind::ALL.len());
        for kind in ChartKind::ALL {
            assert!(html.contains(kind.title()), "missing {}", kind.title());
        }
    }

    #[tokio::test]
    async fn chart_route_serves_png() {
        let response = chart(State(state()), Path("density".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert!(body_bytes(response).await.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn unknown_chart_is_not_found() {
        let response = chart(State(state()), Path("scatter".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn render_failure_is_a_server_error() {
        let raw = raw_frame(&[
            ["A", "100", "60", "40", "70", "30", "1", "", "5%", "80"],
            ["B", "200", "90", "110", "50", "150", "2", "", "10%", "90"],
        ]);
        let st = AppState::new(DatasetLoader::clean(raw).unwrap());

        let response = index(State(st)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(text.contains("Density"), "{text}");
    }

    #[tokio::test]
    async fn summary_is_json() {
        let response = summary(State(state())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let value: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(value["states"], 2);
        assert_eq!(value["total_population"], 300.0);
        assert_eq!(value["category_totals"][0]["label"], "Males");
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let response = healthz().await.into_response();
        let value: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(value, json!({"ok": true}));
    }
}
