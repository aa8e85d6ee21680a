//! HTTP API.
//!
//! - `POST /analyze` `{code}` returns an analysis report
//! - `POST /export` `{code, format}` returns generated tests as an attachment
//! - `GET /health`

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pyprobe_analyze::{AnalysisReport, Analyzer, export_file_name, render_test_module};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared, read-only server state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Export format used when a request names none.
    pub default_format: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            default_format: pyprobe_analyze::export::DEFAULT_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// Request failures. All map to 400 with `{"error": <message>}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No code provided")]
    NoCode,
    #[error("Analysis failed")]
    AnalysisFailed,
    #[error("Invalid format")]
    InvalidFormat,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/export", post(export))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::disable())
        .with_state(Arc::new(state))
}

/// Bind and serve until the process is stopped.
pub async fn run_http_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub async fn analyze(Json(request): Json<AnalyzeRequest>) -> Result<Json<AnalysisReport>, ApiError> {
    let code = request.code.unwrap_or_default();
    if code.is_empty() {
        return Err(ApiError::NoCode);
    }

    let report = AnalysisReport::from(Analyzer::new().analyze(&code));
    match report.error() {
        None => info!(bytes = code.len(), "analyzed snippet"),
        Some(err) => info!(bytes = code.len(), error = err, "snippet analysis failed"),
    }
    Ok(Json(report))
}

pub async fn export(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    let code = request.code.unwrap_or_default();
    let format = request
        .format
        .unwrap_or_else(|| state.default_format.clone());

    let analysis = Analyzer::new().analyze(&code).map_err(|err| {
        warn!(error = %err, "export analysis failed");
        ApiError::AnalysisFailed
    })?;

    if format.contains('"') {
        return Err(ApiError::InvalidFormat);
    }
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        export_file_name(&format)
    ))
    .map_err(|_| ApiError::InvalidFormat)?;

    let body = render_test_module(&analysis, &format);
    info!(format = %format, bytes = body.len(), "exported tests");

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    async fn post_analyze(code: Option<&str>) -> Response {
        analyze(Json(AnalyzeRequest {
            code: code.map(str::to_string),
        }))
        .await
        .into_response()
    }

    async fn post_export(code: &str, format: Option<&str>) -> Response {
        export(
            State(Arc::new(AppState::default())),
            Json(ExportRequest {
                code: Some(code.to_string()),
                format: format.map(str::to_string),
            }),
        )
        .await
        .into_response()
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_code() {
        for code in [None, Some("")] {
            let response = post_analyze(code).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await, json!({"error": "No code provided"}));
        }
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let response = post_analyze(Some("def f(x: int):\n    return x\n")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["functions"][0]["name"], "f");
        assert_eq!(body["functions"][0]["edge_cases"].as_array().unwrap().len(), 4);
        assert_eq!(body["metrics"]["complexity_rank"], "Low");
    }

    #[tokio::test]
    async fn test_analyze_syntax_error_is_still_ok_status() {
        let response = post_analyze(Some("def broken(:\n")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert!(body.get("functions").is_none());
    }

    #[tokio::test]
    async fn test_export_attachment() {
        let response = post_export("def f(s: str):\n    return s\n", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"test_cases.pytest.py\""
        );
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(body.starts_with("import pytest\n\ndef test_f_boundary():"));
        assert_eq!(body.matches("def test_f_").count(), 3);
    }

    #[tokio::test]
    async fn test_export_other_format_uses_unittest_import() {
        let response = post_export("def f():\n    pass\n", Some("unittest")).await;
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"test_cases.unittest.py\""
        );
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert_eq!(body, "import unittest\n\n");
    }

    #[tokio::test]
    async fn test_export_analysis_failure() {
        let response = post_export("def (", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Analysis failed"}));
    }

    #[tokio::test]
    async fn test_export_rejects_header_breaking_format() {
        for format in ["py\"test", "py\ntest"] {
            let response = post_export("def f():\n    pass\n", Some(format)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await, json!({"error": "Invalid format"}));
        }
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body, json!({"status": "ok"}));
    }
}
