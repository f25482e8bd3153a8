//! Analysis HTTP Routes
//!
//! `POST /analyze` with `{"query": "..."}` returns the alternative set for
//! the query. Each request runs on its own planner session.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::analysis::{AlternativeSet, AnalysisError, ErrorKind, PlanAnalyzer};
use crate::session::SessionProvider;

// ==================
// Shared State
// ==================

/// Analysis state shared across handlers
pub struct AnalyzeState {
    pub provider: Arc<dyn SessionProvider>,
    pub analyzer: PlanAnalyzer,
}

impl AnalyzeState {
    pub fn new(provider: Arc<dyn SessionProvider>, analyzer: PlanAnalyzer) -> Self {
        Self { provider, analyzer }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub query: String,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub kind: ErrorKind,
}

impl AnalysisError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidQuery => StatusCode::BAD_REQUEST,
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&AnalysisError> for ErrorResponse {
    fn from(err: &AnalysisError) -> Self {
        Self {
            error: err.message(),
            code: err.code(),
            kind: err.kind(),
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

// ==================
// Routes
// ==================

/// Create analysis routes
pub fn analyze_routes(state: Arc<AnalyzeState>) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .with_state(state)
}

async fn analyze_handler(
    State(state): State<Arc<AnalyzeState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AlternativeSet>, AnalysisError> {
    // Planner sessions are blocking
    let set = tokio::task::spawn_blocking(move || {
        state
            .analyzer
            .analyze_with(state.provider.as_ref(), &request.query)
    })
    .await
    .map_err(|e| AnalysisError::Internal(e.to_string()))??;

    Ok(Json(set))
}
