//! Axum HTTP server for the question-routing API.
//!
//! Two routes: a status probe on `/` and the routing endpoint on
//! `/question`. All per-request state is read-only behind `Arc`, so handlers
//! run concurrently without coordination.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::Error;
use crate::orchestrator::{AnswerResponse, Orchestrator, QuestionRequest};

/// Shared state for all handlers.
pub struct AppState {
    pub orchestrator: Orchestrator,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build the application router.
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let cors = cors_layer(&config.cors_origins);

    Router::new()
        .route("/", get(status_handler))
        .route("/question", post(question_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Default endpoint to verify API status.
async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "API running",
    })
}

/// Route a question to the cheapest capable model and return its answer.
async fn question_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<AnswerResponse>, (StatusCode, Json<ErrorResponse>)> {
    if request.question.trim().is_empty() {
        return Err(bad_request("question must not be empty"));
    }
    if matches!(request.answers.as_deref(), Some([])) {
        return Err(bad_request("answers, if present, must not be empty"));
    }

    let response = state
        .orchestrator
        .answer(&request)
        .await
        .map_err(map_error)?;

    Ok(Json(response))
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Map pipeline errors onto HTTP statuses. Collaborator failures surface as
/// gateway errors; misconfiguration surfaces as an internal error.
fn map_error(err: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        Error::Classifier(_) => StatusCode::BAD_GATEWAY,
        Error::Llm(crate::error::LlmError::RateLimited { .. }) => StatusCode::TOO_MANY_REQUESTS,
        Error::Llm(crate::error::LlmError::AuthFailed { .. })
        | Error::Llm(crate::error::LlmError::TierNotConfigured { .. }) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        Error::Llm(_) => StatusCode::BAD_GATEWAY,
        Error::Config(_) | Error::Table(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    tracing::error!(status = %status, "request failed: {err}");

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Serve the router until ctrl-c.
pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {e}");
        return;
    }
    tracing::info!("shutdown signal received");
}
