//! cohort-api: stateless HTTP wrapper around the group-assignment engine
//! A single `POST /assign` endpoint plus a `GET /healthz` liveness
//! check, mirroring `solver-server`'s/`backend/api`'s shape: no sessions,
//! no auth, no persistence -- one request in, one response out.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use cohort_contracts::{to_output, AssignmentInput, AssignmentOutput};
use cohort_core::orchestration::{execute, Assigner};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Clone)]
struct AppState {
    seed: u64,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

struct ApiError(String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(ErrorBody { error: self.0 })).into_response()
    }
}

impl From<cohort_core::EngineError> for ApiError {
    fn from(e: cohort_core::EngineError) -> Self {
        ApiError(e.to_string())
    }
}

async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

async fn assign(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AssignmentInput>,
) -> Result<Json<AssignmentOutput>, ApiError> {
    let program = cohort_contracts::to_program(&input)?;
    log::info!("assigning program {} via HTTP", program.id);
    let result = execute(&program, Assigner::Hybrid(input.config.into()), state.seed)?;
    Ok(Json(to_output(&result)))
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/assign", post(assign))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let seed = std::env::var("COHORT_API_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let state = Arc::new(AppState { seed });

    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    log::info!("cohort-api listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.expect("failed to bind address");
    axum::serve(listener, app(state)).await.expect("server error");
}
