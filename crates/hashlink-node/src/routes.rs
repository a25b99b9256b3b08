//! Route handlers.
//!
//! Mining and signature checks are CPU-bound and run under or around the
//! store lock, so every handler that touches the chain runs the call on
//! tokio's blocking pool.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use hashlink::{AppendResult, Record};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

/// Body of `POST /mine`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MineRequest {
    pub payload: i64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_chain).post(submit_record))
        .route("/mine", post(mine_record))
        .route("/public-key", get(public_key))
}

/// GET /: the full chain.
async fn get_chain(State(state): State<AppState>) -> Result<Response, AppError> {
    // The store lock can be held by an append doing RSA verification.
    let chain = state.chain.clone();
    let records = tokio::task::spawn_blocking(move || chain.snapshot()).await??;
    pretty_json(StatusCode::OK, &records)
}

/// POST /: offer a client-built candidate.
async fn submit_record(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let candidate: Record =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let chain = state.chain.clone();
    let result = tokio::task::spawn_blocking(move || chain.submit(candidate)).await??;
    match result {
        AppendResult::Accepted(record) => pretty_json(StatusCode::CREATED, &record),
        AppendResult::Rejected(_) => Err(AppError::Rejected),
    }
}

/// POST /mine: have the node build, mine and sign the next record.
async fn mine_record(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let request: MineRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let chain = state.chain.clone();
    let record =
        tokio::task::spawn_blocking(move || chain.produce_and_submit(request.payload)).await??;
    pretty_json(StatusCode::CREATED, &record)
}

/// GET /public-key: SPKI PEM of the process identity.
async fn public_key(State(state): State<AppState>) -> Result<Response, AppError> {
    let pem = state
        .chain
        .public_key()
        .to_pem()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "application/x-pem-file")], pem).into_response())
}

fn pretty_json<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, AppError> {
    let body = serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}
