//! HTTP surface for the message store.
//!
//! Endpoints:
//! - `GET  /`                — list every message
//! - `POST /`                — create a message (uuid supplied by the caller)
//! - `GET  /message/{uuid}`  — fetch one message by uuid
//! - `GET  /messages/`       — list messages matching optional filters
//! - `GET  /stats/`          — filtered messages plus count and exact total
//!
//! Filter parameters for `/messages/` and `/stats/`: `start_date` and
//! `end_date` (`YYYY-MM-DD` or `YYYYMMDD`, inclusive range), `customerid`
//! (exact match; 0 disables the filter), `type` (exact match; empty string
//! disables the filter).

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use msgstats_core::{Message, MessageFilter, Stats};
use msgstats_db::{DbPool, MessageRepository, RepositoryError, SqlMessageRepository};

#[derive(Clone)]
pub struct ApiState {
    repo: Arc<dyn MessageRepository>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub detail: String,
}

type ApiFailure = (StatusCode, Json<ApiError>);

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub customerid: Option<i64>,
    #[serde(rename = "type")]
    pub message_type: Option<String>,
}

pub fn router(db_pool: DbPool) -> Router {
    let state = ApiState { repo: Arc::new(SqlMessageRepository::new(db_pool)) };

    Router::new()
        .route("/", get(list_messages).post(create_message))
        .route("/message/{uuid}", get(get_message))
        .route("/messages/", get(list_filtered))
        .route("/stats/", get(stats))
        .with_state(state)
}

async fn list_messages(State(state): State<ApiState>) -> Result<Json<Vec<Message>>, ApiFailure> {
    let messages = state.repo.list_all().await.map_err(db_error)?;
    Ok(Json(messages))
}

async fn create_message(
    State(state): State<ApiState>,
    Json(message): Json<Message>,
) -> Result<Json<Message>, ApiFailure> {
    match state.repo.create(message).await {
        Ok(created) => Ok(Json(created)),
        Err(RepositoryError::Duplicate(_)) => Err(bad_request("Message already exists")),
        Err(error) => Err(db_error(error)),
    }
}

async fn get_message(
    Path(uuid): Path<Uuid>,
    State(state): State<ApiState>,
) -> Result<Json<Message>, ApiFailure> {
    match state.repo.find_by_uuid(&uuid).await.map_err(db_error)? {
        Some(message) => Ok(Json(message)),
        None => Err(not_found("Message not found")),
    }
}

async fn list_filtered(
    Query(query): Query<FilterQuery>,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Message>>, ApiFailure> {
    let filter = message_filter(&query)?;
    let messages = state.repo.find_filtered(&filter).await.map_err(db_error)?;
    Ok(Json(messages))
}

async fn stats(
    Query(query): Query<FilterQuery>,
    State(state): State<ApiState>,
) -> Result<Json<Stats>, ApiFailure> {
    let filter = message_filter(&query)?;
    let messages = state.repo.find_filtered(&filter).await.map_err(db_error)?;
    Ok(Json(Stats::from_messages(messages)))
}

fn message_filter(query: &FilterQuery) -> Result<MessageFilter, ApiFailure> {
    MessageFilter::new(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        query.customerid,
        query.message_type.as_deref(),
    )
    .map_err(|error| bad_request(&error.to_string()))
}

fn bad_request(detail: &str) -> ApiFailure {
    (StatusCode::BAD_REQUEST, Json(ApiError { detail: detail.to_string() }))
}

fn not_found(detail: &str) -> ApiFailure {
    (StatusCode::NOT_FOUND, Json(ApiError { detail: detail.to_string() }))
}

fn db_error(error: RepositoryError) -> ApiFailure {
    error!(event_name = "system.api.database_error", error = %error, "message store error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError { detail: "an internal error occurred".to_string() }),
    )
}
