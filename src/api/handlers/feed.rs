//! Feed endpoints: merged view, new candidates, upcoming tasks.

use crate::api::{
    error::ApiError,
    extract::{CurrentUser, Params},
    state::AppState,
};
use crate::feed::services::FeedStatusFilter;
use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedQuery {
    #[serde(default)]
    status: FeedStatusFilter,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpcomingQuery {
    limit: Option<u32>,
}

/// `GET /api/feed` — the owner's candidates and tasks side by side.
pub async fn feed(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Params(query): Params<FeedQuery>,
) -> Result<Json<Value>, ApiError> {
    let feed = state.feed.feed(identity.user_id(), query.status).await?;
    Ok(Json(json!({
        "candidates": feed.candidates,
        "tasks": feed.tasks,
    })))
}

/// `GET /api/feed/new` — unprocessed candidates ranked by confidence.
pub async fn new_candidates(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let candidates = state.feed.new_candidates(identity.user_id()).await?;
    Ok(Json(json!({ "candidates": candidates })))
}

/// `GET /api/feed/upcoming` — pending dated tasks, soonest first.
pub async fn upcoming(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Params(query): Params<UpcomingQuery>,
) -> Result<Json<Value>, ApiError> {
    let tasks = state
        .feed
        .upcoming_tasks(identity.user_id(), query.limit.map(i64::from))
        .await?;
    Ok(Json(json!({ "tasks": tasks })))
}
