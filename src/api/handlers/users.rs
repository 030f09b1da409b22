//! Profile endpoints for the authenticated user.

use crate::api::{
    error::ApiError,
    extract::{Body, CurrentUser},
    state::AppState,
};
use crate::user::services::UpdateProfile;
use axum::{Json, extract::State};
use serde_json::{Value, json};

/// `GET /api/users/me` — the caller's profile.
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let profile = state.profiles.get(identity.user_id()).await?;
    Ok(Json(json!({ "profile": profile })))
}

/// `PATCH /api/users/me` — update the caller's profile.
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Body(payload): Body<UpdateProfile>,
) -> Result<Json<Value>, ApiError> {
    let profile = state
        .profiles
        .update(identity.user_id(), payload)
        .await?;
    Ok(Json(json!({ "profile": profile })))
}
