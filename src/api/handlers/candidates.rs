//! Candidate triage endpoints.

use crate::api::{
    error::ApiError,
    extract::{Body, CurrentUser, OptionalBody, record_id},
    state::AppState,
};
use crate::candidate::{
    domain::{CandidateId, EditCandidate},
    services::{ConfirmOverrides, IgnoreReason},
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgnorePayload {
    reason: Option<IgnoreReason>,
}

fn candidate_id(raw: &str) -> Result<CandidateId, ApiError> {
    record_id(raw, "Candidate").map(CandidateId::from_uuid)
}

/// `POST /api/candidates/{id}/confirm` — materialise a task from a
/// candidate, with optional field overrides.
pub async fn confirm(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(raw_id): Path<String>,
    OptionalBody(overrides): OptionalBody<ConfirmOverrides>,
) -> Result<Json<Value>, ApiError> {
    let id = candidate_id(&raw_id)?;
    let confirmation = state
        .candidates
        .confirm(id, identity.user_id(), overrides)
        .await?;
    Ok(Json(json!({ "task": confirmation.task })))
}

/// `POST /api/candidates/{id}/edit` — replace a candidate's fields before
/// deciding on it.
pub async fn edit(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(raw_id): Path<String>,
    Body(payload): Body<EditCandidate>,
) -> Result<Json<Value>, ApiError> {
    let id = candidate_id(&raw_id)?;
    let candidate = state
        .candidates
        .edit(id, identity.user_id(), payload)
        .await?;
    Ok(Json(json!({ "candidate": candidate })))
}

/// `POST /api/candidates/{id}/ignore` — dismiss a candidate.
pub async fn ignore(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(raw_id): Path<String>,
    OptionalBody(payload): OptionalBody<IgnorePayload>,
) -> Result<Json<Value>, ApiError> {
    let id = candidate_id(&raw_id)?;
    state
        .candidates
        .ignore(id, identity.user_id(), payload.reason)
        .await?;
    Ok(Json(json!({ "success": true })))
}

/// `GET /api/candidates/{id}/source` — the source-message snippet a
/// candidate was extracted from.
pub async fn source(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = candidate_id(&raw_id)?;
    let snippet = state.candidates.source(id, identity.user_id()).await?;
    Ok(Json(json!({ "source": snippet })))
}
