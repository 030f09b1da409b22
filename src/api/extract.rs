//! Request extractors: bearer authentication and strict payload parsing.

use super::{error::ApiError, state::AppState};
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::identity::domain::UserIdentity;

/// Verified identity of the caller, resolved once per request.
///
/// Extraction fails with 401 when the `Authorization` header is missing or
/// malformed, or when the identity provider rejects the token. The
/// resolved identity lives only for this request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserIdentity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;
        let token = header
            .strip_prefix("Bearer ")
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::Unauthorized)?;

        let identity = state.identity.verify(token).await?;
        Ok(Self(identity))
    }
}

/// Required JSON request body, parsed into a strict typed payload.
///
/// A missing, unreadable, or schema-violating body short-circuits with a
/// 400 validation failure before any service runs.
#[derive(Debug, Clone)]
pub struct Body<T>(pub T);

impl<S, T> FromRequest<S> for Body<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::validation("request body could not be read"))?;
        parse_json(&bytes).map(Self)
    }
}

/// Optional JSON request body defaulting when absent or empty.
///
/// Operations like confirm and ignore accept an empty body; a present but
/// malformed body still fails validation.
#[derive(Debug, Clone)]
pub struct OptionalBody<T>(pub T);

impl<S, T> FromRequest<S> for OptionalBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::validation("request body could not be read"))?;
        if bytes.is_empty() {
            return Ok(Self(T::default()));
        }
        parse_json(&bytes).map(Self)
    }
}

/// Query-string parameters parsed into a strict typed payload.
#[derive(Debug, Clone)]
pub struct Params<T>(pub T);

impl<S, T> FromRequestParts<S> for Params<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|err| ApiError::validation(err.body_text()))
    }
}

/// Parses a record id path segment.
///
/// An id that is not a UUID cannot match any row, so it reports the same
/// not-found outcome a well-formed unknown id would.
pub fn record_id(raw: &str, entity: &'static str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(entity))
}

fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|err| ApiError::validation(err.to_string()))
}
