//! API error taxonomy and its mapping onto HTTP responses.
//!
//! Service failures reach this module as closed `thiserror` enums and are
//! classified by variant. Persistence causes are logged with their context
//! and replaced with a generic description before anything is written to
//! the client.

use crate::candidate::{
    domain::CandidateDomainError,
    ports::{CandidateRepositoryError, SourceMessageError},
    services::CandidateLifecycleError,
};
use crate::feed::services::FeedError;
use crate::identity::ports::IdentityError;
use crate::task::{ports::TaskRepositoryError, services::TaskServiceError};
use crate::user::{ports::ProfileRepositoryError, services::ProfileServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Classified request failure, one variant per response class.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Missing, malformed, or rejected credential.
    #[error("unauthorized")]
    Unauthorized,

    /// The request payload failed schema validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation is not permitted in the entity's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// No row exists for the requested id within the caller's rows.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The external store failed; details stay in the log stream.
    #[error("internal error")]
    Internal,
}

/// Stable JSON failure body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ApiError {
    /// Creates a validation failure with field-level detail.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Validation(_) | Self::InvalidState(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Unauthorized => ErrorBody {
                error: "unauthorized",
                message: Some("Missing or invalid credentials".to_owned()),
            },
            Self::Validation(message) => ErrorBody {
                error: "validation_error",
                message: Some(message.clone()),
            },
            Self::InvalidState(message) => ErrorBody {
                error: "invalid_state",
                message: Some(message.clone()),
            },
            Self::NotFound(entity) => ErrorBody {
                error: "not_found",
                message: Some(format!("{entity} not found")),
            },
            Self::Internal => ErrorBody {
                error: "internal_error",
                message: Some("An unexpected error occurred".to_owned()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        // Provider faults still refuse the request, but unlike plain token
        // rejections they are worth a log line.
        if let IdentityError::Provider(cause) = &err {
            warn!(error = %cause, "identity provider verification failed");
        }
        Self::Unauthorized
    }
}

impl From<CandidateLifecycleError> for ApiError {
    fn from(err: CandidateLifecycleError) -> Self {
        match err {
            CandidateLifecycleError::NotFound(_)
            | CandidateLifecycleError::CandidateRepository(CandidateRepositoryError::NotFound(
                _,
            )) => Self::NotFound("Candidate"),
            CandidateLifecycleError::SourceNotFound(_) => Self::NotFound("Source message"),
            CandidateLifecycleError::Domain(
                CandidateDomainError::InvalidStatusTransition { .. },
            ) => Self::InvalidState("Candidate already processed".to_owned()),
            CandidateLifecycleError::Domain(domain) => Self::Validation(domain.to_string()),
            CandidateLifecycleError::TaskDomain(domain) => Self::Validation(domain.to_string()),
            CandidateLifecycleError::CandidateRepository(cause) => {
                internal("candidate store", &cause)
            }
            CandidateLifecycleError::TaskRepository(cause) => internal("task store", &cause),
            CandidateLifecycleError::Source(cause) => internal("source message store", &cause),
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::NotFound(_)
            | TaskServiceError::Repository(TaskRepositoryError::NotFound(_)) => {
                Self::NotFound("Task")
            }
            TaskServiceError::Domain(domain) => Self::Validation(domain.to_string()),
            TaskServiceError::Repository(cause) => internal("task store", &cause),
        }
    }
}

impl From<ProfileServiceError> for ApiError {
    fn from(err: ProfileServiceError) -> Self {
        match err {
            ProfileServiceError::NotFound(_)
            | ProfileServiceError::Repository(ProfileRepositoryError::NotFound(_)) => {
                Self::NotFound("User profile")
            }
            ProfileServiceError::MissingEmail(_) => {
                Self::Validation("account has no email".to_owned())
            }
            ProfileServiceError::Domain(domain) => Self::Validation(domain.to_string()),
            ProfileServiceError::Repository(cause) => internal("profile store", &cause),
        }
    }
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::CandidateRepository(cause) => internal("candidate store", &cause),
            FeedError::TaskRepository(cause) => internal("task store", &cause),
        }
    }
}

impl From<SourceMessageError> for ApiError {
    fn from(err: SourceMessageError) -> Self {
        internal("source message store", &err)
    }
}

/// Logs a persistence failure with its operation context and returns the
/// generic internal-error response.
fn internal(operation: &'static str, cause: &dyn std::error::Error) -> ApiError {
    error!(operation, error = %cause, "request failed on external store");
    ApiError::Internal
}
