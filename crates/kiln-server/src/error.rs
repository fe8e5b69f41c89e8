//! HTTP error type: every adapter error converges here.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use kiln_auth::AuthError;
use kiln_core::errors::CoreError;
use kiln_core::responses::ApiMessage;
use kiln_db::DatabaseError;
use kiln_storage::StorageError;
use kiln_upload::UploadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request data.
    #[error("{0}")]
    BadRequest(String),

    /// No session; the browser is sent to the login page.
    #[error("login required")]
    Unauthenticated,

    #[error("{0}")]
    NotFound(String),

    /// The row is not in a state that allows the request.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("{0}")]
    Internal(String),
}

impl From<CoreError> for AppError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::BadRequest(message),
            CoreError::AlreadyCompleted { .. } => Self::Conflict(error.to_string()),
        }
    }
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound(_)
            | Self::Storage(StorageError::NotFound(_))
            | Self::Database(DatabaseError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(error) if error.is_conflict() => StatusCode::CONFLICT,
            Self::Storage(_)
            | Self::Auth(_)
            | Self::Database(_)
            | Self::Upload(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Unauthenticated) {
            return Redirect::to("/login").into_response();
        }

        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, Json(ApiMessage::error(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use kiln_core::enums::ActivityStatus;

    use super::*;

    #[test]
    fn database_conflicts_map_to_409() {
        let err = AppError::from(DatabaseError::InvalidTransition {
            id: 4,
            from: ActivityStatus::Failure,
            to: ActivityStatus::Approved,
        });
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::from(DatabaseError::AlreadyCompleted { id: 1 }).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn missing_rows_and_paths_map_to_404() {
        let err = AppError::from(DatabaseError::NotFound {
            table: "activity_log",
            id: 9,
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        let err = AppError::from(StorageError::NotFound("/Game/x.png".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::from(CoreError::Validation("missing field 'assigned_to'".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn completed_assignment_maps_to_409() {
        let err = AppError::from(CoreError::AlreadyCompleted { id: 3 });
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Assignment 3 is already completed");
    }

    #[test]
    fn unauthenticated_redirects_to_login() {
        let resp = AppError::Unauthenticated.into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()["location"], "/login");
    }

    #[test]
    fn upstream_failures_are_500() {
        let err = AppError::from(AuthError::Other("gotrue down".into()));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
