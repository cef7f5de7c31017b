//! Mapping of use case failures onto JSON error envelopes.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::usecase::UseCaseError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    /// The family already owns a room; the envelope carries its code.
    #[error("Room already exists for this family.\nRoom Code: {0}")]
    RoomExists(String),

    #[error("Invalid request data")]
    InvalidBody(#[from] JsonRejection),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    room: Option<String>,
}

/// Message shown to clients for a use case failure.
///
/// Store failures are reported generically; the detail only goes to the log.
pub fn client_message(error: &UseCaseError) -> String {
    match error {
        UseCaseError::Persistence(e) => {
            tracing::error!("Persistence failure: {}", e);
            "Database error occurred".to_string()
        }
        other => other.to_string(),
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UseCase(UseCaseError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::UseCase(UseCaseError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::UseCase(UseCaseError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            ApiError::UseCase(UseCaseError::InvalidState(_)) => StatusCode::CONFLICT,
            ApiError::UseCase(UseCaseError::Persistence(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RoomExists(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::UseCase(e) => ErrorBody {
                status: "error",
                message: client_message(&e),
                room: None,
            },
            ApiError::RoomExists(room) => ErrorBody {
                status: "error",
                message: format!("Room already exists for this family.\nRoom Code: {room}"),
                room: Some(room),
            },
            ApiError::InvalidBody(rejection) => {
                tracing::warn!("Rejected request body: {}", rejection.body_text());
                ErrorBody {
                    status: "error",
                    message: "Invalid request data".to_string(),
                    room: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositoryError;

    #[test]
    fn test_status_mapping() {
        // テスト項目: UseCase のエラーが HTTP ステータスに対応付けられる
        // given (前提条件):
        let cases = [
            (UseCaseError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (UseCaseError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (UseCaseError::Unauthorized("u".into()), StatusCode::UNAUTHORIZED),
            (UseCaseError::InvalidState("i".into()), StatusCode::CONFLICT),
            (
                UseCaseError::Persistence(RepositoryError::Unavailable("p".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            // when (操作):
            let response = ApiError::from(error).into_response();

            // then (期待する結果):
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_persistence_detail_is_hidden() {
        // テスト項目: データストアの詳細はクライアントに返さない
        // given (前提条件):
        let error = UseCaseError::Persistence(RepositoryError::Unavailable(
            "mongodb://secret-host".into(),
        ));

        // when (操作):
        let message = client_message(&error);

        // then (期待する結果):
        assert_eq!(message, "Database error occurred");
    }
}
