//! API 에러 응답.
//!
//! [`roster_core::AccountError`]를 HTTP 상태 코드와 일관된 JSON 형식으로
//! 변환합니다. 스토어가 제공한 메시지는 가공 없이 전달됩니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::{AccountError, StoreError};
use serde_json::json;

/// API 계층 에러.
///
/// 모든 핸들러가 반환하는 에러 타입입니다.
#[derive(Debug)]
pub struct ApiError(pub AccountError);

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(AccountError::from(err))
    }
}

/// 에러 분류별 코드 문자열.
///
/// HTTP 응답과 WebSocket 에러 메시지가 공유합니다.
pub fn error_code(err: &AccountError) -> &'static str {
    match err {
        AccountError::Validation(_) => "VALIDATION_ERROR",
        AccountError::AuthenticationFailed => "AUTHENTICATION_FAILED",
        AccountError::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
        AccountError::InvalidToken => "INVALID_TOKEN",
        AccountError::Store(StoreError::UniqueViolation(_)) => "UNIQUE_VIOLATION",
        AccountError::Store(StoreError::NotFound) => "NOT_FOUND",
        AccountError::Store(StoreError::Backend(_)) => "STORE_ERROR",
        AccountError::Internal(_) => "INTERNAL_ERROR",
    }
}

fn status_for(err: &AccountError) -> StatusCode {
    match err {
        AccountError::Validation(_) => StatusCode::BAD_REQUEST,
        AccountError::AuthenticationFailed
        | AccountError::AuthenticationRequired
        | AccountError::InvalidToken => StatusCode::UNAUTHORIZED,
        AccountError::Store(StoreError::UniqueViolation(_)) => StatusCode::CONFLICT,
        AccountError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        AccountError::Store(StoreError::Backend(_)) | AccountError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = Json(json!({
            "error": {
                "code": error_code(&self.0),
                "message": self.0.to_string()
            }
        }));

        (status, body).into_response()
    }
}
