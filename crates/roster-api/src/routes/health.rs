//! 헬스 체크 endpoint.
//!
//! 로드밸런서나 오케스트레이션 시스템에서 서버와 스토어 상태를 확인할 때
//! 사용됩니다.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy" | "degraded")
    pub status: String,

    /// API 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: u64,

    /// 사용자 스토어 상태
    pub store: StoreStatus,
}

/// 스토어 상태.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreStatus {
    /// 상태 ("up" | "down")
    pub status: String,
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
}

/// 간단한 헬스 체크 (liveness probe용).
///
/// 서버가 응답 가능한 상태인지만 확인합니다.
/// GET /health
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 상세 헬스 체크 (readiness probe용).
///
/// 스토어 왕복까지 확인합니다.
/// GET /health/ready
async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let store_up = state.is_store_healthy().await;

    let (status, status_code, store_status) = if store_up {
        ("healthy", StatusCode::OK, "up")
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE, "down")
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs: state.uptime_secs(),
            store: StoreStatus {
                status: store_status.to_string(),
            },
        }),
    )
}
