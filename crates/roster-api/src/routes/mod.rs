//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크
//! - `/api/v1/users` - 계정 생성/목록
//! - `/api/v1/users/login` - 로그인
//! - `/api/v1/users/me` - 내 프로필 조회/수정/삭제
//! - `/ws` - WebSocket 엔드포인트

pub mod health;
pub mod users;

pub use health::{health_router, HealthResponse, StoreStatus};
pub use users::{users_router, UserListResponse};

use axum::Router;

use crate::state::AppState;
use crate::websocket::websocket_router;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/health", health_router())
        .nest("/api/v1/users", users_router())
        .nest("/ws", websocket_router())
}
