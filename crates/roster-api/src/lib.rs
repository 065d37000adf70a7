//! REST API 및 WebSocket 서버.
//!
//! 이 크레이트는 사용자 계정 백엔드의 인증/인가 계층을 제공합니다:
//! - 자격증명 해싱/검증 (bcrypt)
//! - 시간 제한 신원 토큰 발급/검증 (JWT)
//! - 호출 컨텍스트 신원 추출 및 인증 가드
//! - 계정 생성/로그인/프로필 연산
//! - Axum 기반 HTTP + WebSocket 전송 계층
//!
//! # 모듈 구성
//!
//! - [`auth`]: 비밀번호 해싱, 토큰 서비스, 신원 추출, 가드
//! - [`context`]: 호출별 컨텍스트 (스토어 핸들 + 선택적 신원)
//! - [`operations`]: 계정 유스케이스 조합 계층
//! - [`repository`]: Postgres 사용자 스토어
//! - [`routes`]: REST API 엔드포인트
//! - [`websocket`]: 연결 파라미터 기반 인증을 지원하는 WebSocket 엔드포인트
//! - [`state`]: 애플리케이션 공유 상태 (AppState)

pub mod auth;
pub mod context;
pub mod error;
pub mod operations;
pub mod repository;
pub mod routes;
pub mod state;
pub mod websocket;

pub use auth::{
    extract_identity, hash_password, verify_password, Claims, CredentialCarrier, Guarded,
    GuardedOperation, Operation, TokenService,
};
pub use context::CallContext;
pub use error::{ApiError, ApiResult};
pub use operations::AccountOperations;
pub use repository::PgUserStore;
pub use routes::create_api_router;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
