//! 호출별 컨텍스트.
//!
//! 모든 인바운드 호출마다 새로 생성되어 호출 체인을 따라 명시적으로
//! 전달됩니다. 전역 상태를 통하지 않으므로 호출 간 누수가 없습니다.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use roster_core::UserStore;
use uuid::Uuid;

use crate::auth::{extract_identity, CredentialCarrier};
use crate::state::AppState;

/// 호출별 컨텍스트.
///
/// 스토어 핸들과 해석된 신원(없을 수 있음)을 담습니다. 신원 부재는
/// 정상적인 상태이며 에러가 아닙니다 — 보호된 연산만이 이를 거부합니다.
#[derive(Clone)]
pub struct CallContext {
    /// 데이터 스토어 핸들
    pub store: Arc<dyn UserStore>,
    /// 해석된 호출자 신원
    pub identity: Option<Uuid>,
}

impl CallContext {
    /// 새 컨텍스트 생성.
    pub fn new(store: Arc<dyn UserStore>, identity: Option<Uuid>) -> Self {
        Self { store, identity }
    }

    /// 신원 없는 컨텍스트 생성.
    pub fn anonymous(store: Arc<dyn UserStore>) -> Self {
        Self::new(store, None)
    }

    /// 특정 신원으로 인증된 컨텍스트 생성.
    pub fn authenticated(store: Arc<dyn UserStore>, identity: Uuid) -> Self {
        Self::new(store, Some(identity))
    }
}

impl FromRequestParts<AppState> for CallContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 신원 추출은 요청당 한 번 실행되며 절대 호출을 실패시키지 않음
        let identity = extract_identity(
            CredentialCarrier::Request(&parts.headers),
            &state.tokens,
        );

        Ok(CallContext::new(state.store.clone(), identity))
    }
}
