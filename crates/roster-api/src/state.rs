//! 애플리케이션 공유 상태.

use std::sync::Arc;
use std::time::Instant;

use roster_core::{AuthConfig, UserStore};
use uuid::Uuid;

use crate::auth::TokenService;
use crate::operations::AccountOperations;

/// 전송 계층이 공유하는 애플리케이션 상태.
///
/// 시작 시 한 번 구성되며 이후 읽기 전용입니다. 핸들러마다 복제되어도
/// 내부는 모두 `Arc` 공유라 비용이 없습니다.
#[derive(Clone)]
pub struct AppState {
    /// 사용자 스토어
    pub store: Arc<dyn UserStore>,
    /// 토큰 발급/검증 서비스
    pub tokens: TokenService,
    /// 계정 연산 묶음
    pub operations: Arc<AccountOperations>,
    /// 서버 시작 시각
    started_at: Instant,
}

impl AppState {
    /// 스토어와 인증 설정으로 상태 구성.
    pub fn new(store: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        let tokens = TokenService::new(config);
        let operations = Arc::new(AccountOperations::new(tokens.clone(), config.hash_cost));

        Self {
            store,
            tokens,
            operations,
            started_at: Instant::now(),
        }
    }

    /// 서버 가동 시간 (초).
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// 스토어 연결 상태 확인.
    ///
    /// nil UUID 존재 조회로 스토어 왕복이 성공하는지만 확인합니다.
    pub async fn is_store_healthy(&self) -> bool {
        self.store.exists(Uuid::nil()).await.is_ok()
    }
}

/// 인메모리 스토어 기반 테스트 상태 생성.
///
/// 낮은 해싱 계수로 테스트 지연을 줄입니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use roster_core::MemoryUserStore;
    use secrecy::SecretString;

    let config = AuthConfig {
        secret: SecretString::from("test-state-secret"),
        hash_cost: 4,
        ..Default::default()
    };
    AppState::new(Arc::new(MemoryUserStore::new()), &config)
}
