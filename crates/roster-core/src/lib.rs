//! # Roster Core
//!
//! 사용자 디렉터리 백엔드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 계정 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 사용자 레코드 및 쓰기 입력 타입
//! - 필드 가시성 규칙 (이메일 자기 자신만 조회 가능)
//! - 에러 분류 체계
//! - 외부 데이터 스토어 추상화 (`UserStore`)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod store;

pub use config::*;
pub use domain::*;
pub use error::{AccountError, AccountResult};
pub use logging::*;
pub use store::{StoreError, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MemoryUserStore;
