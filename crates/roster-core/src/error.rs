//! 계정 시스템의 에러 타입.
//!
//! 이 모듈은 계정 시스템 전반에서 사용되는 에러 분류 체계를 정의합니다.
//! 클라이언트에 노출되는 메시지는 계정 존재 여부를 유추할 수 없도록
//! 의도적으로 일반화되어 있습니다.

use thiserror::Error;

use crate::store::StoreError;

/// 핵심 계정 에러.
#[derive(Debug, Error)]
pub enum AccountError {
    /// 잘못된 입력 (예: 너무 짧은 비밀번호)
    ///
    /// 영속화 이전에 발생하며 메시지가 그대로 클라이언트에 전달됩니다.
    #[error("{0}")]
    Validation(String),

    /// 로그인 실패.
    ///
    /// 존재하지 않는 이메일과 잘못된 비밀번호를 구분하지 않습니다.
    /// 계정 열거(account enumeration)를 막기 위해 메시지는 항상 동일합니다.
    #[error("Unable to login")]
    AuthenticationFailed,

    /// 인증이 필요한 연산을 신원 없이 호출
    #[error("Authentication required")]
    AuthenticationRequired,

    /// 만료/위조/형식 오류 토큰.
    ///
    /// 만료인지 변조인지 외부로 구분하지 않습니다 (서명 오라클 방지).
    #[error("Invalid token")]
    InvalidToken,

    /// 스토어 에러 — 스토어가 제공한 메시지를 가공 없이 전달
    #[error(transparent)]
    Store(#[from] StoreError),

    /// 내부 에러 (태스크 조인 실패, 해싱 라이브러리 오류 등)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// 계정 작업을 위한 Result 타입.
pub type AccountResult<T> = Result<T, AccountError>;

impl AccountError {
    /// 인증 관련 에러인지 확인합니다 (HTTP 401 계열).
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AccountError::AuthenticationFailed
                | AccountError::AuthenticationRequired
                | AccountError::InvalidToken
        )
    }

    /// 클라이언트 입력 문제인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            AccountError::Internal(_) | AccountError::Store(StoreError::Backend(_))
        )
    }
}
