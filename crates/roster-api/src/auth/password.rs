//! 비밀번호 해싱 유틸리티.
//!
//! bcrypt 기반 비밀번호 해싱 및 검증. 평문은 저장/로깅/반환되지 않으며,
//! 해시만 스토어로 넘어갑니다.

use roster_core::{AccountError, AccountResult};

/// 비밀번호 최소 길이.
const MIN_PASSWORD_LENGTH: usize = 8;

/// 비밀번호 해싱.
///
/// 솔트는 자동으로 생성됩니다. `cost`는 bcrypt 작업 계수이며 설정에서
/// 공급됩니다 (기본값 12).
///
/// # Errors
///
/// - `AccountError::Validation`: 평문이 8자 미만
/// - `AccountError::Internal`: 해싱 라이브러리 오류
pub fn hash_password(plaintext: &str, cost: u32) -> AccountResult<String> {
    if plaintext.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AccountError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    bcrypt::hash(plaintext, cost)
        .map_err(|e| AccountError::Internal(format!("Password hashing failed: {e}")))
}

/// 비밀번호 검증.
///
/// 불일치 시 에러 없이 `false`를 반환합니다. 형식이 깨진 해시도
/// 검증 실패로 처리하며 패닉하지 않습니다.
pub fn verify_password(plaintext: &str, hashed: &str) -> bool {
    bcrypt::verify(plaintext, hashed).unwrap_or(false)
}
