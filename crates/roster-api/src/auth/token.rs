//! 신원 토큰 서비스.
//!
//! 시간 제한이 있는 서명된 신원 토큰(JWT, HS256)을 발급/검증합니다.
//! 토큰은 무상태이며 만료 전 철회 수단이 없습니다 — 계정 존재에 의존하는
//! 보호 연산은 토큰 페이로드를 신뢰하지 말고 라이브 스토어에서 신원을
//! 다시 해석해야 합니다.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use roster_core::{AccountError, AccountResult, AuthConfig};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 토큰 페이로드.
///
/// 서명은 페이로드 전체(신원 + 타임스탬프)를 커버하므로 만료 시각만
/// 떼어내 재사용하는 리플레이가 불가능합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: Uuid,
    /// Issued At - 발급 시각 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 만료 시각 (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 지금부터 `ttl` 동안 유효한 Claims 생성.
    pub fn new(identity: Uuid, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: identity,
            iat: now,
            exp: now + ttl.as_secs() as i64,
        }
    }
}

/// 토큰 발급/검증 서비스.
///
/// 시작 시 한 번 생성되어 모든 호출이 공유합니다. 내부 키는 읽기 전용이며
/// 잠금이 필요 없습니다.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
    ttl: Duration,
}

impl TokenService {
    /// 설정에서 토큰 서비스 생성.
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();

        let mut validation = Validation::default();
        validation.validate_exp = true;
        // 만료는 정확히 exp 시각부터 적용 (시계 여유 없음)
        validation.leeway = 0;

        Self {
            encoding_key: Arc::new(EncodingKey::from_secret(secret)),
            decoding_key: Arc::new(DecodingKey::from_secret(secret)),
            validation: Arc::new(validation),
            ttl: config.token_ttl,
        }
    }

    /// 신원 토큰 발급.
    ///
    /// `issuedAt = now`, `expiresAt = now + ttl`로 서명합니다.
    pub fn issue(&self, identity: Uuid) -> AccountResult<String> {
        self.encode_claims(&Claims::new(identity, self.ttl))
    }

    /// 토큰 검증.
    ///
    /// 성공 시 내장된 신원을 반환합니다. 서명 불일치/형식 오류/만료는
    /// 외부로 단일한 [`AccountError::InvalidToken`]으로만 보고됩니다 —
    /// 실패 원인은 내부 로그에서만 구분합니다.
    pub fn verify(&self, token: &str) -> AccountResult<Uuid> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        tracing::debug!("token rejected: expired");
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        tracing::debug!("token rejected: signature mismatch");
                    }
                    kind => {
                        tracing::debug!(?kind, "token rejected: malformed");
                    }
                }
                AccountError::InvalidToken
            })
    }

    /// 설정된 토큰 유효 기간.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn encode_claims(&self, claims: &Claims) -> AccountResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AccountError::Internal(format!("Token encoding failed: {e}")))
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").field("ttl", &self.ttl).finish()
    }
}
