//! 설정 관리.
//!
//! 모든 설정은 환경 변수에서 로드되며, 시작 이후에는 읽기 전용입니다.
//!
//! # 환경 변수
//!
//! - `JWT_SECRET`: 토큰 서명 비밀 키 (미설정 시 개발용 플레이스홀더)
//! - `JWT_EXPIRES_IN`: 토큰 유효 기간 (기본값: "1 day")
//! - `HASH_COST`: bcrypt 작업 계수 (기본값: 12)
//! - `API_HOST` / `API_PORT`: 서버 바인딩 주소

use std::net::SocketAddr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

/// 개발 환경 전용 서명 비밀 키 플레이스홀더.
///
/// 운영 배포에서는 반드시 `JWT_SECRET`으로 교체해야 합니다.
pub const INSECURE_DEV_SECRET: &str = "do_not_use_this_secret";

/// 기본 토큰 유효 기간 (1일).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(86_400);

/// 기본 bcrypt 작업 계수.
///
/// 무차별 대입 비용과 대화형 로그인 지연 사이의 균형으로 선택된 값입니다.
pub const DEFAULT_HASH_COST: u32 = 12;

// =============================================================================
// AuthConfig
// =============================================================================

/// 인증 계층 설정.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// 토큰 서명 비밀 키
    pub secret: SecretString,
    /// 토큰 유효 기간
    pub token_ttl: Duration,
    /// bcrypt 작업 계수
    pub hash_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::from(INSECURE_DEV_SECRET),
            token_ttl: DEFAULT_TOKEN_TTL,
            hash_cost: DEFAULT_HASH_COST,
        }
    }
}

impl AuthConfig {
    /// 환경 변수에서 설정 로드.
    ///
    /// `JWT_SECRET`이 없으면 개발용 플레이스홀더를 사용하고 경고를 남깁니다.
    pub fn from_env() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => SecretString::from(s),
            _ => {
                tracing::warn!(
                    "JWT_SECRET is not set; using the insecure development placeholder"
                );
                SecretString::from(INSECURE_DEV_SECRET)
            }
        };

        let token_ttl = match std::env::var("JWT_EXPIRES_IN") {
            Ok(raw) => match parse_ttl_flexible(&raw) {
                Some(ttl) => ttl,
                None => {
                    tracing::warn!(value = %raw, "Unrecognized JWT_EXPIRES_IN, falling back to 1 day");
                    DEFAULT_TOKEN_TTL
                }
            },
            Err(_) => DEFAULT_TOKEN_TTL,
        };

        let hash_cost = std::env::var("HASH_COST")
            .ok()
            .and_then(|c| c.parse().ok())
            .unwrap_or(DEFAULT_HASH_COST);

        Self {
            secret,
            token_ttl,
            hash_cost,
        }
    }

    /// 개발용 플레이스홀더 비밀 키를 사용 중인지 확인합니다.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.secret.expose_secret() == INSECURE_DEV_SECRET
    }
}

/// 유효 기간 문자열을 유연하게 파싱합니다.
///
/// 지원 형식:
/// - `"1 day"` / `"2 days"`
/// - `"12 hours"` / `"1 hour"`
/// - `"30 minutes"` / `"1 minute"`
/// - `"90 seconds"` / `"1 second"`
/// - 단위 없는 정수는 초로 해석: `"3600"`
pub fn parse_ttl_flexible(s: &str) -> Option<Duration> {
    let s = s.trim();

    // 단위 없는 정수는 초
    if let Ok(secs) = s.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let (amount, unit) = s.split_once(char::is_whitespace)?;
    let amount: u64 = amount.trim().parse().ok()?;

    let factor: u64 = match unit.trim().to_lowercase().as_str() {
        "day" | "days" | "d" => 86_400,
        "hour" | "hours" | "h" => 3_600,
        "minute" | "minutes" | "min" | "m" => 60,
        "second" | "seconds" | "sec" | "s" => 1,
        _ => return None,
    };

    // 오버플로우하는 값은 파싱 실패로 강등되어 기본값 경로를 탐
    Some(Duration::from_secs(amount.checked_mul(factor)?))
}

// =============================================================================
// ServerConfig
// =============================================================================

/// 서버 설정.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

impl ServerConfig {
    /// 환경 변수에서 설정 로드.
    pub fn from_env() -> Self {
        let host = std::env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4000);

        Self { host, port }
    }

    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
