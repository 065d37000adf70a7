//! 인바운드 호출에서 호출자 신원 추출.
//!
//! 베어러 자격증명은 전송 형태에 따라 두 운반자 중 하나에 실려 옵니다:
//! 요청형 호출은 `Authorization` 헤더, 구독/연결형 호출은 연결 수립
//! 파라미터. 추출은 호출을 실패시키지 않습니다 — 신원 부재는 정상적인
//! 결과입니다.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::token::TokenService;

/// 베어러 자격증명 운반자.
///
/// 런타임 타입 검사 대신 인바운드 호출 형태를 변형(variant)으로
/// 모델링합니다.
#[derive(Debug)]
pub enum CredentialCarrier<'a> {
    /// 요청형 호출 — `Authorization` 헤더
    Request(&'a HeaderMap),
    /// 구독/연결형 호출 — 연결 수립 파라미터의 `Authorization` 키
    Connection(&'a Map<String, Value>),
}

impl CredentialCarrier<'_> {
    /// 운반자에서 원시 자격증명 문자열을 꺼냅니다.
    fn raw_credential(&self) -> Option<&str> {
        match self {
            CredentialCarrier::Request(headers) => {
                headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok())
            }
            CredentialCarrier::Connection(params) => {
                params.get("Authorization").and_then(Value::as_str)
            }
        }
    }
}

/// 호출자 신원 추출.
///
/// `"Bearer "` 접두어가 있으면 제거한 뒤 토큰을 검증합니다. 자격증명
/// 부재를 포함한 모든 검증 실패는 `None`으로 강등됩니다 — 미인증 형태의
/// 응답이 여전히 가능해야 하기 때문입니다.
pub fn extract_identity(carrier: CredentialCarrier<'_>, tokens: &TokenService) -> Option<Uuid> {
    let raw = carrier.raw_credential()?;
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw);

    match tokens.verify(token) {
        Ok(identity) => Some(identity),
        Err(err) => {
            tracing::debug!(%err, "identity extraction degraded to anonymous");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::AuthConfig;
    use secrecy::SecretString;

    fn test_tokens() -> TokenService {
        TokenService::new(&AuthConfig {
            secret: SecretString::from("identity-extraction-test-secret"),
            ..Default::default()
        })
    }

    fn header_map(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_extract_from_request_header() {
        let tokens = test_tokens();
        let identity = Uuid::new_v4();
        let token = tokens.issue(identity).unwrap();

        let headers = header_map(&format!("Bearer {token}"));
        let extracted = extract_identity(CredentialCarrier::Request(&headers), &tokens);
        assert_eq!(extracted, Some(identity));
    }

    #[test]
    fn test_extract_without_bearer_prefix() {
        // 접두어가 없어도 나머지를 토큰으로 시도
        let tokens = test_tokens();
        let identity = Uuid::new_v4();
        let token = tokens.issue(identity).unwrap();

        let headers = header_map(&token);
        let extracted = extract_identity(CredentialCarrier::Request(&headers), &tokens);
        assert_eq!(extracted, Some(identity));
    }

    #[test]
    fn test_extract_from_connection_params() {
        let tokens = test_tokens();
        let identity = Uuid::new_v4();
        let token = tokens.issue(identity).unwrap();

        let mut params = Map::new();
        params.insert(
            "Authorization".to_string(),
            Value::String(format!("Bearer {token}")),
        );

        let extracted = extract_identity(CredentialCarrier::Connection(&params), &tokens);
        assert_eq!(extracted, Some(identity));
    }

    #[test]
    fn test_missing_credential_is_none_not_error() {
        let tokens = test_tokens();

        let headers = HeaderMap::new();
        assert_eq!(
            extract_identity(CredentialCarrier::Request(&headers), &tokens),
            None
        );

        let params = Map::new();
        assert_eq!(
            extract_identity(CredentialCarrier::Connection(&params), &tokens),
            None
        );
    }

    #[test]
    fn test_invalid_token_degrades_to_none() {
        let tokens = test_tokens();

        let headers = header_map("Bearer not-a-real-token");
        assert_eq!(
            extract_identity(CredentialCarrier::Request(&headers), &tokens),
            None
        );
    }

    #[test]
    fn test_foreign_secret_token_degrades_to_none() {
        let tokens = test_tokens();
        let foreign = TokenService::new(&AuthConfig {
            secret: SecretString::from("some-other-deployment-secret"),
            ..Default::default()
        });
        let token = foreign.issue(Uuid::new_v4()).unwrap();

        let headers = header_map(&format!("Bearer {token}"));
        assert_eq!(
            extract_identity(CredentialCarrier::Request(&headers), &tokens),
            None
        );
    }
}
