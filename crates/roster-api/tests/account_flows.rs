//! 계정 전체 흐름 통합 테스트.
//!
//! 인메모리 스토어 위에서 생성 → 로그인 → 조회 → 수정 → 삭제 흐름과
//! 신원 추출, 가시성 규칙을 검증합니다.

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use roster_api::auth::{extract_identity, verify_password, CredentialCarrier, TokenService};
use roster_api::context::CallContext;
use roster_api::operations::{
    AccountOperations, AccountUpdate, ListUsersArgs, LoginInput, NewAccountInput,
};
use roster_core::{AccountError, AuthConfig, MemoryUserStore, StoreError, UserStore};
use secrecy::SecretString;

struct TestHarness {
    store: Arc<MemoryUserStore>,
    tokens: TokenService,
    ops: AccountOperations,
}

impl TestHarness {
    fn new() -> Self {
        let config = AuthConfig {
            secret: SecretString::from("account-flow-test-secret"),
            hash_cost: 4, // 테스트 지연 최소화
            ..Default::default()
        };
        let tokens = TokenService::new(&config);

        Self {
            store: Arc::new(MemoryUserStore::new()),
            tokens: tokens.clone(),
            ops: AccountOperations::new(tokens, config.hash_cost),
        }
    }

    fn anonymous(&self) -> CallContext {
        CallContext::anonymous(self.store.clone())
    }

    fn as_user(&self, id: uuid::Uuid) -> CallContext {
        CallContext::authenticated(self.store.clone(), id)
    }

    async fn signup(&self, name: &str, email: &str, password: &str) -> (uuid::Uuid, String) {
        let payload = self
            .ops
            .create_account(
                &self.anonymous(),
                NewAccountInput {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: SecretString::from(password),
                },
            )
            .await
            .expect("signup failed");
        (payload.user.id, payload.token)
    }
}

#[tokio::test]
async fn test_signup_returns_token_and_hides_plaintext() {
    let h = TestHarness::new();
    let (id, token) = h.signup("Mike", "mike@example.com", "mike1234").await;

    // 발급된 토큰은 새 계정의 신원으로 검증됨
    assert_eq!(h.tokens.verify(&token).unwrap(), id);

    // 저장된 자격증명은 평문이 아님
    let stored = h.store.get_user_by_id(id).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "mike1234");
    assert!(verify_password("mike1234", &stored.password_hash));
}

#[tokio::test]
async fn test_signup_rejects_short_password_before_store() {
    let h = TestHarness::new();

    let err = h
        .ops
        .create_account(
            &h.anonymous(),
            NewAccountInput {
                name: "Mike".to_string(),
                email: "mike@example.com".to_string(),
                password: SecretString::from("1234567"),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Password must be at least 8 characters");

    // 거부된 계정은 저장되지 않아야 함
    let all = h
        .store
        .list_users(Default::default())
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_duplicate_email_propagates_store_message() {
    let h = TestHarness::new();
    h.signup("Mike", "mike@example.com", "mike1234").await;

    let err = h
        .ops
        .create_account(
            &h.anonymous(),
            NewAccountInput {
                name: "Impostor".to_string(),
                email: "mike@example.com".to_string(),
                password: SecretString::from("something"),
            },
        )
        .await
        .unwrap_err();

    // 스토어 메시지가 가공 없이 그대로 노출되어야 함
    assert!(matches!(
        err,
        AccountError::Store(StoreError::UniqueViolation(_))
    ));
    assert!(err.to_string().contains("mike@example.com"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let h = TestHarness::new();
    h.signup("Mike", "mike@example.com", "mike1234").await;

    let wrong_password = h
        .ops
        .login(
            &h.anonymous(),
            LoginInput {
                email: "mike@example.com".to_string(),
                password: SecretString::from("wrong-password"),
            },
        )
        .await
        .unwrap_err();

    let unknown_email = h
        .ops
        .login(
            &h.anonymous(),
            LoginInput {
                email: "ghost@example.com".to_string(),
                password: SecretString::from("mike1234"),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(wrong_password.to_string(), "Unable to login");
    assert_eq!(unknown_email.to_string(), "Unable to login");
}

#[tokio::test]
async fn test_email_visible_only_to_owner() {
    let h = TestHarness::new();
    let (mike, _) = h.signup("Mike", "mike@example.com", "mike1234").await;
    let (jess, _) = h.signup("Jess", "jess@example.com", "jess5678").await;

    // 미인증 호출: 모든 이메일이 가려짐
    let listed = h
        .ops
        .list_users(&h.anonymous(), ListUsersArgs::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|u| u.email.is_none()));

    // Mike로 인증된 호출: Mike의 이메일만 보임
    let listed = h
        .ops
        .list_users(&h.as_user(mike), ListUsersArgs::default())
        .await
        .unwrap();
    for user in &listed {
        if user.id == mike {
            assert_eq!(user.email.as_deref(), Some("mike@example.com"));
        } else {
            assert_eq!(user.id, jess);
            assert!(user.email.is_none());
        }
    }
}

#[tokio::test]
async fn test_protected_operations_require_identity() {
    let h = TestHarness::new();
    h.signup("Mike", "mike@example.com", "mike1234").await;
    let ctx = h.anonymous();

    for err in [
        h.ops.current_profile(&ctx).await.unwrap_err(),
        h.ops.delete_account(&ctx).await.unwrap_err(),
        h.ops
            .update_account(&ctx, AccountUpdate::default())
            .await
            .unwrap_err(),
    ] {
        assert!(matches!(err, AccountError::AuthenticationRequired));
        assert_eq!(err.to_string(), "Authentication required");
    }
}

#[tokio::test]
async fn test_full_lifecycle_with_header_extraction() {
    let h = TestHarness::new();
    let (id, token) = h.signup("Mike", "mike@example.com", "mike1234").await;

    // 헤더에서 신원을 추출해 컨텍스트 구성
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
    let identity = extract_identity(CredentialCarrier::Request(&headers), &h.tokens);
    assert_eq!(identity, Some(id));

    let ctx = CallContext::new(h.store.clone(), identity);

    // 본인 프로필에서는 이메일이 보임
    let me = h.ops.current_profile(&ctx).await.unwrap();
    assert_eq!(me.id, id);
    assert_eq!(me.email.as_deref(), Some("mike@example.com"));

    // 이름 수정
    let updated = h
        .ops
        .update_account(
            &ctx,
            AccountUpdate {
                name: Some("Michael".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Michael");
}

#[tokio::test]
async fn test_deleted_account_cannot_login_again() {
    let h = TestHarness::new();
    let (id, _) = h.signup("Mike", "mike@example.com", "mike1234").await;

    h.ops.delete_account(&h.as_user(id)).await.unwrap();

    let err = h
        .ops
        .login(
            &h.anonymous(),
            LoginInput {
                email: "mike@example.com".to_string(),
                password: SecretString::from("mike1234"),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::AuthenticationFailed));
}

#[tokio::test]
async fn test_stale_token_fails_at_data_access() {
    let h = TestHarness::new();
    let (id, token) = h.signup("Mike", "mike@example.com", "mike1234").await;

    h.ops.delete_account(&h.as_user(id)).await.unwrap();

    // 토큰 자체는 여전히 유효함 (무상태, 철회 불가)
    let identity = {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
        extract_identity(CredentialCarrier::Request(&headers), &h.tokens)
    };
    assert_eq!(identity, Some(id));

    // 계정이 없으므로 데이터 접근 단계에서 실패
    let ctx = CallContext::new(h.store.clone(), identity);
    let err = h.ops.current_profile(&ctx).await.unwrap_err();
    assert!(matches!(err, AccountError::Store(StoreError::NotFound)));
}

#[tokio::test]
async fn test_changed_email_visible_after_update() {
    let h = TestHarness::new();
    let (id, _) = h.signup("Mike", "mike@example.com", "mike1234").await;
    let ctx = h.as_user(id);

    h.ops
        .update_account(
            &ctx,
            AccountUpdate {
                email: Some("michael@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // 이전 이메일로는 더 이상 로그인 불가
    let err = h
        .ops
        .login(
            &h.anonymous(),
            LoginInput {
                email: "mike@example.com".to_string(),
                password: SecretString::from("mike1234"),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::AuthenticationFailed));

    // 새 이메일로는 로그인 가능
    let payload = h
        .ops
        .login(
            &h.anonymous(),
            LoginInput {
                email: "michael@example.com".to_string(),
                password: SecretString::from("mike1234"),
            },
        )
        .await
        .unwrap();
    assert_eq!(payload.user.id, id);
}
