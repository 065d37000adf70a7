//! 계정 연산.
//!
//! 공개 흐름(생성, 로그인, 목록)은 무조건 실행되고, 보호 흐름(수정, 삭제,
//! 내 프로필)은 [`Guarded`]를 통과해야 실행됩니다. 비밀번호 해싱은 CPU
//! 바운드이므로 블로킹 풀로 오프로드합니다.

use async_trait::async_trait;
use roster_core::{
    AccountError, AccountResult, NewUserRecord, StoreError, UserChanges, UserFilter, UserView,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{hash_password, verify_password, Guarded, GuardedOperation, Operation, TokenService};
use crate::context::CallContext;

// ==================== 입력/출력 타입 ====================

/// 계정 생성 입력.
///
/// 평문 비밀번호는 `SecretString`으로 운반되어 Debug 출력에서 가려집니다.
#[derive(Debug, Deserialize, Validate)]
pub struct NewAccountInput {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: SecretString,
}

/// 로그인 입력.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: SecretString,
}

/// 계정 수정 입력.
///
/// `None`인 필드는 변경하지 않습니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AccountUpdate {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

/// 사용자 목록 조회 인자.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersArgs {
    /// 이름 부분 일치 필터
    pub query: Option<String>,
    /// 페이지 크기
    pub first: Option<i64>,
    /// 건너뛸 레코드 수
    pub skip: Option<i64>,
}

/// 계정 생성/로그인 결과.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: UserView,
    pub token: String,
}

fn validation_error(errors: validator::ValidationErrors) -> AccountError {
    AccountError::Validation(errors.to_string().replace('\n', "; "))
}

fn join_error(err: tokio::task::JoinError) -> AccountError {
    AccountError::Internal(format!("Hashing task failed: {err}"))
}

// ==================== 공개 연산 ====================

/// createUser — 해싱, 영속화, 토큰 발급.
struct CreateAccount {
    hash_cost: u32,
    tokens: TokenService,
}

#[async_trait]
impl Operation<NewAccountInput> for CreateAccount {
    type Output = AuthPayload;

    async fn invoke(&self, ctx: &CallContext, input: NewAccountInput) -> AccountResult<AuthPayload> {
        input.validate().map_err(validation_error)?;

        let NewAccountInput {
            name,
            email,
            password,
        } = input;

        let cost = self.hash_cost;
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(password.expose_secret(), cost))
                .await
                .map_err(join_error)??;

        // 이메일 고유 제약 위반은 스토어 에러 그대로 전파
        let record = ctx
            .store
            .create_user(NewUserRecord {
                name,
                email,
                password_hash,
            })
            .await?;

        let token = self.tokens.issue(record.id)?;
        tracing::info!(user_id = %record.id, "account created");

        // 응답 뷰는 호출 시점의 신원 기준 — 미인증 생성 호출에는 이메일이
        // 보이지 않음 (새 토큰은 이번 응답의 가시성에 관여하지 않음)
        Ok(AuthPayload {
            user: UserView::for_caller(&record, ctx.identity),
            token,
        })
    }
}

/// login — 조회, 검증, 새 토큰 발급.
struct Login {
    tokens: TokenService,
}

#[async_trait]
impl Operation<LoginInput> for Login {
    type Output = AuthPayload;

    async fn invoke(&self, ctx: &CallContext, input: LoginInput) -> AccountResult<AuthPayload> {
        // 존재하지 않는 이메일과 잘못된 비밀번호는 같은 실패로 수렴
        let user = ctx
            .store
            .get_user_by_email(&input.email)
            .await?
            .ok_or(AccountError::AuthenticationFailed)?;

        let password = input.password;
        let stored_hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(password.expose_secret(), &stored_hash))
                .await
                .map_err(join_error)?;

        if !matches {
            return Err(AccountError::AuthenticationFailed);
        }

        // 로그인마다 독립적인 새 토큰 발급 — 이전 토큰 재사용/연장 없음
        let token = self.tokens.issue(user.id)?;
        tracing::debug!(user_id = %user.id, "login succeeded");

        // 가시성은 이번 호출의 신원으로 판정 — 보통 미인증 호출이므로
        // 이메일은 가려짐
        Ok(AuthPayload {
            user: UserView::for_caller(&user, ctx.identity),
            token,
        })
    }
}

/// users — 공개 디렉터리 조회, 반환 레코드별 가시성 적용.
struct ListUsers;

#[async_trait]
impl Operation<ListUsersArgs> for ListUsers {
    type Output = Vec<UserView>;

    async fn invoke(&self, ctx: &CallContext, args: ListUsersArgs) -> AccountResult<Vec<UserView>> {
        let records = ctx
            .store
            .list_users(UserFilter {
                name_contains: args.query,
                limit: args.first,
                offset: args.skip,
            })
            .await?;

        Ok(records
            .iter()
            .map(|r| UserView::for_caller(r, ctx.identity))
            .collect())
    }
}

// ==================== 보호 연산 ====================

/// updateUser — 새 평문 비밀번호가 오면 재해싱 후 영속화.
struct UpdateAccount {
    hash_cost: u32,
}

#[async_trait]
impl GuardedOperation<AccountUpdate> for UpdateAccount {
    type Output = UserView;

    async fn invoke(
        &self,
        identity: Uuid,
        ctx: &CallContext,
        changes: AccountUpdate,
    ) -> AccountResult<UserView> {
        changes.validate().map_err(validation_error)?;

        let password_hash = match changes.password {
            Some(password) => {
                let cost = self.hash_cost;
                let hash = tokio::task::spawn_blocking(move || {
                    hash_password(password.expose_secret(), cost)
                })
                .await
                .map_err(join_error)??;
                Some(hash)
            }
            None => None,
        };

        let record = ctx
            .store
            .update_user(
                identity,
                UserChanges {
                    name: changes.name,
                    email: changes.email,
                    password_hash,
                },
            )
            .await?;

        Ok(UserView::for_caller(&record, Some(identity)))
    }
}

/// deleteUser — 본인 계정 삭제. 종속 레코드의 연쇄 삭제는 스토어 책임.
struct DeleteAccount;

#[async_trait]
impl GuardedOperation<()> for DeleteAccount {
    type Output = UserView;

    async fn invoke(&self, identity: Uuid, ctx: &CallContext, _args: ()) -> AccountResult<UserView> {
        let record = ctx.store.delete_user(identity).await?;
        tracing::info!(user_id = %identity, "account deleted");
        Ok(UserView::for_caller(&record, Some(identity)))
    }
}

/// me — 신원으로 프로필 조회.
///
/// 토큰 페이로드를 신뢰하지 않고 라이브 스토어에서 다시 해석합니다.
/// 삭제된 계정의 아직 유효한 토큰은 여기서 `NotFound`로 실패합니다 —
/// 토큰 계층이 아니라 데이터 접근 단계의 실패입니다.
struct CurrentProfile;

#[async_trait]
impl GuardedOperation<()> for CurrentProfile {
    type Output = UserView;

    async fn invoke(&self, identity: Uuid, ctx: &CallContext, _args: ()) -> AccountResult<UserView> {
        let record = ctx
            .store
            .get_user_by_id(identity)
            .await?
            .ok_or(StoreError::NotFound)?;

        Ok(UserView::for_caller(&record, Some(identity)))
    }
}

// ==================== 조합 계층 ====================

/// 계정 연산 묶음.
///
/// 시작 시 한 번 구성되어 모든 호출이 공유합니다. 내부 상태는 읽기
/// 전용(토큰 키, 해싱 계수)입니다.
pub struct AccountOperations {
    create: CreateAccount,
    login: Login,
    users: ListUsers,
    update: Guarded<UpdateAccount>,
    delete: Guarded<DeleteAccount>,
    me: Guarded<CurrentProfile>,
}

impl AccountOperations {
    /// 토큰 서비스와 해싱 계수로 연산 묶음 생성.
    pub fn new(tokens: TokenService, hash_cost: u32) -> Self {
        Self {
            create: CreateAccount {
                hash_cost,
                tokens: tokens.clone(),
            },
            login: Login { tokens },
            users: ListUsers,
            update: Guarded::new(UpdateAccount { hash_cost }),
            delete: Guarded::new(DeleteAccount),
            me: Guarded::new(CurrentProfile),
        }
    }

    /// 계정 생성 (공개).
    pub async fn create_account(
        &self,
        ctx: &CallContext,
        input: NewAccountInput,
    ) -> AccountResult<AuthPayload> {
        self.create.invoke(ctx, input).await
    }

    /// 로그인 (공개).
    pub async fn login(&self, ctx: &CallContext, input: LoginInput) -> AccountResult<AuthPayload> {
        self.login.invoke(ctx, input).await
    }

    /// 사용자 목록 (공개, 가시성 적용).
    pub async fn list_users(
        &self,
        ctx: &CallContext,
        args: ListUsersArgs,
    ) -> AccountResult<Vec<UserView>> {
        self.users.invoke(ctx, args).await
    }

    /// 계정 수정 (보호).
    pub async fn update_account(
        &self,
        ctx: &CallContext,
        changes: AccountUpdate,
    ) -> AccountResult<UserView> {
        self.update.invoke(ctx, changes).await
    }

    /// 계정 삭제 (보호).
    pub async fn delete_account(&self, ctx: &CallContext) -> AccountResult<UserView> {
        self.delete.invoke(ctx, ()).await
    }

    /// 내 프로필 (보호).
    pub async fn current_profile(&self, ctx: &CallContext) -> AccountResult<UserView> {
        self.me.invoke(ctx, ()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{AuthConfig, MemoryUserStore, UserStore};
    use std::sync::Arc;

    fn test_ops() -> (AccountOperations, Arc<MemoryUserStore>, TokenService) {
        let config = AuthConfig {
            hash_cost: 4, // 테스트 지연 최소화
            ..Default::default()
        };
        let tokens = TokenService::new(&config);
        let ops = AccountOperations::new(tokens.clone(), config.hash_cost);
        (ops, Arc::new(MemoryUserStore::new()), tokens)
    }

    fn mike_input() -> NewAccountInput {
        NewAccountInput {
            name: "Mike".to_string(),
            email: "mike@example.com".to_string(),
            password: SecretString::from("mike1234"),
        }
    }

    #[tokio::test]
    async fn test_create_account_issues_verifiable_token() {
        let (ops, store, tokens) = test_ops();
        let ctx = CallContext::anonymous(store.clone());

        let payload = ops.create_account(&ctx, mike_input()).await.unwrap();

        // 토큰은 새 사용자 id로 검증되어야 함
        let verified = tokens.verify(&payload.token).unwrap();
        assert_eq!(verified, payload.user.id);

        // 저장된 비밀번호는 평문이 아니어야 함
        let stored = store
            .get_user_by_id(payload.user.id)
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "mike1234");
        assert!(verify_password("mike1234", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_create_account_rejects_short_password() {
        let (ops, store, _) = test_ops();
        let ctx = CallContext::anonymous(store);

        let err = ops
            .create_account(
                &ctx,
                NewAccountInput {
                    name: "Mike".to_string(),
                    email: "mike@example.com".to_string(),
                    password: SecretString::from("short"),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_account_rejects_invalid_email() {
        let (ops, store, _) = test_ops();
        let ctx = CallContext::anonymous(store);

        let err = ops
            .create_account(
                &ctx,
                NewAccountInput {
                    name: "Mike".to_string(),
                    email: "not-an-email".to_string(),
                    password: SecretString::from("mike1234"),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_and_login_views_hide_email_from_anonymous_caller() {
        let (ops, store, _) = test_ops();
        let ctx = CallContext::anonymous(store.clone());

        // 미인증 생성 호출: 응답 뷰는 호출자(익명) 기준이므로 이메일 가려짐
        let created = ops.create_account(&ctx, mike_input()).await.unwrap();
        assert!(created.user.email.is_none());

        // 미인증 로그인 호출도 동일
        let logged_in = ops
            .login(
                &ctx,
                LoginInput {
                    email: "mike@example.com".to_string(),
                    password: SecretString::from("mike1234"),
                },
            )
            .await
            .unwrap();
        assert!(logged_in.user.email.is_none());

        // 본인으로 인증된 호출에서 로그인하면 본인 이메일은 보임
        let authed = CallContext::authenticated(store, created.user.id);
        let as_self = ops
            .login(
                &authed,
                LoginInput {
                    email: "mike@example.com".to_string(),
                    password: SecretString::from("mike1234"),
                },
            )
            .await
            .unwrap();
        assert_eq!(as_self.user.email.as_deref(), Some("mike@example.com"));
    }

    #[tokio::test]
    async fn test_login_failure_does_not_enumerate_accounts() {
        let (ops, store, _) = test_ops();
        let ctx = CallContext::anonymous(store);
        ops.create_account(&ctx, mike_input()).await.unwrap();

        // 존재하는 이메일 + 잘못된 비밀번호
        let wrong_password = ops
            .login(
                &ctx,
                LoginInput {
                    email: "mike@example.com".to_string(),
                    password: SecretString::from("invalid-pw"),
                },
            )
            .await
            .unwrap_err();

        // 존재하지 않는 이메일
        let unknown_email = ops
            .login(
                &ctx,
                LoginInput {
                    email: "nobody@example.com".to_string(),
                    password: SecretString::from("mike1234"),
                },
            )
            .await
            .unwrap_err();

        // 두 실패가 동일한 메시지를 공유해야 함
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(wrong_password.to_string(), "Unable to login");
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let (ops, store, _) = test_ops();
        let ctx = CallContext::anonymous(store.clone());
        let created = ops.create_account(&ctx, mike_input()).await.unwrap();

        let authed = CallContext::authenticated(store.clone(), created.user.id);
        ops.update_account(
            &authed,
            AccountUpdate {
                password: Some(SecretString::from("newpass99")),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let stored = store
            .get_user_by_id(created.user.id)
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "newpass99");
        assert!(verify_password("newpass99", &stored.password_hash));
        assert!(!verify_password("mike1234", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_guarded_operations_fail_closed() {
        let (ops, store, _) = test_ops();
        let ctx = CallContext::anonymous(store);

        let err = ops.current_profile(&ctx).await.unwrap_err();
        assert!(matches!(err, AccountError::AuthenticationRequired));

        let err = ops.delete_account(&ctx).await.unwrap_err();
        assert!(matches!(err, AccountError::AuthenticationRequired));

        let err = ops
            .update_account(&ctx, AccountUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::AuthenticationRequired));
    }

    #[tokio::test]
    async fn test_stale_identity_fails_at_data_access() {
        let (ops, store, _) = test_ops();
        let ctx = CallContext::anonymous(store.clone());
        let created = ops.create_account(&ctx, mike_input()).await.unwrap();

        let authed = CallContext::authenticated(store.clone(), created.user.id);
        ops.delete_account(&authed).await.unwrap();

        // 신원은 여전히 (토큰 관점에서) 유효하지만 계정이 없음 —
        // 토큰 계층이 아니라 데이터 접근 단계에서 실패해야 함
        let err = ops.current_profile(&authed).await.unwrap_err();
        assert!(matches!(
            err,
            AccountError::Store(StoreError::NotFound)
        ));
    }
}
