//! 사용자 계정 API 라우트.
//!
//! # 엔드포인트
//!
//! - `POST /api/v1/users` - 계정 생성 (공개)
//! - `POST /api/v1/users/login` - 로그인 (공개)
//! - `GET /api/v1/users` - 사용자 목록 (공개, 가시성 적용)
//! - `GET /api/v1/users/me` - 내 프로필 (보호)
//! - `PATCH /api/v1/users/me` - 내 계정 수정 (보호)
//! - `DELETE /api/v1/users/me` - 내 계정 삭제 (보호)

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use roster_core::UserView;

use crate::context::CallContext;
use crate::error::ApiResult;
use crate::operations::{AccountUpdate, AuthPayload, ListUsersArgs, LoginInput, NewAccountInput};
use crate::state::AppState;

/// 사용자 목록 응답.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    /// 사용자 목록 (호출자 기준 가시성 적용됨)
    pub users: Vec<UserView>,
    /// 반환된 개수
    pub total: usize,
}

/// 사용자 라우터 생성.
pub fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_account).get(list_users))
        .route("/login", post(login))
        .route(
            "/me",
            get(current_profile)
                .patch(update_account)
                .delete(delete_account),
        )
}

/// 계정 생성.
/// POST /api/v1/users
async fn create_account(
    State(state): State<AppState>,
    ctx: CallContext,
    Json(input): Json<NewAccountInput>,
) -> ApiResult<(StatusCode, Json<AuthPayload>)> {
    let payload = state.operations.create_account(&ctx, input).await?;
    Ok((StatusCode::CREATED, Json(payload)))
}

/// 로그인.
/// POST /api/v1/users/login
async fn login(
    State(state): State<AppState>,
    ctx: CallContext,
    Json(input): Json<LoginInput>,
) -> ApiResult<Json<AuthPayload>> {
    let payload = state.operations.login(&ctx, input).await?;
    Ok(Json(payload))
}

/// 사용자 목록.
/// GET /api/v1/users?query=&first=&skip=
async fn list_users(
    State(state): State<AppState>,
    ctx: CallContext,
    Query(args): Query<ListUsersArgs>,
) -> ApiResult<Json<UserListResponse>> {
    let users = state.operations.list_users(&ctx, args).await?;
    let total = users.len();
    Ok(Json(UserListResponse { users, total }))
}

/// 내 프로필 조회.
/// GET /api/v1/users/me
async fn current_profile(
    State(state): State<AppState>,
    ctx: CallContext,
) -> ApiResult<Json<UserView>> {
    let view = state.operations.current_profile(&ctx).await?;
    Ok(Json(view))
}

/// 내 계정 수정.
/// PATCH /api/v1/users/me
async fn update_account(
    State(state): State<AppState>,
    ctx: CallContext,
    Json(changes): Json<AccountUpdate>,
) -> ApiResult<Json<UserView>> {
    let view = state.operations.update_account(&ctx, changes).await?;
    Ok(Json(view))
}

/// 내 계정 삭제.
/// DELETE /api/v1/users/me
async fn delete_account(
    State(state): State<AppState>,
    ctx: CallContext,
) -> ApiResult<Json<UserView>> {
    let view = state.operations.delete_account(&ctx).await?;
    tracing::info!(user_id = %view.id, "account removed via API");
    Ok(Json(view))
}
