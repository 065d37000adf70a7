//! Postgres 사용자 스토어.
//!
//! 기대하는 스키마:
//!
//! ```sql
//! CREATE TABLE users (
//!     id            UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     name          TEXT NOT NULL,
//!     email         TEXT NOT NULL UNIQUE,
//!     password_hash TEXT NOT NULL,
//!     created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! 종속 테이블(게시물, 댓글 등)은 `ON DELETE CASCADE` 외래 키로 연결되어야
//! 합니다 — 연쇄 삭제는 이 계층이 아니라 스키마의 책임입니다.

use async_trait::async_trait;
use roster_core::{NewUserRecord, StoreError, UserChanges, UserFilter, UserRecord, UserStore};
use sqlx::PgPool;
use uuid::Uuid;

/// Postgres 기반 사용자 스토어.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// 커넥션 풀로 스토어 생성.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// sqlx 에러를 스토어 에러로 변환.
///
/// 고유 제약 위반은 드라이버 메시지를 가공 없이 담아 상위 계층이 그대로
/// 노출할 수 있게 합니다.
fn map_sqlx_err(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::UniqueViolation(db.message().to_string())
        }
        sqlx::Error::RowNotFound => StoreError::NotFound,
        _ => StoreError::Backend(err.to_string()),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, user: NewUserRecord) -> Result<UserRecord, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<UserRecord, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET name          = COALESCE($2, name),
                email         = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at    = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(StoreError::NotFound)
    }

    async fn delete_user(&self, id: Uuid) -> Result<UserRecord, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            "DELETE FROM users WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(StoreError::NotFound)
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<UserRecord>, StoreError> {
        // 기본 페이지 크기 없음 — 호출자가 지정하지 않으면 전체 반환
        let limit = filter.limit.filter(|l| *l >= 0).unwrap_or(i64::MAX);
        let offset = filter.offset.filter(|o| *o >= 0).unwrap_or(0);

        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT * FROM users
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY created_at
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&filter.name_contains)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)
    }
}
