//! 외부 데이터 스토어 추상화.
//!
//! 사용자 레코드의 영속화는 외부 스토어의 책임입니다. 이 모듈은 스토어
//! 중립적인 인터페이스를 제공하며, 종속 레코드의 연쇄 삭제 같은 정합성
//! 보장도 스토어 구현에 위임합니다.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{NewUserRecord, UserChanges, UserFilter, UserRecord};

// =============================================================================
// 에러 타입
// =============================================================================

/// 스토어 에러.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 고유 제약 위반 (예: 중복 이메일).
    ///
    /// 스토어가 제공한 메시지를 가공 없이 담습니다. 이 계층에서
    /// 재해석하지 않습니다.
    #[error("{0}")]
    UniqueViolation(String),

    /// 레코드 없음
    #[error("Record not found")]
    NotFound,

    /// 스토어 백엔드 에러 (연결 실패 등)
    #[error("Store error: {0}")]
    Backend(String),
}

// =============================================================================
// UserStore Trait
// =============================================================================

/// 사용자 스토어 trait.
///
/// 스토어별로 이 trait를 구현하여 스토어 중립적인 계정 연산을 작성할 수
/// 있습니다. 이메일 고유 제약 검사는 스토어에서 원자적으로 수행되어야
/// 합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 사용자 생성.
    ///
    /// # Errors
    ///
    /// - `StoreError::UniqueViolation`: 이메일 중복
    /// - `StoreError::Backend`: 백엔드 장애
    async fn create_user(&self, user: NewUserRecord) -> Result<UserRecord, StoreError>;

    /// 이메일로 사용자 조회. 없으면 `None`.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// ID로 사용자 조회. 없으면 `None`.
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// 사용자 업데이트.
    ///
    /// `None`인 필드는 변경하지 않습니다.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound`: 대상 없음
    /// - `StoreError::UniqueViolation`: 변경된 이메일이 중복
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<UserRecord, StoreError>;

    /// 사용자 삭제. 삭제된 레코드를 반환합니다.
    ///
    /// 종속 레코드(게시물, 댓글 등)의 연쇄 삭제는 스토어의 책임입니다.
    async fn delete_user(&self, id: Uuid) -> Result<UserRecord, StoreError>;

    /// 사용자 목록 조회.
    async fn list_users(&self, filter: UserFilter) -> Result<Vec<UserRecord>, StoreError>;

    /// 존재 여부 확인 (테스트 하니스 지원용).
    async fn exists(&self, id: Uuid) -> Result<bool, StoreError>;
}

// =============================================================================
// MemoryUserStore (테스트용)
// =============================================================================

/// 인메모리 사용자 스토어.
///
/// 실제 DB 연결 없이 계정 연산을 테스트하기 위한 구현입니다.
/// 프로덕션 경로에서는 사용되지 않습니다.
#[cfg(any(test, feature = "test-utils"))]
pub struct MemoryUserStore {
    users: std::sync::Mutex<std::collections::HashMap<Uuid, UserRecord>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MemoryUserStore {
    /// 빈 스토어 생성.
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    fn unique_violation(email: &str) -> StoreError {
        // 실제 스토어가 내는 메시지를 흉내냄 — 이 메시지가 그대로 전파되어야 함
        StoreError::UniqueViolation(format!(
            "A unique constraint would be violated on User. Field: email ({email})"
        ))
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, user: NewUserRecord) -> Result<UserRecord, StoreError> {
        let mut users = self.users.lock().expect("store lock poisoned");

        if users.values().any(|u| u.email == user.email) {
            return Err(Self::unique_violation(&user.email));
        }

        let now = chrono::Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.lock().expect("store lock poisoned");
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.lock().expect("store lock poisoned");
        Ok(users.get(&id).cloned())
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> Result<UserRecord, StoreError> {
        let mut users = self.users.lock().expect("store lock poisoned");

        if let Some(ref new_email) = changes.email {
            if users.values().any(|u| u.id != id && &u.email == new_email) {
                return Err(Self::unique_violation(new_email));
            }
        }

        let record = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(name) = changes.name {
            record.name = name;
        }
        if let Some(email) = changes.email {
            record.email = email;
        }
        if let Some(hash) = changes.password_hash {
            record.password_hash = hash;
        }
        record.updated_at = chrono::Utc::now();
        Ok(record.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<UserRecord, StoreError> {
        let mut users = self.users.lock().expect("store lock poisoned");
        users.remove(&id).ok_or(StoreError::NotFound)
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<UserRecord>, StoreError> {
        let users = self.users.lock().expect("store lock poisoned");

        let mut records: Vec<UserRecord> = users
            .values()
            .filter(|u| match &filter.name_contains {
                Some(q) => u.name.to_lowercase().contains(&q.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();
        records.sort_by_key(|u| u.created_at);

        let offset = filter.offset.unwrap_or(0).max(0) as usize;
        let records: Vec<UserRecord> = records.into_iter().skip(offset).collect();
        let records = match filter.limit {
            Some(limit) if limit >= 0 => records.into_iter().take(limit as usize).collect(),
            _ => records,
        };
        Ok(records)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        let users = self.users.lock().expect("store lock poisoned");
        Ok(users.contains_key(&id))
    }
}
