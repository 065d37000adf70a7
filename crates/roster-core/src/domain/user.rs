//! 사용자 레코드 및 쓰기 입력 타입.
//!
//! 평문 비밀번호는 이 모듈의 어떤 타입에도 존재하지 않습니다.
//! 스토어를 향하는 쓰기 타입은 항상 해시만 운반합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 사용자 레코드.
///
/// 외부 스토어가 소유하는 영속 엔티티입니다. 이 크레이트는 읽고 참조만 하며
/// 직접 변경하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// 저장된 비밀번호 해시. 어떤 직렬화 경로로도 노출되지 않습니다.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 새 사용자 생성 입력 (스토어용).
///
/// `password_hash`는 이미 해싱된 값이어야 합니다.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// 사용자 업데이트 입력 (스토어용).
///
/// `None`인 필드는 변경하지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    /// 변경할 필드가 하나도 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

/// 사용자 목록 조회 필터.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// 이름 부분 일치 필터 (대소문자 무시)
    pub name_contains: Option<String>,
    /// 페이지 크기
    pub limit: Option<i64>,
    /// 오프셋
    pub offset: Option<i64>,
}
