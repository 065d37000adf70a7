//! 필드 단위 가시성 규칙.
//!
//! 레코드별/필드별 인가 결정을 담당합니다. 규칙은 두 가지뿐입니다:
//! - 이메일: 자기 자신에게만 보입니다. 다른 인증된 사용자에게도 숨깁니다.
//! - 비밀번호 해시: 호출자와 무관하게 어떤 읽기 경로로도 노출되지 않습니다.

use serde::Serialize;
use uuid::Uuid;

use super::user::UserRecord;

/// 이메일 필드 가시성 판정.
///
/// 호출자 신원이 존재하고 레코드의 소유자와 일치할 때만 이메일을 반환합니다.
/// 그 외 모든 호출자(미인증 포함, 다른 인증 사용자 포함)는 `None`을 받습니다.
pub fn visible_email(record: &UserRecord, caller: Option<Uuid>) -> Option<&str> {
    match caller {
        Some(id) if id == record.id => Some(&record.email),
        _ => None,
    }
}

impl UserRecord {
    /// 비밀번호 필드 접근자.
    ///
    /// 신원과 무관하게 항상 빈 문자열을 반환합니다. 스키마를 통한 우발적
    /// 노출에 대한 방어선이며, 해시 자체는 `password_hash`에만 존재하고
    /// 직렬화에서 제외됩니다.
    pub fn password(&self) -> &'static str {
        ""
    }
}

/// 호출자 기준으로 가시성이 적용된 사용자 표현.
///
/// 외부로 반환되는 유일한 사용자 형태입니다. 해시 필드 자체가 없으므로
/// 실수로도 노출될 수 없습니다.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    /// 소유자 본인에게만 `Some`, 그 외에는 `None`(JSON null)
    pub email: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserView {
    /// 호출자 신원에 맞춰 가시성 규칙을 적용한 표현을 생성합니다.
    pub fn for_caller(record: &UserRecord, caller: Option<Uuid>) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            email: visible_email(record, caller).map(str::to_string),
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: Uuid) -> UserRecord {
        UserRecord {
            id,
            name: "Mike".to_string(),
            email: "mike@example.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_email_visible_to_owner_only() {
        let id = Uuid::new_v4();
        let rec = record(id);

        // 본인
        assert_eq!(visible_email(&rec, Some(id)), Some("mike@example.com"));
        // 다른 인증 사용자
        assert_eq!(visible_email(&rec, Some(Uuid::new_v4())), None);
        // 미인증
        assert_eq!(visible_email(&rec, None), None);
    }

    #[test]
    fn test_password_accessor_always_empty() {
        let rec = record(Uuid::new_v4());
        assert_eq!(rec.password(), "");
    }

    #[test]
    fn test_view_applies_visibility() {
        let id = Uuid::new_v4();
        let rec = record(id);

        let own = UserView::for_caller(&rec, Some(id));
        assert_eq!(own.email.as_deref(), Some("mike@example.com"));

        let other = UserView::for_caller(&rec, Some(Uuid::new_v4()));
        assert_eq!(other.email, None);

        let anonymous = UserView::for_caller(&rec, None);
        assert_eq!(anonymous.email, None);
    }

    #[test]
    fn test_view_serialization_has_no_hash() {
        let rec = record(Uuid::new_v4());
        let view = UserView::for_caller(&rec, None);
        let json = serde_json::to_string(&view).unwrap();

        assert!(json.contains(r#""email":null"#));
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$12$"));
    }
}
