//! 도메인 모델.
//!
//! 사용자 레코드와 필드 가시성 규칙을 정의합니다.

mod user;
mod visibility;

pub use user::{NewUserRecord, UserChanges, UserFilter, UserRecord};
pub use visibility::{visible_email, UserView};
