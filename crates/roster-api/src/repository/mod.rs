//! 데이터 영속화 계층.
//!
//! [`roster_core::UserStore`]의 Postgres 구현을 제공합니다. 고유 제약과
//! 연쇄 삭제 같은 정합성 보장은 스키마에 위임합니다.

mod users;

pub use users::PgUserStore;
