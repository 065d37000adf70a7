//! 인증 및 인가.
//!
//! # 구성 요소
//!
//! - [`hash_password`] / [`verify_password`]: bcrypt 자격증명 해싱
//! - [`TokenService`]: 시간 제한 신원 토큰 발급/검증
//! - [`CredentialCarrier`] / [`extract_identity`]: 인바운드 호출에서 신원 추출
//! - [`Guarded`]: 보호된 연산 래퍼 (신원 없으면 즉시 실패)
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! let tokens = TokenService::new(&AuthConfig::from_env());
//! let token = tokens.issue(user_id)?;
//! let identity = tokens.verify(&token)?;
//! ```

mod guard;
mod identity;
mod password;
mod token;

pub use guard::{Guarded, GuardedOperation, Operation};
pub use identity::{extract_identity, CredentialCarrier};
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};
