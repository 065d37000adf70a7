//! 계정 유스케이스 조합 계층.
//!
//! 자격증명 해싱, 토큰 서비스, 가드, 외부 스토어를 조합해 이름 있는
//! 연산들(createUser, login, updateUser, deleteUser, me, users)을
//! 제공합니다.

mod users;

pub use users::{
    AccountOperations, AccountUpdate, AuthPayload, ListUsersArgs, LoginInput, NewAccountInput,
};
