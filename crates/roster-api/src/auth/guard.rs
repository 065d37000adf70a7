//! 인증 가드.
//!
//! "연산을 감싼다"는 패턴을 제네릭 래퍼로 표현합니다. 보호된 연산은
//! [`GuardedOperation`]으로 작성하고 [`Guarded`]로 감싸면, 컨텍스트에
//! 신원이 없을 때 내부 연산을 호출하지 않고 즉시 실패합니다.

use async_trait::async_trait;
use roster_core::{AccountError, AccountResult};
use uuid::Uuid;

use crate::context::CallContext;

/// 호출 가능한 연산 능력 인터페이스.
///
/// 전송 계층이 소비하는 유일한 계약입니다: 컨텍스트와 인자를 받아
/// 결과를 돌려줍니다.
#[async_trait]
pub trait Operation<Args>: Send + Sync
where
    Args: Send + 'static,
{
    type Output;

    async fn invoke(&self, ctx: &CallContext, args: Args) -> AccountResult<Self::Output>;
}

/// 검증된 신원을 요구하는 연산.
///
/// 가드를 통과한 뒤에만 호출되며, 해석된 신원을 원래 인자와 함께
/// 전달받습니다.
#[async_trait]
pub trait GuardedOperation<Args>: Send + Sync
where
    Args: Send + 'static,
{
    type Output;

    async fn invoke(
        &self,
        identity: Uuid,
        ctx: &CallContext,
        args: Args,
    ) -> AccountResult<Self::Output>;
}

/// 인증 가드 래퍼.
///
/// 호출 시점에 컨텍스트 신원이 없으면 내부 연산을 실행하지 않고
/// [`AccountError::AuthenticationRequired`]로 실패합니다. 검사 외의
/// 부수효과는 없으며, 연산은 정확히 한 번만 감쌉니다 — 가드를 중첩해도
/// 의미가 더해지지 않습니다.
///
/// 토큰은 무상태이므로 가드 통과가 계정의 현재 존재를 보장하지 않습니다.
/// 계정 존재에 의존하는 연산은 스토어에서 신원을 다시 해석해야 합니다.
#[derive(Debug, Clone)]
pub struct Guarded<Op> {
    inner: Op,
}

impl<Op> Guarded<Op> {
    /// 연산을 가드로 감쌉니다.
    pub fn new(inner: Op) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<Args, Op> Operation<Args> for Guarded<Op>
where
    Args: Send + 'static,
    Op: GuardedOperation<Args>,
{
    type Output = Op::Output;

    async fn invoke(&self, ctx: &CallContext, args: Args) -> AccountResult<Self::Output> {
        let identity = ctx.identity.ok_or(AccountError::AuthenticationRequired)?;
        self.inner.invoke(identity, ctx, args).await
    }
}
