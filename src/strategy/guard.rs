//! The MTU guard shared by every registered strategy.
//! 所有已注册策略共用的 MTU 保护层。

use super::{PaddingStrategy, StrategyKind};
use crate::error::{Error, Result};
use crate::length::Length;
use tracing::trace;

/// Wraps a strategy so that lengths at or above the MTU pass through untouched.
///
/// The inner strategy (and its memo) is not consulted for such lengths. For
/// every other length the guard delegates and then checks that the inner
/// strategy did not shrink the length.
///
/// 包装一个策略，使大于等于 MTU 的长度原样通过，不会访问内部策略及其缓存。
/// 对其他长度，保护层委托给内部策略，并检查结果没有变小。
#[derive(Debug)]
pub struct MtuGuard<S> {
    mtu: Length,
    inner: S,
}

impl<S: PaddingStrategy> MtuGuard<S> {
    pub fn new(mtu: u32, inner: S) -> Self {
        Self {
            mtu: Length::new(mtu),
            inner,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: PaddingStrategy> PaddingStrategy for MtuGuard<S> {
    fn kind(&self) -> StrategyKind {
        self.inner.kind()
    }

    fn pad(&mut self, length: Length) -> Result<Length> {
        if length >= self.mtu {
            trace!(%length, mtu = %self.mtu, "at or above MTU, passing through");
            return Ok(length);
        }

        let padded = self.inner.pad(length)?;
        if padded < length {
            return Err(Error::InternalInvariant {
                strategy: self.inner.name(),
                length: length.get(),
            });
        }
        Ok(padded)
    }

    fn fork(&mut self) -> Self {
        Self {
            mtu: self.mtu,
            inner: self.inner.fork(),
        }
    }
}
