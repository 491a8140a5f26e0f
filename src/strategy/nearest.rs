//! Pads to the nearest breakpoint at or above the observed length.
//! 填充到不小于观测长度的最近断点。

use super::{PaddingStrategy, StrategyKind};
use crate::breakpoints::Breakpoints;
use crate::error::Result;
use crate::length::Length;
use crate::memo::Memo;
use tracing::trace;

/// The nearest-breakpoint strategy.
///
/// Lengths above every breakpoint are left unchanged. The mapping is
/// deterministic, so every answer is memoized.
///
/// 最近断点策略。大于所有断点的长度保持不变。映射是确定性的，因此所有结果都会被缓存。
#[derive(Debug)]
pub struct Nearest {
    breakpoints: Breakpoints,
    memo: Memo,
}

impl Nearest {
    pub fn new(breakpoints: Breakpoints) -> Self {
        Self {
            breakpoints,
            memo: Memo::new(),
        }
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }
}

impl PaddingStrategy for Nearest {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Nearest
    }

    fn pad(&mut self, length: Length) -> Result<Length> {
        if let Some(padded) = self.memo.get(length) {
            return Ok(padded);
        }

        let padded = self
            .breakpoints
            .first_at_or_above(length)
            .unwrap_or(length);
        trace!(%length, %padded, "nearest breakpoint selected");
        Ok(self.memo.remember(length, padded))
    }

    fn fork(&mut self) -> Self {
        Self::new(self.breakpoints.clone())
    }
}
