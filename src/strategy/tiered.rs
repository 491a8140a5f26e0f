//! An implementation of the tiered ("Level-K") padding strategies.
//!
//! Lengths below the threshold `K` are padded up to `K`, lengths in the
//! top band are padded up to the MTU, and the two middle bands are padded
//! to at most a fixed ceiling, either by a random draw or by stepping to
//! the next multiple of `K`.
//!
//! 分级（Level-K）填充策略的实现。
//! 低于阈值 `K` 的长度填充到 `K`，最高段填充到 MTU，
//! 中间两段在固定上限内随机填充或按 `K` 的倍数阶梯填充。

use super::{PaddingStrategy, StrategyKind};
use crate::error::{Error, Result};
use crate::length::Length;
use crate::memo::Memo;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Exclusive end of the mid-low band.
/// 中低段的开区间终点。
pub const MID_LOW_END: u32 = 999;
/// Largest value a mid-low draw can produce.
/// 中低段随机结果的最大值。
pub const MID_LOW_CEILING: u32 = 1000;
/// Largest value a mid-high draw can produce, and the start of the high band.
/// 中高段随机结果的最大值，同时也是高段的起点。
pub const MID_HIGH_CEILING: u32 = 1400;

/// How the two middle bands choose their padded length.
///
/// 中间两段选择填充长度的方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MiddleBands {
    /// `length + uniform[1, ceiling - length]`.
    #[default]
    Random,
    /// The next multiple of `K` strictly above `length`, capped at the ceiling.
    /// 严格大于 `length` 的下一个 `K` 的倍数，不超过上限。
    Stepped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Band {
    Low,
    MidLow,
    MidHigh,
    High,
}

/// A Level-K strategy.
///
/// The low and high bands are memoized. The middle bands are never
/// stored: in random mode every call redraws, so repeated lengths are not
/// linkable.
///
/// Level-K 策略。低段和高段会被缓存；中间两段从不缓存，随机模式下每次调用重新抽取。
#[derive(Debug)]
pub struct Tiered {
    threshold: u32,
    mtu: u32,
    middle: MiddleBands,
    memo: Memo,
    rng: StdRng,
}

impl Tiered {
    /// Creates a Level-K strategy for `threshold` under `mtu`.
    ///
    /// The threshold must lie in `1..=999` and the MTU must lie above the
    /// mid-high ceiling, otherwise the bands would overlap or leave gaps.
    ///
    /// 为 `mtu` 下的 `threshold` 创建 Level-K 策略。
    pub fn new(threshold: u32, mtu: u32, middle: MiddleBands, rng: StdRng) -> Result<Self> {
        if !(1..=MID_LOW_END).contains(&threshold) {
            return Err(Error::InvalidConfig(format!(
                "tiered threshold {threshold} must lie in 1..={MID_LOW_END}"
            )));
        }
        if mtu <= MID_HIGH_CEILING {
            return Err(Error::InvalidConfig(format!(
                "tiered strategies need an MTU above {MID_HIGH_CEILING}, got {mtu}"
            )));
        }
        Ok(Self {
            threshold,
            mtu,
            middle,
            memo: Memo::new(),
            rng,
        })
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    pub(crate) fn band(&self, length: u32) -> Option<Band> {
        if length < self.threshold {
            Some(Band::Low)
        } else if length < MID_LOW_END {
            Some(Band::MidLow)
        } else if length < MID_HIGH_CEILING {
            Some(Band::MidHigh)
        } else if length < self.mtu {
            Some(Band::High)
        } else {
            None
        }
    }

    /// Pads a middle-band `length` to a value in `(length, ceiling]`.
    fn pad_middle(&mut self, length: u32, ceiling: u32) -> Length {
        match self.middle {
            MiddleBands::Random => {
                let extra = self.rng.random_range(1..=ceiling - length);
                Length::new(length + extra)
            }
            MiddleBands::Stepped => {
                let next = (length / self.threshold + 1) * self.threshold;
                Length::new(next.min(ceiling))
            }
        }
    }
}

impl PaddingStrategy for Tiered {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Level(self.threshold)
    }

    fn pad(&mut self, length: Length) -> Result<Length> {
        if let Some(padded) = self.memo.get(length) {
            return Ok(padded);
        }

        let raw = length.get();
        let band = self.band(raw).ok_or_else(|| Error::InternalInvariant {
            strategy: self.name(),
            length: raw,
        })?;

        let padded = match band {
            Band::Low => self.memo.remember(length, Length::new(self.threshold)),
            Band::MidLow => self.pad_middle(raw, MID_LOW_CEILING),
            Band::MidHigh => self.pad_middle(raw, MID_HIGH_CEILING),
            Band::High => self.memo.remember(length, Length::new(self.mtu)),
        };
        trace!(
            strategy = %self.kind(),
            %length,
            %padded,
            ?band,
            "tiered padding applied"
        );
        Ok(padded)
    }

    fn fork(&mut self) -> Self {
        Self {
            threshold: self.threshold,
            mtu: self.mtu,
            middle: self.middle,
            memo: Memo::new(),
            rng: StdRng::from_rng(&mut self.rng),
        }
    }
}
