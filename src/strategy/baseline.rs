//! Prior-art padding strategies used as baselines.
//!
//! Every result is capped at the MTU and never drops below the input.
//!
//! 作为基线的现有填充策略。所有结果都不超过 MTU，且不小于输入。

use super::{PaddingStrategy, StrategyKind};
use crate::error::{Error, Result};
use crate::length::Length;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Clamps a candidate into `[length, mtu]`, letting `length` win if it is
/// already above the MTU.
fn bounded(candidate: u64, length: u32, mtu: u32) -> Length {
    let capped = candidate.min(mtu as u64) as u32;
    Length::new(capped.max(length))
}

/// Pads every length below the MTU up to the MTU.
///
/// 将所有小于 MTU 的长度填充到 MTU。
#[derive(Debug, Clone)]
pub struct PadToMtu {
    mtu: u32,
}

impl PadToMtu {
    pub fn new(mtu: u32) -> Self {
        Self { mtu }
    }
}

impl PaddingStrategy for PadToMtu {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Mtu
    }

    fn pad(&mut self, length: Length) -> Result<Length> {
        Ok(bounded(self.mtu as u64, length.get(), self.mtu))
    }

    fn fork(&mut self) -> Self {
        self.clone()
    }
}

/// Rounds up to the next multiple of a block size.
///
/// 向上取整到块大小的下一个倍数。
#[derive(Debug, Clone)]
pub struct Linear {
    block: u32,
    mtu: u32,
}

impl Linear {
    pub fn new(block: u32, mtu: u32) -> Result<Self> {
        if block == 0 {
            return Err(Error::InvalidConfig("linear block size must be positive".into()));
        }
        Ok(Self { block, mtu })
    }
}

impl PaddingStrategy for Linear {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Linear
    }

    fn pad(&mut self, length: Length) -> Result<Length> {
        let raw = length.get() as u64;
        let block = self.block as u64;
        let padded = bounded(raw.div_ceil(block) * block, length.get(), self.mtu);
        trace!(%length, %padded, block = self.block, "linear padding applied");
        Ok(padded)
    }

    fn fork(&mut self) -> Self {
        self.clone()
    }
}

/// Rounds up to the next power of a base (1, b, b², ...).
///
/// 向上取整到底数的下一个幂（1, b, b², ...）。
#[derive(Debug, Clone)]
pub struct Exponential {
    base: u32,
    mtu: u32,
}

impl Exponential {
    pub fn new(base: u32, mtu: u32) -> Result<Self> {
        if base < 2 {
            return Err(Error::InvalidConfig(format!(
                "exponential base must be at least 2, got {base}"
            )));
        }
        Ok(Self { base, mtu })
    }
}

impl PaddingStrategy for Exponential {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Exponential
    }

    fn pad(&mut self, length: Length) -> Result<Length> {
        let target = length.get() as u64;
        let mut power: u64 = 1;
        while power < target {
            power = power.saturating_mul(self.base as u64);
        }
        let padded = bounded(power, length.get(), self.mtu);
        trace!(%length, %padded, base = self.base, "exponential padding applied");
        Ok(padded)
    }

    fn fork(&mut self) -> Self {
        self.clone()
    }
}

/// Pads small ("mouse") lengths to one target and everything else to the MTU.
///
/// 将小（“老鼠”）长度填充到一个目标值，其余填充到 MTU。
#[derive(Debug, Clone)]
pub struct MouseElephant {
    split: u32,
    target: u32,
    mtu: u32,
}

impl MouseElephant {
    pub fn new(split: u32, target: u32, mtu: u32) -> Result<Self> {
        if target < split {
            return Err(Error::InvalidConfig(format!(
                "mouse target {target} is below the split point {split}"
            )));
        }
        Ok(Self { split, target, mtu })
    }
}

impl PaddingStrategy for MouseElephant {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MouseElephant
    }

    fn pad(&mut self, length: Length) -> Result<Length> {
        let target = if length.get() <= self.split {
            self.target
        } else {
            self.mtu
        };
        Ok(bounded(target as u64, length.get(), self.mtu))
    }

    fn fork(&mut self) -> Self {
        self.clone()
    }
}

/// Adds a random multiple of `step` bytes, from `step` up to `max`.
///
/// 添加随机的 `step` 字节倍数，范围从 `step` 到 `max`。
#[derive(Debug)]
pub struct RandomPadding {
    step: u32,
    max: u32,
    mtu: u32,
    rng: StdRng,
}

impl RandomPadding {
    pub fn new(step: u32, max: u32, mtu: u32, rng: StdRng) -> Result<Self> {
        if step == 0 || max < step {
            return Err(Error::InvalidConfig(format!(
                "random step {step} must be positive and at most {max}"
            )));
        }
        Ok(Self {
            step,
            max,
            mtu,
            rng,
        })
    }
}

impl PaddingStrategy for RandomPadding {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Random
    }

    fn pad(&mut self, length: Length) -> Result<Length> {
        let steps = self.rng.random_range(1..=self.max / self.step);
        let extra = steps as u64 * self.step as u64;
        Ok(bounded(length.get() as u64 + extra, length.get(), self.mtu))
    }

    fn fork(&mut self) -> Self {
        Self {
            step: self.step,
            max: self.max,
            mtu: self.mtu,
            rng: StdRng::from_rng(&mut self.rng),
        }
    }
}

/// Adds a uniformly random number of bytes from `[0, max]` (255 by default).
///
/// 添加 `[0, max]`（默认 255）内均匀随机的字节数。
#[derive(Debug)]
pub struct Random255 {
    max: u32,
    mtu: u32,
    rng: StdRng,
}

impl Random255 {
    pub fn new(max: u32, mtu: u32, rng: StdRng) -> Self {
        Self { max, mtu, rng }
    }
}

impl PaddingStrategy for Random255 {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Random255
    }

    fn pad(&mut self, length: Length) -> Result<Length> {
        let extra = self.rng.random_range(0..=self.max);
        Ok(bounded(
            length.get() as u64 + extra as u64,
            length.get(),
            self.mtu,
        ))
    }

    fn fork(&mut self) -> Self {
        Self {
            max: self.max,
            mtu: self.mtu,
            rng: StdRng::from_rng(&mut self.rng),
        }
    }
}

#[cfg(test)]
mod tests;
