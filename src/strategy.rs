//! Defines the padding strategy contract and the closed set of strategies.
//! 定义了填充策略契约以及封闭的策略集合。

use crate::error::{Error, Result};
use crate::length::Length;
use crate::memo::Memo;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::str::FromStr;

pub mod baseline;
pub mod guard;
pub mod nearest;
pub mod tiered;

use baseline::{Exponential, Linear, MouseElephant, PadToMtu, Random255, RandomPadding};
use guard::MtuGuard;
use nearest::Nearest;
use tiered::Tiered;

/// A trait for algorithms that map an observed length to a padded length.
///
/// Implementations must return a value `>=` their input. Lengths at or
/// above the MTU are handled by [`MtuGuard`], not by each implementation.
///
/// 将观测长度映射为填充长度的算法 trait。
/// 实现必须返回不小于输入的值。大于等于 MTU 的长度由 [`MtuGuard`] 统一处理。
pub trait PaddingStrategy: Send + 'static {
    /// The stable identity of the strategy, used as registry key and output label.
    ///
    /// 策略的稳定标识，用作注册表键和输出标签。
    fn kind(&self) -> StrategyKind;

    /// Returns the padded length for `length`. May update the strategy's memo.
    ///
    /// 返回 `length` 的填充长度。可能会更新策略的缓存。
    fn pad(&mut self, length: Length) -> Result<Length>;

    /// Creates an independent instance with the same parameters, an empty
    /// memo and an RNG seeded from this instance's stream.
    ///
    /// 创建一个参数相同、缓存为空、随机数生成器由本实例派生的独立实例。
    fn fork(&mut self) -> Self
    where
        Self: Sized;

    /// The human-readable name, e.g. `level900`.
    /// 可读名称，例如 `level900`。
    fn name(&self) -> String {
        self.kind().to_string()
    }

    /// Pads a signed length as read from an untyped source. Negative values
    /// and values wider than 32 bits are rejected with `InvalidInput`.
    ///
    /// 填充来自无类型数据源的有符号长度。负值和超过 32 位的值返回 `InvalidInput`。
    fn pad_raw(&mut self, raw: i64) -> Result<Length> {
        let length = Length::try_from(raw)?;
        self.pad(length)
    }
}

/// The closed set of strategy identities.
///
/// 封闭的策略标识集合。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyKind {
    Mtu,
    Linear,
    Exponential,
    MouseElephant,
    Random,
    Random255,
    /// A tiered strategy keyed by its low-band threshold.
    /// 以低段阈值为键的分级策略。
    Level(u32),
    Nearest,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Mtu => f.write_str("mtu"),
            StrategyKind::Linear => f.write_str("linear"),
            StrategyKind::Exponential => f.write_str("exponential"),
            StrategyKind::MouseElephant => f.write_str("mouse_elephant"),
            StrategyKind::Random => f.write_str("random"),
            StrategyKind::Random255 => f.write_str("random255"),
            StrategyKind::Level(threshold) => write!(f, "level{threshold}"),
            StrategyKind::Nearest => f.write_str("near"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        let kind = match name {
            "mtu" => StrategyKind::Mtu,
            "linear" => StrategyKind::Linear,
            "exponential" => StrategyKind::Exponential,
            "mouse_elephant" => StrategyKind::MouseElephant,
            "random" => StrategyKind::Random,
            "random255" => StrategyKind::Random255,
            "near" => StrategyKind::Nearest,
            _ => {
                // Only the canonical spelling is accepted, so `level0100` is
                // not an alias of `level100`.
                let kind = name
                    .strip_prefix("level")
                    .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                    .and_then(|digits| digits.parse().ok())
                    .map(StrategyKind::Level)
                    .filter(|kind| kind.to_string() == name);
                kind.ok_or_else(|| Error::UnknownStrategy(name.to_string()))?
            }
        };
        Ok(kind)
    }
}

/// A ready-to-use, MTU-guarded strategy of any kind.
///
/// 任意类型的、已加 MTU 保护的可用策略。
#[derive(Debug)]
pub enum Strategy {
    Mtu(MtuGuard<PadToMtu>),
    Linear(MtuGuard<Linear>),
    Exponential(MtuGuard<Exponential>),
    MouseElephant(MtuGuard<MouseElephant>),
    Random(MtuGuard<RandomPadding>),
    Random255(MtuGuard<Random255>),
    Tiered(MtuGuard<Tiered>),
    Nearest(MtuGuard<Nearest>),
}

impl Strategy {
    /// The memo of strategies that cache, `None` for the stateless baselines.
    ///
    /// 有缓存的策略返回其缓存，无状态的基线策略返回 `None`。
    pub fn memo(&self) -> Option<&Memo> {
        match self {
            Strategy::Tiered(s) => Some(s.inner().memo()),
            Strategy::Nearest(s) => Some(s.inner().memo()),
            _ => None,
        }
    }
}

impl PaddingStrategy for Strategy {
    fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Mtu(s) => s.kind(),
            Strategy::Linear(s) => s.kind(),
            Strategy::Exponential(s) => s.kind(),
            Strategy::MouseElephant(s) => s.kind(),
            Strategy::Random(s) => s.kind(),
            Strategy::Random255(s) => s.kind(),
            Strategy::Tiered(s) => s.kind(),
            Strategy::Nearest(s) => s.kind(),
        }
    }

    fn pad(&mut self, length: Length) -> Result<Length> {
        match self {
            Strategy::Mtu(s) => s.pad(length),
            Strategy::Linear(s) => s.pad(length),
            Strategy::Exponential(s) => s.pad(length),
            Strategy::MouseElephant(s) => s.pad(length),
            Strategy::Random(s) => s.pad(length),
            Strategy::Random255(s) => s.pad(length),
            Strategy::Tiered(s) => s.pad(length),
            Strategy::Nearest(s) => s.pad(length),
        }
    }

    fn fork(&mut self) -> Self {
        match self {
            Strategy::Mtu(s) => Strategy::Mtu(s.fork()),
            Strategy::Linear(s) => Strategy::Linear(s.fork()),
            Strategy::Exponential(s) => Strategy::Exponential(s.fork()),
            Strategy::MouseElephant(s) => Strategy::MouseElephant(s.fork()),
            Strategy::Random(s) => Strategy::Random(s.fork()),
            Strategy::Random255(s) => Strategy::Random255(s.fork()),
            Strategy::Tiered(s) => Strategy::Tiered(s.fork()),
            Strategy::Nearest(s) => Strategy::Nearest(s.fork()),
        }
    }
}

/// Builds the RNG of one strategy instance.
///
/// With a run seed, every strategy derives its own stream from the seed and
/// its name, so two strategies never draw from the same sequence.
///
/// 构建单个策略实例的随机数生成器。
/// 有运行种子时，每个策略由种子和名称派生出独立的序列。
pub(crate) fn seeded_rng(seed: Option<u64>, kind: StrategyKind) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ fnv1a(kind.to_string().as_bytes())),
        None => StdRng::from_os_rng(),
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, &b| (hash ^ b as u64).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        let kinds = [
            StrategyKind::Mtu,
            StrategyKind::Linear,
            StrategyKind::Exponential,
            StrategyKind::MouseElephant,
            StrategyKind::Random,
            StrategyKind::Random255,
            StrategyKind::Level(100),
            StrategyKind::Level(900),
            StrategyKind::Nearest,
        ];
        for kind in kinds {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_legacy_names_parse() {
        assert_eq!("near".parse::<StrategyKind>().unwrap(), StrategyKind::Nearest);
        assert_eq!(
            "mouse_elephant".parse::<StrategyKind>().unwrap(),
            StrategyKind::MouseElephant
        );
        assert_eq!(
            "level500".parse::<StrategyKind>().unwrap(),
            StrategyKind::Level(500)
        );
    }

    #[test]
    fn test_unknown_names_rejected() {
        for name in [
            "",
            "level",
            "level+5",
            "level-1",
            "Level100",
            "level0100",
            "level00900",
            "nearest",
            "padme",
        ] {
            let err = name.parse::<StrategyKind>().unwrap_err();
            assert!(
                matches!(&err, Error::UnknownStrategy(n) if n == name),
                "{name:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_seeded_rngs_differ_per_strategy() {
        use rand::Rng;
        let mut a = seeded_rng(Some(42), StrategyKind::Level(100));
        let mut b = seeded_rng(Some(42), StrategyKind::Level(900));
        let mut a_again = seeded_rng(Some(42), StrategyKind::Level(100));

        let draw_a: u64 = a.random();
        assert_eq!(draw_a, a_again.random::<u64>());
        assert_ne!(draw_a, b.random::<u64>());
    }
}
