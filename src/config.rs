//! 定义了填充引擎的可配置参数。
//! Defines configurable parameters for the padding engine.

use crate::breakpoints::format::OutputFormat;
use crate::error::{Error, Result};
use crate::length::DEFAULT_MTU;
use crate::strategy::tiered::MiddleBands;
use std::time::Duration;

/// A structure containing all configurable parameters of an experiment run.
///
/// 包含一次实验运行所有可配置参数的结构体。
#[derive(Debug, Clone)]
pub struct Config {
    /// The maximum transmission unit in bytes. Lengths at or above it are
    /// never padded.
    /// 最大传输单元（字节）。大于等于它的长度永远不会被填充。
    pub mtu: u32,

    /// Seed for the randomized strategies. `None` seeds from the OS.
    /// 随机化策略的种子。`None` 表示从操作系统获取种子。
    pub rng_seed: Option<u64>,

    /// The registry groups built by `StrategyRegistry::from_config`.
    /// `StrategyRegistry::from_config` 构建的注册表分组。
    pub strategies: Vec<RegistryGroup>,

    /// Parameters of the prior-art strategies.
    /// 现有（基线）策略的参数。
    pub baseline: BaselineConfig,

    /// Parameters of the tiered Level-K strategies.
    /// 分级 Level-K 策略的参数。
    pub tiered: TieredConfig,

    /// Parameters of the nearest-breakpoint strategy.
    /// 最近断点策略的参数。
    pub nearest: NearestConfig,
}

/// One of the three independent strategy families.
///
/// 三个相互独立的策略族之一。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryGroup {
    Baseline,
    Tiered,
    Nearest,
}

/// Parameters of the baseline ("existing") strategies.
///
/// 基线（现有）策略的参数。
#[derive(Debug, Clone)]
pub struct BaselineConfig {
    /// Block size that `linear` rounds up to.
    /// `linear` 向上取整的块大小。
    pub linear_block: u32,
    /// Base of the progression that `exponential` rounds up to.
    /// `exponential` 向上取整所用的幂级数底数。
    pub exponential_base: u32,
    /// Lengths up to and including this value are "mice".
    /// 小于等于该值的长度被视为“老鼠”流。
    pub mouse_split: u32,
    /// Size every mouse is padded to. Elephants go to the MTU.
    /// 老鼠流被填充到的大小。大象流填充到 MTU。
    pub mouse_target: u32,
    /// Granularity of the `random` strategy's extra bytes.
    /// `random` 策略额外字节的粒度。
    pub random_step: u32,
    /// Upper bound of the `random` strategy's extra bytes.
    /// `random` 策略额外字节的上限。
    pub random_max: u32,
    /// Upper bound of the `random255` strategy's extra bytes.
    /// `random255` 策略额外字节的上限。
    pub random255_max: u32,
}

/// Parameters of the tiered strategies.
///
/// 分级策略的参数。
#[derive(Debug, Clone)]
pub struct TieredConfig {
    /// One Level-K strategy is built per threshold.
    /// 每个阈值构建一个 Level-K 策略。
    pub thresholds: Vec<u32>,
    /// Thresholds whose middle bands step to the next multiple of `K`
    /// instead of drawing at random.
    /// 中间段按 `K` 的倍数阶梯填充（而非随机）的阈值。
    pub stepped: Vec<u32>,
}

/// Parameters of the nearest-breakpoint strategy and its external optimizer.
///
/// 最近断点策略及其外部优化器的参数。
#[derive(Debug, Clone)]
pub struct NearestConfig {
    /// Program and arguments of the external optimizer.
    /// 外部优化器的程序及其参数。
    pub command: Vec<String>,
    /// How the optimizer prints its breakpoints.
    /// 优化器输出断点的格式。
    pub format: OutputFormat,
    /// How long the optimizer may run before it is killed.
    /// 优化器被终止前允许运行的时长。
    pub timeout: Duration,
    /// Fixed breakpoints. When set, the optimizer is not run.
    /// 固定断点。设置后不会运行优化器。
    pub breakpoints: Option<Vec<u32>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mtu: DEFAULT_MTU,
            rng_seed: None,
            strategies: vec![RegistryGroup::Baseline, RegistryGroup::Tiered],
            baseline: BaselineConfig::default(),
            tiered: TieredConfig::default(),
            nearest: NearestConfig::default(),
        }
    }
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            linear_block: 128,
            exponential_base: 2,
            mouse_split: 100,
            mouse_target: 100,
            random_step: 8,
            random_max: 256,
            random255_max: 255,
        }
    }
}

impl TieredConfig {
    /// The middle-band mode configured for `threshold`.
    /// `threshold` 所配置的中间段模式。
    pub fn middle_bands(&self, threshold: u32) -> MiddleBands {
        if self.stepped.contains(&threshold) {
            MiddleBands::Stepped
        } else {
            MiddleBands::Random
        }
    }
}

impl Default for TieredConfig {
    fn default() -> Self {
        Self {
            thresholds: vec![100, 500, 700, 900],
            stepped: vec![100],
        }
    }
}

impl Default for NearestConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "julia".to_string(),
                "adaptive_padding/padding/nearest/OptimalPadding.jl".to_string(),
            ],
            // The bundled optimizer prints a Julia array literal.
            format: OutputFormat::Legacy,
            timeout: Duration::from_secs(120),
            breakpoints: None,
        }
    }
}

impl Config {
    /// Checks the parameters that do not belong to a single strategy.
    /// Strategy constructors validate their own parameters.
    ///
    /// 检查不属于单个策略的参数。各策略构造函数会校验自己的参数。
    pub fn validate(&self) -> Result<()> {
        if self.mtu == 0 {
            return Err(Error::InvalidConfig("mtu must be positive".into()));
        }
        self.baseline.validate()?;
        if self.strategies.contains(&RegistryGroup::Nearest) {
            self.nearest.validate()?;
        }
        Ok(())
    }
}

impl BaselineConfig {
    fn validate(&self) -> Result<()> {
        if self.linear_block == 0 {
            return Err(Error::InvalidConfig("linear_block must be positive".into()));
        }
        if self.exponential_base < 2 {
            return Err(Error::InvalidConfig(
                "exponential_base must be at least 2".into(),
            ));
        }
        if self.mouse_target < self.mouse_split {
            return Err(Error::InvalidConfig(format!(
                "mouse_target {} is below mouse_split {}",
                self.mouse_target, self.mouse_split
            )));
        }
        if self.random_step == 0 || self.random_max < self.random_step {
            return Err(Error::InvalidConfig(format!(
                "random_step {} must be positive and at most random_max {}",
                self.random_step, self.random_max
            )));
        }
        Ok(())
    }
}

impl NearestConfig {
    fn validate(&self) -> Result<()> {
        if self.breakpoints.is_none() && self.command.is_empty() {
            return Err(Error::InvalidConfig(
                "nearest strategy needs either a command or fixed breakpoints".into(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("optimizer timeout must be non-zero".into()));
        }
        Ok(())
    }
}
