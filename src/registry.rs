//! Maps configuration names to ready-to-use strategy instances.
//! 将配置名称映射到可直接使用的策略实例。

use crate::breakpoints::command::CommandSource;
use crate::breakpoints::{BreakpointSource, StaticSource};
use crate::config::{Config, RegistryGroup};
use crate::error::{Error, Result};
use crate::strategy::baseline::{
    Exponential, Linear, MouseElephant, PadToMtu, Random255, RandomPadding,
};
use crate::strategy::guard::MtuGuard;
use crate::strategy::nearest::Nearest;
use crate::strategy::tiered::Tiered;
use crate::strategy::{PaddingStrategy, Strategy, StrategyKind, seeded_rng};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// A set of named, MTU-guarded strategies built for one experiment run.
///
/// 为一次实验运行构建的一组具名、带 MTU 保护的策略。
#[derive(Debug, Default)]
pub struct StrategyRegistry {
    strategies: BTreeMap<StrategyKind, Strategy>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds every baseline strategy.
    ///
    /// 构建所有基线策略。
    pub fn baseline(config: &Config) -> Result<Self> {
        let mtu = config.mtu;
        let params = &config.baseline;
        let seed = config.rng_seed;

        let mut registry = Self::new();
        registry.insert(Strategy::Exponential(MtuGuard::new(
            mtu,
            Exponential::new(params.exponential_base, mtu)?,
        )));
        registry.insert(Strategy::Linear(MtuGuard::new(
            mtu,
            Linear::new(params.linear_block, mtu)?,
        )));
        registry.insert(Strategy::MouseElephant(MtuGuard::new(
            mtu,
            MouseElephant::new(params.mouse_split, params.mouse_target, mtu)?,
        )));
        registry.insert(Strategy::Mtu(MtuGuard::new(mtu, PadToMtu::new(mtu))));
        registry.insert(Strategy::Random(MtuGuard::new(
            mtu,
            RandomPadding::new(
                params.random_step,
                params.random_max,
                mtu,
                seeded_rng(seed, StrategyKind::Random),
            )?,
        )));
        registry.insert(Strategy::Random255(MtuGuard::new(
            mtu,
            Random255::new(
                params.random255_max,
                mtu,
                seeded_rng(seed, StrategyKind::Random255),
            ),
        )));

        info!(strategies = ?registry.names(), "baseline strategies built");
        Ok(registry)
    }

    /// Builds one Level-K strategy per configured threshold.
    ///
    /// 为每个配置的阈值构建一个 Level-K 策略。
    pub fn tiered(config: &Config) -> Result<Self> {
        let mut registry = Self::new();
        for &threshold in &config.tiered.thresholds {
            let kind = StrategyKind::Level(threshold);
            let tiered = Tiered::new(
                threshold,
                config.mtu,
                config.tiered.middle_bands(threshold),
                seeded_rng(config.rng_seed, kind),
            )?;
            if registry
                .insert(Strategy::Tiered(MtuGuard::new(config.mtu, tiered)))
                .is_some()
            {
                return Err(Error::InvalidConfig(format!(
                    "tiered threshold {threshold} is listed twice"
                )));
            }
        }

        info!(strategies = ?registry.names(), "tiered strategies built");
        Ok(registry)
    }

    /// Runs `source` once and wraps its breakpoints in the nearest strategy.
    /// Source failures are returned as-is; no default breakpoints are used.
    ///
    /// 运行一次 `source`，并用其断点构建最近断点策略。
    /// 来源失败时原样返回错误，不会使用默认断点。
    pub async fn nearest(config: &Config, source: &dyn BreakpointSource) -> Result<Self> {
        let breakpoints = source.fetch().await.inspect_err(|err| {
            warn!(error = %err, "could not obtain breakpoints for the nearest strategy");
        })?;

        let mut registry = Self::new();
        registry.insert(Strategy::Nearest(MtuGuard::new(
            config.mtu,
            Nearest::new(breakpoints),
        )));

        info!(strategies = ?registry.names(), "nearest strategy built");
        Ok(registry)
    }

    /// Builds and merges every group listed in `config.strategies`.
    ///
    /// The nearest group uses the configured fixed breakpoints if present,
    /// otherwise it runs the configured optimizer command.
    ///
    /// 构建并合并 `config.strategies` 中列出的所有分组。
    pub async fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut registry = Self::new();
        for group in &config.strategies {
            let built = match group {
                RegistryGroup::Baseline => Self::baseline(config)?,
                RegistryGroup::Tiered => Self::tiered(config)?,
                RegistryGroup::Nearest => match &config.nearest.breakpoints {
                    Some(values) => {
                        Self::nearest(config, &StaticSource::new(values.clone())).await?
                    }
                    None => {
                        let source = CommandSource::from_config(&config.nearest)?;
                        Self::nearest(config, &source).await?
                    }
                },
            };
            registry.merge(built);
        }
        Ok(registry)
    }

    /// Adds `strategy`, returning the one previously registered under its name.
    ///
    /// 添加 `strategy`，返回此前以同名注册的策略。
    pub fn insert(&mut self, strategy: Strategy) -> Option<Strategy> {
        self.strategies.insert(strategy.kind(), strategy)
    }

    /// Moves every strategy of `other` into `self`. Later entries win.
    ///
    /// 将 `other` 的所有策略移入 `self`，同名时后者覆盖前者。
    pub fn merge(&mut self, other: StrategyRegistry) {
        self.strategies.extend(other.strategies);
    }

    pub fn get(&self, name: &str) -> Result<&Strategy> {
        let kind = name.parse::<StrategyKind>()?;
        self.strategies
            .get(&kind)
            .ok_or_else(|| Error::UnknownStrategy(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Strategy> {
        let kind = name.parse::<StrategyKind>()?;
        self.strategies
            .get_mut(&kind)
            .ok_or_else(|| Error::UnknownStrategy(name.to_string()))
    }

    /// Takes a strategy out of the registry, e.g. to hand it to a worker.
    ///
    /// 从注册表中取出一个策略，例如交给某个工作者。
    pub fn remove(&mut self, name: &str) -> Result<Strategy> {
        let kind = name.parse::<StrategyKind>()?;
        self.strategies
            .remove(&kind)
            .ok_or_else(|| Error::UnknownStrategy(name.to_string()))
    }

    /// Creates a registry of independent copies with empty memos, one per
    /// strategy, for a parallel worker.
    ///
    /// 为并行工作者创建一个由独立副本（缓存为空）组成的注册表。
    pub fn fork(&mut self) -> Self {
        let strategies = self
            .strategies
            .iter_mut()
            .map(|(kind, strategy)| (*kind, strategy.fork()))
            .collect();
        Self { strategies }
    }

    pub fn names(&self) -> Vec<String> {
        self.strategies.keys().map(ToString::to_string).collect()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (StrategyKind, &mut Strategy)> {
        self.strategies
            .iter_mut()
            .map(|(kind, strategy)| (*kind, strategy))
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
