//! Breakpoint sets and the sources that supply them.
//! 断点集合及其来源。

use crate::error::{Error, Result};
use crate::length::Length;
use async_trait::async_trait;

pub mod command;
pub mod format;

/// An ascending, duplicate-free set of target lengths.
///
/// Built once and immutable afterwards.
///
/// 升序、无重复的目标长度集合。构建后不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoints(Vec<Length>);

impl Breakpoints {
    /// Sorts and deduplicates `values`. An empty set is rejected.
    ///
    /// 对 `values` 排序并去重。空集合会被拒绝。
    pub fn new(values: impl IntoIterator<Item = u32>) -> Result<Self> {
        let mut points: Vec<Length> = values.into_iter().map(Length::new).collect();
        if points.is_empty() {
            return Err(Error::InvalidConfig("breakpoint list is empty".into()));
        }
        points.sort_unstable();
        points.dedup();
        Ok(Self(points))
    }

    /// The smallest breakpoint `>= length`, scanning in ascending order.
    ///
    /// 按升序扫描，返回不小于 `length` 的最小断点。
    pub fn first_at_or_above(&self, length: Length) -> Option<Length> {
        self.0.iter().copied().find(|&point| point >= length)
    }

    pub fn as_slice(&self) -> &[Length] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A one-shot supplier of breakpoints, consulted when a nearest-breakpoint
/// strategy is constructed.
///
/// 一次性断点提供者，在构建最近断点策略时调用。
#[async_trait]
pub trait BreakpointSource: Send + Sync {
    /// Produces the breakpoint set, or the reason it could not.
    ///
    /// 生成断点集合，失败时返回原因。
    async fn fetch(&self) -> Result<Breakpoints>;
}

/// Breakpoints fixed in configuration.
///
/// 在配置中固定的断点。
#[derive(Debug, Clone)]
pub struct StaticSource {
    values: Vec<u32>,
}

impl StaticSource {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }
}

#[async_trait]
impl BreakpointSource for StaticSource {
    async fn fetch(&self) -> Result<Breakpoints> {
        Breakpoints::new(self.values.iter().copied())
    }
}
