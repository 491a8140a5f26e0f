//! Byte-overhead accounting for padded traffic.
//!
//! The overhead of a strategy is the ratio of padded bytes to raw bytes
//! over every record it padded.
//!
//! 填充流量的字节开销统计。策略的开销是其所有填充记录的填充后字节数与原始字节数之比。

use crate::error::Result;
use crate::length::Length;
use crate::strategy::PaddingStrategy;
use dashmap::DashMap;
use tracing::debug;

/// Raw and padded byte totals for one strategy.
///
/// 单个策略的原始字节与填充后字节总数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteOverhead {
    raw: u64,
    padded: u64,
    records: u64,
}

impl ByteOverhead {
    pub fn record(&mut self, raw: Length, padded: Length) {
        self.raw += u64::from(raw);
        self.padded += u64::from(padded);
        self.records += 1;
    }

    pub fn merge(&mut self, other: ByteOverhead) {
        self.raw += other.raw;
        self.padded += other.padded;
        self.records += other.records;
    }

    pub fn raw(&self) -> u64 {
        self.raw
    }

    pub fn padded(&self) -> u64 {
        self.padded
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn extra_bytes(&self) -> u64 {
        self.padded.saturating_sub(self.raw)
    }

    /// Padded bytes divided by raw bytes; `None` until any raw byte is seen.
    ///
    /// 填充后字节数除以原始字节数；在出现原始字节之前返回 `None`。
    pub fn ratio(&self) -> Option<f64> {
        (self.raw > 0).then(|| self.padded as f64 / self.raw as f64)
    }
}

/// Pads a column of lengths with `strategy`, returning the padded column and
/// its totals. Stops at the first error.
///
/// 使用 `strategy` 填充一列长度，返回填充后的列及其总计。遇到第一个错误即停止。
pub fn pad_all<S>(strategy: &mut S, lengths: &[Length]) -> Result<(Vec<Length>, ByteOverhead)>
where
    S: PaddingStrategy + ?Sized,
{
    let mut overhead = ByteOverhead::default();
    let padded = lengths
        .iter()
        .map(|&length| -> Result<Length> {
            let padded = strategy.pad(length)?;
            overhead.record(length, padded);
            Ok(padded)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((padded, overhead))
}

/// Per-strategy totals shared between workers.
///
/// Each worker pads with its own strategy instance and reports its totals
/// here; the ledger itself is safe to share behind an `Arc`.
///
/// 在工作者之间共享的按策略统计。每个工作者使用自己的策略实例进行填充，
/// 然后将总计汇报到这里；账本本身可以通过 `Arc` 共享。
#[derive(Debug, Default)]
pub struct OverheadLedger {
    entries: DashMap<String, ByteOverhead>,
}

impl OverheadLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, strategy: &str, overhead: ByteOverhead) {
        self.entries
            .entry(strategy.to_string())
            .or_default()
            .merge(overhead);
        debug!(
            strategy,
            raw = overhead.raw,
            padded = overhead.padded,
            "overhead recorded"
        );
    }

    pub fn get(&self, strategy: &str) -> Option<ByteOverhead> {
        self.entries.get(strategy).map(|entry| *entry.value())
    }

    /// Overhead ratio of every strategy with at least one raw byte, sorted by name.
    ///
    /// 所有至少有一个原始字节的策略的开销比，按名称排序。
    pub fn ratios(&self) -> Vec<(String, f64)> {
        let mut ratios: Vec<(String, f64)> = self
            .entries
            .iter()
            .filter_map(|entry| entry.value().ratio().map(|r| (entry.key().clone(), r)))
            .collect();
        ratios.sort_by(|a, b| a.0.cmp(&b.0));
        ratios
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
