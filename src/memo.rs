//! Per-instance cache of padding decisions.
//! 每个策略实例私有的填充结果缓存。

use crate::length::Length;
use std::collections::HashMap;

/// Maps an observed length to the padded length a strategy chose for it.
///
/// A memo is owned by exactly one strategy instance. It is never cloned
/// into another instance and never written to disk.
///
/// 将观测到的长度映射到策略为其选择的填充长度。
/// 每个缓存只属于一个策略实例，不会被复制到其他实例，也不会写入磁盘。
#[derive(Debug, Default)]
pub struct Memo {
    entries: HashMap<Length, Length>,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, length: Length) -> Option<Length> {
        self.entries.get(&length).copied()
    }

    /// Stores `padded` for `length` and returns it.
    /// 为 `length` 存储 `padded` 并返回它。
    pub fn remember(&mut self, length: Length, padded: Length) -> Length {
        self.entries.insert(length, padded);
        padded
    }

    pub fn contains(&self, length: Length) -> bool {
        self.entries.contains_key(&length)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
