//! The byte-count value type every strategy operates on.
//! 所有策略所操作的字节长度值类型。

use crate::error::{Error, Result};
use std::fmt;

/// The default maximum transmission unit, in bytes.
/// 默认的最大传输单元（字节）。
pub const DEFAULT_MTU: u32 = 1500;

/// A non-negative packet or flow length in bytes.
///
/// Padded lengths use the same type. A strategy's output is always
/// `>=` its input.
///
/// 以字节为单位的非负包长度或流长度。填充后的长度使用同一类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Length(u32);

impl Length {
    pub const ZERO: Length = Length(0);

    pub const fn new(bytes: u32) -> Self {
        Self(bytes)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Length {
    fn from(bytes: u32) -> Self {
        Self(bytes)
    }
}

impl From<Length> for u32 {
    fn from(length: Length) -> Self {
        length.0
    }
}

impl From<Length> for u64 {
    fn from(length: Length) -> Self {
        length.0 as u64
    }
}

impl TryFrom<i64> for Length {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        u32::try_from(value)
            .map(Length)
            .map_err(|_| Error::InvalidInput { value })
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
