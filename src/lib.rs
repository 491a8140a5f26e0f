#![deny(clippy::expect_used, clippy::unwrap_used)]

//! The root of the adaptive packet padding library.
//! 自适应数据包填充库的根。
//!
//! A padding strategy maps an observed packet or flow length to a padded
//! length. Strategies are built by [`registry::StrategyRegistry`] from a
//! [`config::Config`] and are always wrapped in an MTU guard.
//!
//! 填充策略将观测到的包长度或流长度映射为填充后的长度。
//! 策略由 [`registry::StrategyRegistry`] 根据 [`config::Config`] 构建，并始终带有 MTU 保护。

pub mod breakpoints;
pub mod config;
pub mod error;
pub mod length;
pub mod memo;
pub mod overhead;
pub mod registry;
pub mod strategy;
