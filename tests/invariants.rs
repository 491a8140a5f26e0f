//! Properties every registered strategy must satisfy.

pub mod common;

use adaptive_padding::config::RegistryGroup;
use adaptive_padding::error::Error;
use adaptive_padding::length::Length;
use adaptive_padding::registry::StrategyRegistry;
use adaptive_padding::strategy::PaddingStrategy;
use common::harness::{init_tracing, seeded_config};

async fn every_strategy() -> StrategyRegistry {
    let mut config = seeded_config();
    config.strategies = vec![
        RegistryGroup::Baseline,
        RegistryGroup::Tiered,
        RegistryGroup::Nearest,
    ];
    config.nearest.breakpoints = Some(vec![66, 102, 253, 1236, 1514]);
    StrategyRegistry::from_config(&config).await.unwrap()
}

#[tokio::test]
async fn test_registry_exposes_every_configured_name() {
    init_tracing();
    let registry = every_strategy().await;
    for name in [
        "mtu",
        "linear",
        "exponential",
        "mouse_elephant",
        "random",
        "random255",
        "level100",
        "level500",
        "level700",
        "level900",
        "near",
    ] {
        let strategy = registry.get(name).unwrap();
        assert_eq!(strategy.name(), name);
    }
}

#[tokio::test]
async fn test_padding_never_shrinks_a_length() {
    init_tracing();
    let mut registry = every_strategy().await;
    for (kind, strategy) in registry.iter_mut() {
        for length in 0..1600 {
            let padded = strategy.pad(Length::new(length)).unwrap().get();
            assert!(padded >= length, "{kind}: {length} -> {padded}");
        }
    }
}

#[tokio::test]
async fn test_lengths_at_or_above_mtu_pass_through() {
    init_tracing();
    let mut registry = every_strategy().await;
    for (kind, strategy) in registry.iter_mut() {
        for length in [1500, 1501, 1514, 9000, u32::MAX] {
            let padded = strategy.pad(Length::new(length)).unwrap().get();
            assert_eq!(padded, length, "{kind} padded {length}");
        }
    }
}

#[tokio::test]
async fn test_negative_lengths_are_invalid_input() {
    init_tracing();
    let mut registry = every_strategy().await;
    for (kind, strategy) in registry.iter_mut() {
        for raw in [-1, -1500, i64::MIN] {
            let err = strategy.pad_raw(raw).unwrap_err();
            assert!(
                matches!(err, Error::InvalidInput { value } if value == raw),
                "{kind}: {err:?}"
            );
        }
        assert_eq!(strategy.pad_raw(1500).unwrap().get(), 1500);
    }
}

#[tokio::test]
async fn test_deterministic_strategies_repeat_themselves() {
    init_tracing();
    let mut registry = every_strategy().await;
    for name in ["mtu", "linear", "exponential", "mouse_elephant", "near"] {
        let strategy = registry.get_mut(name).unwrap();
        for length in [0, 66, 500, 999, 1400, 1499] {
            let first = strategy.pad(Length::new(length)).unwrap();
            for _ in 0..20 {
                assert_eq!(strategy.pad(Length::new(length)).unwrap(), first, "{name}");
            }
        }
    }
}

#[tokio::test]
async fn test_level900_scenarios_through_registry() {
    init_tracing();
    let mut registry = every_strategy().await;
    let level900 = registry.get_mut("level900").unwrap();
    let mut pad = |length: u32| level900.pad(Length::new(length)).unwrap().get();

    assert_eq!(pad(134), 900);
    assert_eq!(pad(679), 900);
    for length in [901, 998] {
        assert!((901..=1000).contains(&pad(length)));
    }
    for length in [999, 1398] {
        assert!((999..=1400).contains(&pad(length)));
    }
    assert_eq!(pad(1400), 1500);
    assert_eq!(pad(1499), 1500);
    for length in 1500..=1514 {
        assert_eq!(pad(length), length);
    }
}

#[tokio::test]
async fn test_same_seed_reproduces_random_draws() {
    init_tracing();
    let mut first = every_strategy().await;
    let mut second = every_strategy().await;
    for name in ["random", "random255", "level500", "level900"] {
        let a = first.get_mut(name).unwrap();
        let b = second.get_mut(name).unwrap();
        for length in [550, 700, 1100] {
            assert_eq!(
                a.pad(Length::new(length)).unwrap(),
                b.pad(Length::new(length)).unwrap(),
                "{name}"
            );
        }
    }
}
