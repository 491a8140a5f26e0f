//! Tests for the baseline strategies.
use super::*;
use crate::strategy::guard::MtuGuard;

const MTU: u32 = 1500;

fn pad<S: PaddingStrategy>(strategy: &mut S, length: u32) -> u32 {
    strategy.pad(Length::new(length)).unwrap().get()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn test_pad_to_mtu() {
    let mut strategy = MtuGuard::new(MTU, PadToMtu::new(MTU));
    assert_eq!(pad(&mut strategy, 0), 1500);
    assert_eq!(pad(&mut strategy, 66), 1500);
    assert_eq!(pad(&mut strategy, 1499), 1500);
    assert_eq!(pad(&mut strategy, 1500), 1500);
    assert_eq!(pad(&mut strategy, 1514), 1514);
}

#[test]
fn test_linear_rounds_up_to_block() {
    let mut strategy = MtuGuard::new(MTU, Linear::new(128, MTU).unwrap());
    assert_eq!(pad(&mut strategy, 0), 0);
    assert_eq!(pad(&mut strategy, 1), 128);
    assert_eq!(pad(&mut strategy, 128), 128);
    assert_eq!(pad(&mut strategy, 129), 256);
    assert_eq!(pad(&mut strategy, 1400), 1408);
    // 1490 rounds to 1536, which is capped at the MTU.
    assert_eq!(pad(&mut strategy, 1490), 1500);
}

#[test]
fn test_exponential_rounds_up_to_power() {
    let mut strategy = MtuGuard::new(MTU, Exponential::new(2, MTU).unwrap());
    assert_eq!(pad(&mut strategy, 0), 1);
    assert_eq!(pad(&mut strategy, 1), 1);
    assert_eq!(pad(&mut strategy, 3), 4);
    assert_eq!(pad(&mut strategy, 64), 64);
    assert_eq!(pad(&mut strategy, 65), 128);
    assert_eq!(pad(&mut strategy, 1000), 1024);
    assert_eq!(pad(&mut strategy, 1025), 1500);
}

#[test]
fn test_exponential_other_base() {
    let mut strategy = Exponential::new(10, MTU).unwrap();
    assert_eq!(pad(&mut strategy, 11), 100);
    assert_eq!(pad(&mut strategy, 101), 1000);
    assert_eq!(pad(&mut strategy, 1001), 1500);
}

#[test]
fn test_mouse_elephant() {
    let mut strategy = MtuGuard::new(MTU, MouseElephant::new(100, 100, MTU).unwrap());
    assert_eq!(pad(&mut strategy, 40), 100);
    assert_eq!(pad(&mut strategy, 100), 100);
    assert_eq!(pad(&mut strategy, 101), 1500);
    assert_eq!(pad(&mut strategy, 1499), 1500);
}

#[test]
fn test_random_padding_multiples_of_step() {
    let mut strategy = MtuGuard::new(MTU, RandomPadding::new(8, 256, MTU, rng()).unwrap());
    for _ in 0..200 {
        let padded = pad(&mut strategy, 500);
        let extra = padded - 500;
        assert!((8..=256).contains(&extra), "extra {extra}");
        assert_eq!(extra % 8, 0);
    }
}

#[test]
fn test_random_padding_capped_at_mtu() {
    let mut strategy = MtuGuard::new(MTU, RandomPadding::new(8, 256, MTU, rng()).unwrap());
    for _ in 0..200 {
        let padded = pad(&mut strategy, 1495);
        assert!((1495..=1500).contains(&padded));
    }
}

#[test]
fn test_random255_bounds() {
    let mut strategy = MtuGuard::new(MTU, Random255::new(255, MTU, rng()));
    for _ in 0..200 {
        let padded = pad(&mut strategy, 100);
        assert!((100..=355).contains(&padded), "padded {padded}");
        let near_mtu = pad(&mut strategy, 1400);
        assert!((1400..=1500).contains(&near_mtu));
    }
}

#[test]
fn test_invalid_parameters_rejected() {
    assert!(matches!(Linear::new(0, MTU), Err(Error::InvalidConfig(_))));
    assert!(matches!(Exponential::new(1, MTU), Err(Error::InvalidConfig(_))));
    assert!(matches!(
        MouseElephant::new(200, 100, MTU),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        RandomPadding::new(0, 256, MTU, rng()),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        RandomPadding::new(16, 8, MTU, rng()),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_forked_random_strategies_draw_independently() {
    let mut original = RandomPadding::new(1, 1000, 100_000, rng()).unwrap();
    let mut forked = original.fork();
    let a: Vec<u32> = (0..10).map(|_| pad(&mut original, 0)).collect();
    let b: Vec<u32> = (0..10).map(|_| pad(&mut forked, 0)).collect();
    assert_ne!(a, b);
}
