//! tests/common/harness.rs
use adaptive_padding::config::Config;
use std::sync::Once;
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan;

/// Initializes tracing for tests, ensuring it's only done once.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        let filter =
            std::env::var("RUST_LOG").unwrap_or_else(|_| "adaptive_padding=debug".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .init();
    });
}

/// A config with a fixed seed so randomized strategies are reproducible.
pub fn seeded_config() -> Config {
    Config {
        rng_seed: Some(42),
        ..Default::default()
    }
}

/// Builds an argv that runs `script` under `sh -c`.
pub fn shell(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

pub const SHORT_TIMEOUT: Duration = Duration::from_millis(300);
pub const GENEROUS_TIMEOUT: Duration = Duration::from_secs(10);
