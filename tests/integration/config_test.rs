//! Configuration file tests

use triple_barrier::config::{Config, LogFormat};

#[test]
fn test_config_example_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).unwrap();

    assert_eq!(config.cusum.threshold, 0.01);
    assert_eq!(config.labeling.profit_multiple, 1.0);
    assert_eq!(config.labeling.loss_multiple, 1.0);
    assert_eq!(config.labeling.min_return, 0.005);
    assert_eq!(config.labeling.volatility_span, 50);
    assert_eq!(config.weighting.oldest_weight, 1.0);
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
}

#[test]
fn test_config_round_trips_through_toml() {
    let mut config = Config::default();
    config.labeling.vertical_barrier_minutes = Some(90);
    config.weighting.oldest_weight = 0.5;

    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed.labeling.vertical_barrier_minutes, Some(90));
    assert_eq!(parsed.weighting.oldest_weight, 0.5);
    assert!(parsed.validate().is_ok());
}
