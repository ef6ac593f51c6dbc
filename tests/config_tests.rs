//! Loading configuration files and wiring an allocator from them.

use std::io::Write;
use std::sync::Arc;

use gmx_allocator::adapter::outbound::executor::LoggingExecutor;
use gmx_allocator::app::{Allocator, Config};
use gmx_allocator::error::{ConfigError, Error};
use gmx_allocator::testkit::config::config_toml;
use gmx_allocator::testkit::recording::{InMemoryDataSource, RecordingNotifier};
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn sample_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml");

    let config = Config::load(path).unwrap();

    assert!(config.dry_run);
    assert_eq!(config.strategy.strategy_type, "balanced");
    assert_eq!(config.risk.max_position_usd, dec!(10000));
    assert_eq!(config.execution.check_interval_secs, 300);
    assert_eq!(config.execution.risk_interval_secs, 60);
    assert_eq!(config.execution.report_interval_secs, 86_400);
}

#[test]
fn minimal_file_selects_strategy() {
    let file = write_config(&config_toml("high_yield"));

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.strategy.strategy_type, "high_yield");
    assert_eq!(config.strategy_settings().limits.max_single_pool_usd(), dec!(3000));
}

#[test]
fn file_sections_flow_into_settings() {
    let file = write_config(
        r#"
dry_run = false

[strategy]
type = "balanced"
min_apy = 12.5
max_single_pool_pct = 40.0
max_pools = 3

[risk]
max_position_usd = 50000
min_position_usd = 250
stop_loss_pct = 20.0

[pools]
blacklist = ["DOGE-USDC"]

[execution]
check_interval_secs = 30
risk_interval_secs = 10
"#,
    );

    let config = Config::load(file.path()).unwrap();
    let strategy = config.strategy_settings();
    let risk = config.risk_settings();

    assert!(!config.dry_run);
    assert_eq!(strategy.min_apy, 12.5);
    assert_eq!(strategy.max_pools, 3);
    assert_eq!(strategy.limits.max_position_usd, dec!(50000));
    assert_eq!(strategy.limits.min_position_usd, dec!(250));
    assert_eq!(strategy.limits.max_single_pool_usd(), dec!(20000));
    assert!(!strategy.filter.allows("DOGE-USDC"));
    assert!(strategy.filter.allows("ETH-USDC"));
    assert_eq!(risk.stop_loss_pct, 20.0);
    assert_eq!(risk.min_apy, 12.5);
    assert_eq!(config.execution.check_interval().as_secs(), 30);
    assert_eq!(config.execution.risk_interval().as_secs(), 10);
}

#[test]
fn missing_file_is_a_read_error() {
    let err = Config::load("/nonexistent/config.toml").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let file = write_config("[strategy\ntype = ");

    let err = Config::load(file.path()).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn unknown_strategy_in_file_is_rejected() {
    let file = write_config(&config_toml("yolo"));

    let err = Config::load(file.path()).unwrap_err();

    assert_eq!(
        err.to_string(),
        "unknown strategy 'yolo' (available: balanced, high_yield)"
    );
}

#[test]
fn out_of_range_value_names_the_field() {
    let file = write_config("[execution]\nrisk_interval_secs = 0\n");

    let err = Config::load(file.path()).unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "risk_interval_secs",
            ..
        })
    ));
}

#[test]
fn stop_loss_tighter_than_drawdown_is_rejected() {
    let file = write_config("[risk]\nmax_drawdown_pct = 12.0\nstop_loss_pct = 8.0\n");

    let err = Config::load(file.path()).unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "stop_loss_pct",
            ..
        })
    ));
}

#[test]
fn allocator_wires_from_config() {
    let file = write_config(&config_toml("high_yield"));
    let config = Config::load(file.path()).unwrap();

    let allocator = Allocator::from_config(
        &config,
        Arc::new(InMemoryDataSource::new()),
        Arc::new(LoggingExecutor),
        Arc::new(RecordingNotifier::new()),
    )
    .unwrap();

    let status = allocator.engine().get_status();
    assert_eq!(status.strategy, "high_yield");
    assert_eq!(status.check_interval_secs, 300);
    assert_eq!(allocator.risk_manager().settings().stop_loss_pct, 15.0);
}
