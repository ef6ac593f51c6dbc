//! End-to-end tests of the `gmx-allocator` binary against the bundled
//! snapshot.

use std::io::Write;

use assert_cmd::Command;
use gmx_allocator::domain::Signal;
use predicates::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tempfile::NamedTempFile;

const SNAPSHOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/snapshot.json");
const SAMPLE_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml");

fn allocator() -> Command {
    let mut cmd = Command::cargo_bin("gmx-allocator").unwrap();
    cmd.env_remove("WALLET_PRIVATE_KEY")
        .env_remove("WALLET_ADDRESS")
        .env_remove("TELEGRAM_BOT_TOKEN")
        .env_remove("TELEGRAM_CHAT_ID")
        .env("RUST_LOG", "warn");
    cmd
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn strategies_lists_builtin_variants() {
    allocator()
        .arg("strategies")
        .assert()
        .success()
        .stdout(predicate::str::contains("balanced"))
        .stdout(predicate::str::contains("high_yield"));
}

#[test]
fn strategies_json_has_names_and_descriptions() {
    let rows = stdout_json(allocator().args(["strategies", "--json"]));

    let names: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["balanced", "high_yield"]);
    assert!(rows[0]["description"].as_str().is_some());
}

#[test]
fn check_config_accepts_sample() {
    allocator()
        .args(["check-config", "--config", SAMPLE_CONFIG])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn check_config_json_reports_strategy() {
    let report = stdout_json(allocator().args(["check-config", "--json", "-c", SAMPLE_CONFIG]));

    assert_eq!(report["valid"], true);
    assert_eq!(report["strategy"], "balanced");
    assert_eq!(report["dry_run"], true);
}

#[test]
fn check_config_rejects_out_of_range_value() {
    let file = write_config("[strategy]\nmax_single_pool_pct = 150.0\n");

    allocator()
        .arg("check-config")
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_single_pool_pct"));
}

#[test]
fn unknown_strategy_fails_with_available_names() {
    let file = write_config("[strategy]\ntype = \"yolo\"\n");

    allocator()
        .arg("rankings")
        .arg("--config")
        .arg(file.path())
        .args(["--snapshot", SNAPSHOT])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown strategy 'yolo'"))
        .stderr(predicate::str::contains("balanced, high_yield"));
}

#[test]
fn missing_config_file_fails() {
    allocator()
        .args(["rankings", "--config", "/nonexistent/config.toml"])
        .args(["--snapshot", SNAPSHOT])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn rankings_json_is_sorted_by_score() {
    let rankings = stdout_json(
        allocator()
            .args(["rankings", "--json", "--config", SAMPLE_CONFIG])
            .args(["--snapshot", SNAPSHOT]),
    );

    let rows = rankings.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    let scores: Vec<f64> = rows.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
    assert!(rows
        .iter()
        .all(|r| (0.0..=1.0).contains(&r["oi_imbalance"].as_f64().unwrap())));
}

#[test]
fn rankings_table_names_every_pool() {
    allocator()
        .args(["rankings", "--config", SAMPLE_CONFIG, "--snapshot", SNAPSHOT])
        .assert()
        .success()
        .stdout(predicate::str::contains("ETH-USDC"))
        .stdout(predicate::str::contains("LINK-USDC"));
}

#[test]
fn dry_run_exits_low_apy_pool_and_spends_within_capital() {
    let value = stdout_json(
        allocator()
            .args(["run", "--json", "--dry-run", "--capital", "1000"])
            .args(["--config", SAMPLE_CONFIG, "--snapshot", SNAPSHOT]),
    );
    let signals: Vec<Signal> = serde_json::from_value(value).unwrap();

    let link_exit = signals
        .iter()
        .find(|s| s.market_name() == "LINK-USDC")
        .expect("LINK-USDC exit");
    assert!(link_exit.is_withdraw());
    assert_eq!(link_exit.amount_usd(), dec!(880));

    let deposited: Decimal = signals
        .iter()
        .filter(|s| s.is_deposit())
        .map(Signal::amount_usd)
        .sum();
    assert!(deposited > Decimal::ZERO);
    assert!(deposited <= dec!(1000));
    assert!(signals.windows(2).all(|w| w[0].priority() <= w[1].priority()));
}

#[test]
fn live_run_requires_private_key() {
    let file = write_config(
        "dry_run = false\n\n[wallet]\naddress = \"0x1111111111111111111111111111111111111111\"\n",
    );

    allocator()
        .arg("run")
        .arg("--config")
        .arg(file.path())
        .args(["--snapshot", SNAPSHOT])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WALLET_PRIVATE_KEY"));
}

#[test]
fn risk_json_reports_alerts_and_summary() {
    let report = stdout_json(
        allocator()
            .args(["risk", "--json", "--config", SAMPLE_CONFIG])
            .args(["--snapshot", SNAPSHOT]),
    );

    assert_eq!(report["emergency_exit"], false);
    assert_eq!(report["summary"]["risk_level"], "medium");

    let alerts = report["alerts"].as_array().unwrap();
    let has = |category: &str, pool: &str| {
        alerts
            .iter()
            .any(|a| a["category"] == category && a["market_name"] == pool)
    };
    assert!(has("drawdown", "LINK-USDC"));
    assert!(has("concentration", "ETH-USDC"));
    assert!(has("apy_low", "LINK-USDC"));
    assert!(!alerts.iter().any(|a| a["category"] == "stop_loss"));
}

#[test]
fn risk_table_shows_portfolio() {
    allocator()
        .args(["risk", "--config", SAMPLE_CONFIG, "--snapshot", SNAPSHOT])
        .assert()
        .success()
        .stdout(predicate::str::contains("Portfolio"))
        .stdout(predicate::str::contains("drawdown"));
}

#[test]
fn missing_snapshot_fails() {
    allocator()
        .args(["risk", "--config", SAMPLE_CONFIG])
        .args(["--snapshot", "/nonexistent/snapshot.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read snapshot"));
}

#[test]
fn positions_json_reports_totals() {
    let report = stdout_json(
        allocator()
            .args(["positions", "--json", "--config", SAMPLE_CONFIG])
            .args(["--snapshot", SNAPSHOT]),
    );

    let names: Vec<&str> = report["positions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["ETH-USDC", "LINK-USDC"]);

    let decimal = |field: &str| report[field].as_str().unwrap().parse::<Decimal>().unwrap();
    assert_eq!(decimal("total_value_usd"), dec!(3380));
    assert_eq!(decimal("total_pnl_usd"), dec!(22.10));
}

#[test]
fn positions_table_lists_each_pool() {
    allocator()
        .args(["positions", "--config", SAMPLE_CONFIG, "--snapshot", SNAPSHOT])
        .assert()
        .success()
        .stdout(predicate::str::contains("ETH-USDC"))
        .stdout(predicate::str::contains("LINK-USDC"))
        .stdout(predicate::str::contains("+$142.10"))
        .stdout(predicate::str::contains("Total PnL"));
}

#[test]
fn positions_without_wallet_warns() {
    let file = write_config("dry_run = true\n");

    allocator()
        .arg("positions")
        .arg("--config")
        .arg(file.path())
        .args(["--snapshot", SNAPSHOT])
        .assert()
        .success()
        .stdout(predicate::str::contains("No wallet address configured"));
}
