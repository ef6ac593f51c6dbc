//! Strategy behavior across both variants.

use gmx_allocator::application::strategy::{
    PoolFilter, StatsByKey, Strategy, StrategyRegistry, StrategySettings,
};
use gmx_allocator::domain::signal::total_deposits;
use gmx_allocator::domain::{Market, Position, Signal};
use gmx_allocator::error::ConfigError;
use gmx_allocator::testkit::config::strategy_settings;
use gmx_allocator::testkit::domain::{market, position, position_with_pnl, skewed_market, stats};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn create(name: &str, settings: StrategySettings) -> Box<dyn Strategy> {
    StrategyRegistry::builtin()
        .create(name, settings)
        .expect("builtin strategy")
}

fn stats_map(entries: &[(&str, f64)]) -> StatsByKey {
    entries
        .iter()
        .map(|(key, apy)| {
            let s = stats(key, *apy);
            (s.market_key().clone(), s)
        })
        .collect()
}

fn three_pools() -> (Vec<Market>, StatsByKey) {
    let markets = vec![
        market("0x1", "ETH-USDC", 20_000_000),
        market("0x2", "BTC-USDC", 20_000_000),
        market("0x3", "ARB-USDC", 20_000_000),
    ];
    let stats = stats_map(&[("0x1", 25.0), ("0x2", 15.0), ("0x3", 12.0)]);
    (markets, stats)
}

#[test]
fn oi_imbalance_stays_in_unit_interval() {
    let cases = [
        skewed_market("0x1", "A", 1_000_000, 0, 0),
        skewed_market("0x2", "B", 1_000_000, 500_000, 500_000),
        skewed_market("0x3", "C", 1_000_000, 1_000_000, 0),
        skewed_market("0x4", "D", 1_000_000, 0, 750_000),
        skewed_market("0x5", "E", 1_000_000, 300_000, 100_000),
    ];

    for m in &cases {
        let imbalance = m.oi_imbalance();
        assert!((0.0..=1.0).contains(&imbalance), "{}: {imbalance}", m.name());
    }
    assert_eq!(cases[0].oi_imbalance(), 0.0);
    assert_eq!(cases[1].oi_imbalance(), 0.0);
    assert_eq!(cases[2].oi_imbalance(), 1.0);
    assert!((cases[4].oi_imbalance() - 0.5).abs() < 1e-9);
}

#[test]
fn pnl_pct_is_zero_without_cost_basis() {
    let p = Position::new("0x1", "ETH-USDC")
        .with_value(dec!(500))
        .with_cost(Decimal::ZERO, dec!(-50));
    assert_eq!(p.pnl_pct(), 0.0);

    let loss = position_with_pnl("0x1", "ETH-USDC", 1000, -160);
    assert!((loss.pnl_pct() + 16.0).abs() < 1e-9);
}

#[test]
fn scoring_is_deterministic() {
    let (markets, stats) = three_pools();
    for name in ["balanced", "high_yield"] {
        let strategy = create(name, strategy_settings());
        let m = &markets[0];
        let s = &stats[m.key()];
        assert_eq!(strategy.score_pool(m, s), strategy.score_pool(m, s));
    }
}

#[test]
fn balanced_spreads_capital_without_exceeding_it() {
    let (markets, stats) = three_pools();
    let strategy = create("balanced", strategy_settings());

    let signals = strategy.generate_signals(&markets, &stats, &[], dec!(1000));

    let deposits: Vec<&Signal> = signals.iter().filter(|s| s.is_deposit()).collect();
    assert!(deposits.len() >= 2, "expected spread, got {signals:?}");
    assert!(total_deposits(&signals) <= dec!(1000));
}

#[test]
fn high_yield_never_exceeds_capital() {
    let (markets, stats) = three_pools();
    let strategy = create("high_yield", strategy_settings());

    let signals = strategy.generate_signals(&markets, &stats, &[], dec!(1000));

    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].market_name(), "ETH-USDC");
    assert!(total_deposits(&signals) <= dec!(1000));
}

#[test]
fn low_apy_position_is_fully_withdrawn_by_every_variant() {
    let markets = vec![
        market("0x1", "ETH-USDC", 20_000_000),
        market("0x2", "BTC-USDC", 20_000_000),
    ];
    let stats = stats_map(&[("0x1", 5.0), ("0x2", 12.0)]);
    let positions = vec![position("0x1", "ETH-USDC", 800)];

    for name in StrategyRegistry::builtin().available() {
        let strategy = create(name, strategy_settings());
        let signals = strategy.generate_signals(&markets, &stats, &positions, Decimal::ZERO);

        let exits: Vec<&Signal> = signals
            .iter()
            .filter(|s| s.is_withdraw() && s.market_name() == "ETH-USDC")
            .collect();
        assert_eq!(exits.len(), 1, "{name}: {signals:?}");
        assert_eq!(exits[0].amount_usd(), dec!(800), "{name}");
        assert!(exits[0].reason().contains("APY"), "{name}");
    }
}

#[test]
fn blacklisted_holding_is_exited() {
    let (markets, stats) = three_pools();
    let settings = StrategySettings {
        filter: PoolFilter::new(Vec::new(), vec!["BTC-USDC".to_string()]),
        ..strategy_settings()
    };
    let positions = vec![position("0x2", "BTC-USDC", 600)];

    for name in ["balanced", "high_yield"] {
        let strategy = create(name, settings.clone());
        let signals = strategy.generate_signals(&markets, &stats, &positions, Decimal::ZERO);

        let exit = signals
            .iter()
            .find(|s| s.market_name() == "BTC-USDC")
            .expect("exit signal");
        assert!(exit.is_withdraw());
        assert_eq!(exit.amount_usd(), dec!(600));
        assert_eq!(exit.reason(), "pool filtered out");
        assert!(signals
            .iter()
            .filter(|s| s.is_deposit())
            .all(|s| s.market_name() != "BTC-USDC"));
    }
}

#[test]
fn whitelist_restricts_candidates() {
    let (markets, stats) = three_pools();
    let settings = StrategySettings {
        filter: PoolFilter::new(vec!["ARB-USDC".to_string()], Vec::new()),
        ..strategy_settings()
    };
    let strategy = create("balanced", settings);

    let signals = strategy.generate_signals(&markets, &stats, &[], dec!(1000));

    assert!(!signals.is_empty());
    assert!(signals.iter().all(|s| s.market_name() == "ARB-USDC"));
}

#[test]
fn signals_come_out_in_priority_order() {
    let markets = vec![
        market("0x1", "ETH-USDC", 20_000_000),
        market("0x2", "BTC-USDC", 20_000_000),
        market("0x3", "ARB-USDC", 20_000_000),
    ];
    let stats = stats_map(&[("0x1", 6.0), ("0x2", 15.0), ("0x3", 40.0)]);
    let positions = vec![
        position("0x1", "ETH-USDC", 500),
        position("0x2", "BTC-USDC", 500),
    ];

    for name in ["balanced", "high_yield"] {
        let strategy = create(name, strategy_settings());
        let signals = strategy.generate_signals(&markets, &stats, &positions, dec!(1000));

        assert!(!signals.is_empty(), "{name}");
        assert!(
            signals.windows(2).all(|w| w[0].priority() <= w[1].priority()),
            "{name}: {signals:?}"
        );
    }
}

#[test]
fn no_stats_means_no_candidates() {
    let markets = vec![market("0x1", "ETH-USDC", 20_000_000)];
    for name in ["balanced", "high_yield"] {
        let strategy = create(name, strategy_settings());
        let signals = strategy.generate_signals(&markets, &StatsByKey::new(), &[], dec!(1000));
        assert!(signals.is_empty(), "{name}");
    }
}

#[test]
fn unknown_strategy_name_is_a_config_error() {
    let err = StrategyRegistry::builtin()
        .create("aggressive", strategy_settings())
        .err()
        .expect("unknown name");

    assert!(matches!(err, ConfigError::UnknownStrategy { .. }));
    assert_eq!(
        err.to_string(),
        "unknown strategy 'aggressive' (available: balanced, high_yield)"
    );
}
