//! Application layer: configuration and orchestration of the allocator.

mod allocator;
pub mod config;

pub use allocator::{build_notifier_registry, Allocator, RiskReport};
pub use config::{
    Config, ExecutionConfig, LoggingConfig, PoolsConfig, RiskConfig, ScoringConfig,
    StrategyConfig, TelegramAppConfig, WalletConfig,
};
