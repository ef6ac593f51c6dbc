use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("unknown strategy '{name}' (available: {})", available.join(", "))]
    UnknownStrategy {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures of the pool data source.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    #[error("malformed data: {0}")]
    Malformed(String),
}

/// Why the risk-limit filter rejected a signal.
///
/// Rejections are expected filtering outcomes, not failures of a cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiskRejection {
    #[error("portfolio cap exceeded: {current} + {amount} > {limit}")]
    PortfolioCapExceeded {
        current: Decimal,
        amount: Decimal,
        limit: Decimal,
    },

    #[error("single pool cap exceeded for {market}: {current} + {amount} > {limit}")]
    PoolCapExceeded {
        market: String,
        current: Decimal,
        amount: Decimal,
        limit: Decimal,
    },

    #[error("below minimum position: {amount} < {minimum}")]
    BelowMinimumPosition { amount: Decimal, minimum: Decimal },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
