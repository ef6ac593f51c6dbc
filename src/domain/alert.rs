//! Risk alerts and the derived portfolio risk level.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::MarketKey;

/// How serious an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Info => "ℹ️",
            Self::Warning => "⚠️",
            Self::Critical => "🚨",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which risk condition an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    Drawdown,
    StopLoss,
    Imbalance,
    ApyLow,
    Concentration,
}

impl AlertCategory {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Drawdown => "drawdown",
            Self::StopLoss => "stop_loss",
            Self::Imbalance => "imbalance",
            Self::ApyLow => "apy_low",
            Self::Concentration => "concentration",
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected risk condition.
///
/// Created once by the risk manager; the only later change is acknowledgment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAlert {
    severity: AlertSeverity,
    category: AlertCategory,
    market_key: Option<MarketKey>,
    market_name: Option<String>,
    message: String,
    /// The observed value that triggered the alert.
    value: f64,
    /// The threshold it was compared against.
    threshold: f64,
    timestamp: DateTime<Utc>,
    acknowledged: bool,
}

impl RiskAlert {
    pub fn new(
        severity: AlertSeverity,
        category: AlertCategory,
        message: impl Into<String>,
        value: f64,
        threshold: f64,
    ) -> Self {
        Self {
            severity,
            category,
            market_key: None,
            market_name: None,
            message: message.into(),
            value,
            threshold,
            timestamp: Utc::now(),
            acknowledged: false,
        }
    }

    /// Attach the market the alert concerns.
    #[must_use]
    pub fn for_market(mut self, market_key: MarketKey, market_name: impl Into<String>) -> Self {
        self.market_key = Some(market_key);
        self.market_name = Some(market_name.into());
        self
    }

    #[must_use]
    pub const fn severity(&self) -> AlertSeverity {
        self.severity
    }

    #[must_use]
    pub const fn category(&self) -> AlertCategory {
        self.category
    }

    #[must_use]
    pub const fn market_key(&self) -> Option<&MarketKey> {
        self.market_key.as_ref()
    }

    #[must_use]
    pub fn market_name(&self) -> Option<&str> {
        self.market_name.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub const fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub(crate) fn acknowledge(&mut self) {
        self.acknowledged = true;
    }
}

impl fmt::Display for RiskAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.severity.emoji(), self.category)?;
        if let Some(name) = &self.market_name {
            write!(f, " {name}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Overall risk level derived from the unacknowledged alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Normal,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Classify a set of active alerts.
    ///
    /// Any critical alert wins; otherwise three or more warnings is high and
    /// one or two is medium. Info alerts never raise the level.
    pub fn classify<'a>(alerts: impl IntoIterator<Item = &'a RiskAlert>) -> Self {
        let mut warnings = 0usize;
        for alert in alerts {
            match alert.severity() {
                AlertSeverity::Critical => return Self::Critical,
                AlertSeverity::Warning => warnings += 1,
                AlertSeverity::Info => {}
            }
        }

        match warnings {
            0 => Self::Normal,
            1 | 2 => Self::Medium,
            _ => Self::High,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
