//! Configuration management with validation and defaults
//!
//! Statutory prize amounts and query defaults live here and are injected
//! into the engine at construction; nothing is process-global.

use crate::common::amount::Amount;
use crate::engine::prize::{PrizeSchedule, STATUTORY_FIXED_AMOUNTS};
use crate::engine::tier::Tier;
use crate::errors::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Complete checker configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub prizes: PrizeConfig,
    pub query: QueryConfig,
    pub logging: LoggingConfig,
}

/// Fixed payouts keyed by tier name (`tier3` .. `tier9`), laid over the
/// statutory amounts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrizeConfig {
    pub fixed_amounts: BTreeMap<String, Amount>,
}

impl Default for PrizeConfig {
    fn default() -> Self {
        Self {
            fixed_amounts: STATUTORY_FIXED_AMOUNTS
                .iter()
                .map(|(tier, yuan)| (tier.name().to_string(), Amount::from_yuan(*yuan)))
                .collect(),
        }
    }
}

impl PrizeConfig {
    /// Resolve tier names into the engine's payout schedule.
    ///
    /// Tiers missing from `fixed_amounts` keep their statutory amount;
    /// tier3..tier9 never fall back to the draw's prize table.
    pub fn schedule(&self) -> Result<PrizeSchedule, ConfigurationError> {
        let mut fixed: BTreeMap<Tier, Amount> = STATUTORY_FIXED_AMOUNTS
            .iter()
            .map(|(tier, yuan)| (*tier, Amount::from_yuan(*yuan)))
            .collect();

        for (name, amount) in &self.fixed_amounts {
            let invalid = |reason: String| ConfigurationError::InvalidValue {
                field: format!("prizes.fixed_amounts.{}", name),
                value: amount.to_string(),
                reason,
            };

            let tier: Tier = name.parse().map_err(invalid)?;
            if matches!(tier, Tier::First | Tier::Second) {
                return Err(invalid(
                    "tier1 and tier2 are pari-mutuel and always read from the draw".to_string(),
                ));
            }
            fixed.insert(tier, *amount);
        }

        Ok(PrizeSchedule::new(fixed))
    }
}

/// Range query defaults
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Draws checked when the caller gives no count
    pub default_num_draws: usize,
    /// Most recent draws kept from the data provider
    pub page_size: usize,
    /// Scoped threads per check (1 = sequential)
    pub worker_threads: usize,
    pub include_additional: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_num_draws: 5,
            page_size: 30,
            worker_threads: 1,
            include_additional: false,
        }
    }
}

/// Logging configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Filter string for env_logger
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

impl CheckerConfig {
    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.query.default_num_draws == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "query.default_num_draws".to_string(),
                value: "0".to_string(),
                reason: "at least one draw must be checked".to_string(),
            });
        }

        if self.query.page_size == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "query.page_size".to_string(),
                value: "0".to_string(),
                reason: "page size must be > 0".to_string(),
            });
        }

        if self.query.worker_threads == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "query.worker_threads".to_string(),
                value: "0".to_string(),
                reason: "worker_threads must be > 0".to_string(),
            });
        }

        if self.query.default_num_draws > self.query.page_size {
            return Err(ConfigurationError::ValidationFailed(format!(
                "default_num_draws ({}) exceeds page_size ({})",
                self.query.default_num_draws, self.query.page_size
            )));
        }

        self.prizes.schedule().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draws::{Draw, DrawNumber, DrawStore, PrizeEntry};
    use crate::engine::checker::Checker;
    use crate::engine::prize::PayoutSource;
    use crate::ticket::Ticket;

    #[test]
    fn test_default_config_is_valid() {
        let config = CheckerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_schedule_is_statutory() {
        let schedule = CheckerConfig::default().prizes.schedule().unwrap();
        assert_eq!(schedule, PrizeSchedule::statutory());
        assert_eq!(schedule.source(Tier::First), PayoutSource::FromSource);
        assert_eq!(schedule.source(Tier::Third), PayoutSource::Fixed(Amount::from_yuan(10_000)));
    }

    #[test]
    fn test_invalid_config_validation() {
        let mut config = CheckerConfig::default();
        config.query.page_size = 0;
        assert!(config.validate().is_err());

        let mut config = CheckerConfig::default();
        config.query.worker_threads = 0;
        assert!(config.validate().is_err());

        let mut config = CheckerConfig::default();
        config.query.default_num_draws = 31;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_pari_mutuel_tiers_cannot_be_fixed() {
        let mut config = CheckerConfig::default();
        config
            .prizes
            .fixed_amounts
            .insert("tier1".to_string(), Amount::from_yuan(5_000_000));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_tier_name_rejected() {
        let mut config = CheckerConfig::default();
        config
            .prizes
            .fixed_amounts
            .insert("tier10".to_string(), Amount::from_yuan(1));
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_partial_toml_keeps_statutory_amounts() {
        let config: CheckerConfig = toml::from_str(
            r#"
            [query]
            default_num_draws = 3

            [prizes.fixed_amounts]
            tier9 = "6.00"
            "#,
        )
        .unwrap();

        assert_eq!(config.query.default_num_draws, 3);
        assert_eq!(config.query.page_size, 30);
        assert_eq!(config.prizes.fixed_amounts.len(), 1);
        assert_eq!(config.logging.level, LogLevel::Info);

        let schedule = config.prizes.schedule().unwrap();
        assert_eq!(schedule.source(Tier::Ninth), PayoutSource::Fixed(Amount::from_yuan(6)));
        assert_eq!(schedule.source(Tier::Eighth), PayoutSource::Fixed(Amount::from_yuan(15)));
        assert_eq!(schedule.source(Tier::Third), PayoutSource::Fixed(Amount::from_yuan(10_000)));
        assert_eq!(schedule.source(Tier::First), PayoutSource::FromSource);
    }

    #[test]
    fn test_partial_prize_config_ignores_draw_table_for_fixed_tiers() {
        let config: CheckerConfig = toml::from_str(
            r#"
            [prizes.fixed_amounts]
            tier9 = "6.00"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_ok());

        let draw = Draw::new("25001", "2025-01-01", &["01", "02", "03", "04", "05"], &["06", "07"])
            .with_prize("三等奖", PrizeEntry::new("---"))
            .with_prize("八等奖", PrizeEntry::new("---"));
        let store = DrawStore::new(vec![draw]).unwrap();
        let tickets = vec![
            Ticket::new(&[1, 2, 3, 30, 31], &[6, 12]).unwrap(),
            Ticket::new(&[1, 2, 3, 4, 5], &[1, 2]).unwrap(),
        ];

        let report = Checker::from_config(&config)
            .unwrap()
            .check(&tickets, &store, &DrawNumber::from("25001"), 1, false)
            .unwrap();

        let eighth = &report.line_items[0].result;
        assert_eq!(eighth.tier, Some(Tier::Eighth));
        assert_eq!(eighth.base_amount, Amount::from_yuan(15));

        let third = &report.line_items[1].result;
        assert_eq!(third.tier, Some(Tier::Third));
        assert_eq!(third.base_amount, Amount::from_yuan(10_000));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
