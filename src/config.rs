use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{AccountError, Result};
use crate::types::CorrectionPolicy;

/// account configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// annual percentage rate as a decimal, within [0, 1)
    pub apr: Rate,
    pub credit_limit: Money,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub correction_policy: CorrectionPolicy,
}

impl AccountConfig {
    pub fn new(apr: Rate, credit_limit: Money, start_date: DateTime<Utc>) -> Self {
        Self {
            apr,
            credit_limit,
            start_date,
            correction_policy: CorrectionPolicy::default(),
        }
    }

    /// parse and validate a json document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AccountConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.apr.is_valid_apr() {
            return Err(AccountError::InvalidInterestRate { rate: self.apr });
        }

        if !self.credit_limit.is_positive() {
            return Err(AccountError::InvalidConfiguration {
                message: format!("credit limit must be positive, got {}", self.credit_limit),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn config() -> AccountConfig {
        AccountConfig::new(
            Rate::from_percentage(35),
            Money::from_major(1_000),
            Utc.with_ymd_and_hms(2012, 2, 27, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
        assert_eq!(config().correction_policy, CorrectionPolicy::AlwaysAccept);
    }

    #[test]
    fn test_rejects_bad_apr() {
        let mut c = config();
        c.apr = Rate::ONE;
        assert!(matches!(c.validate(), Err(AccountError::InvalidInterestRate { .. })));

        c.apr = Rate::from_decimal(dec!(-0.1));
        assert!(matches!(c.validate(), Err(AccountError::InvalidInterestRate { .. })));
    }

    #[test]
    fn test_rejects_non_positive_limit() {
        let mut c = config();
        c.credit_limit = Money::ZERO;
        assert!(matches!(c.validate(), Err(AccountError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_json_round_trip() {
        let json = config().to_json_pretty().unwrap();
        assert_eq!(AccountConfig::from_json(&json).unwrap(), config());
    }

    #[test]
    fn test_json_defaults_policy() {
        let json = r#"{
            "apr": "0.2",
            "credit_limit": "2500",
            "start_date": "2024-01-01T00:00:00Z"
        }"#;
        let config = AccountConfig::from_json(json).unwrap();
        assert_eq!(config.apr, Rate::from_percentage(20));
        assert_eq!(config.credit_limit, Money::from_major(2_500));
        assert_eq!(config.correction_policy, CorrectionPolicy::AlwaysAccept);
    }

    #[test]
    fn test_json_invalid_values_fail() {
        let json = r#"{
            "apr": "1.5",
            "credit_limit": "2500",
            "start_date": "2024-01-01T00:00:00Z",
            "correction_policy": "Enforce"
        }"#;
        assert!(AccountConfig::from_json(json).is_err());
        assert!(AccountConfig::from_json("not json").is_err());
    }
}
