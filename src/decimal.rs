use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// Money type with 8 decimal places of working precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(8))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s.trim())?.round_dp(8)))
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents)
    pub fn from_minor(amount: i64, scale: u32) -> Self {
        let d = Decimal::from(amount) / Decimal::from(10_u64.pow(scale));
        Money(d.round_dp(8))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// addition, `None` when the sum leaves the decimal range
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(|d| Money(d.round_dp(8)))
    }

    /// subtraction, `None` when the difference leaves the decimal range
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(|d| Money(d.round_dp(8)))
    }

    /// simple interest on this amount at an annual rate for a number of days,
    /// `None` on overflow
    pub fn apply_rate(&self, annual_rate: Rate, days: u32) -> Option<Money> {
        self.0
            .checked_mul(annual_rate.daily_rate().as_decimal())?
            .checked_mul(Decimal::from(days))
            .map(|interest| Money(interest.round_dp(8)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

/// rate type for annual percentage rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);
    pub const ONE: Rate = Rate(Decimal::ONE);

    /// create from decimal (e.g., 0.35 for 35%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 35 for 35%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    /// create from string, e.g. "0.35"
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Rate(Decimal::from_str(s.trim())?))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    /// daily rate from annual rate on a 365 day year
    pub fn daily_rate(&self) -> Rate {
        Rate(self.0 / Decimal::from(365))
    }

    /// usable as an APR: within [0, 1)
    pub fn is_valid_apr(&self) -> bool {
        *self >= Rate::ZERO && *self < Rate::ONE
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(Money::from_minor(51438, 2), Money::from_decimal(dec!(514.38)));
    }

    #[test]
    fn test_interest_calculation() {
        let principal = Money::from_major(500);
        let apr = Rate::from_percentage(35);

        let cycle_interest = principal.apply_rate(apr, 30).unwrap();
        assert_eq!(cycle_interest.round_dp(2), Money::from_decimal(dec!(14.38)));

        let annual_interest = principal.apply_rate(apr, 365).unwrap();
        assert_eq!(annual_interest.round_dp(2), Money::from_decimal(dec!(175.00)));
    }

    #[test]
    fn test_zero_days_accrue_nothing() {
        let principal = Money::from_major(960);
        assert!(principal.apply_rate(Rate::from_percentage(35), 0).unwrap().is_zero());
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert_eq!(huge.checked_add(Money::from_major(1)), None);
        assert_eq!((-huge).checked_sub(Money::from_major(1)), None);

        let sum = Money::from_major(500).checked_add(Money::from_minor(1438, 2));
        assert_eq!(sum, Some(Money::from_decimal(dec!(514.38))));
    }

    #[test]
    fn test_apr_bounds() {
        assert!(Rate::ZERO.is_valid_apr());
        assert!(Rate::from_decimal(dec!(0.99)).is_valid_apr());
        assert!(!Rate::ONE.is_valid_apr());
        assert!(!Rate::from_decimal(dec!(-0.01)).is_valid_apr());
    }

    #[test]
    fn test_sign_helpers() {
        let m = Money::from_major(-100);
        assert!(m.is_negative());
        assert!(!m.is_positive());
        assert_eq!(-m, Money::from_major(100));
        assert!(!Money::ZERO.is_positive());
    }
}
