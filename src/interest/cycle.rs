use chrono::{DateTime, Utc};

use crate::time;
use crate::transaction::Transaction;

/// number of days in one billing cycle
pub const DAYS_PER_CYCLE: u32 = 30;

/// maps instants to billing cycles counted from the account opening day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleCalculator {
    start_date: DateTime<Utc>,
}

impl CycleCalculator {
    pub fn new(start_date: DateTime<Utc>) -> Self {
        Self { start_date }
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// calendar days since opening, negative before it
    pub fn days_since_start(&self, time: DateTime<Utc>) -> i64 {
        time::day_difference(time, self.start_date)
    }

    /// zero-based cycle index; instants before opening count as cycle 0
    pub fn cycle_of(&self, time: DateTime<Utc>) -> u32 {
        self.cycle_of_day(self.day_offset(time))
    }

    /// zero-based day within the cycle, 0..=29
    pub fn day_in_cycle(&self, time: DateTime<Utc>) -> u32 {
        self.day_offset(time) % DAYS_PER_CYCLE
    }

    pub fn cycle_of_day(&self, day: u32) -> u32 {
        day / DAYS_PER_CYCLE
    }

    pub fn cycle_of_transaction(&self, transaction: &Transaction) -> u32 {
        self.cycle_of(transaction.timestamp())
    }

    pub fn day_of_transaction(&self, transaction: &Transaction) -> u32 {
        self.day_offset(transaction.timestamp())
    }

    fn day_offset(&self, time: DateTime<Utc>) -> u32 {
        u32::try_from(self.days_since_start(time).max(0)).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn calculator() -> CycleCalculator {
        CycleCalculator::new(Utc.with_ymd_and_hms(2012, 2, 27, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_cycle_boundaries() {
        let calc = calculator();
        let start = calc.start_date();

        assert_eq!(calc.cycle_of(start), 0);
        assert_eq!(calc.cycle_of(time::add_days(start, 29).unwrap()), 0);
        assert_eq!(calc.cycle_of(time::add_days(start, 30).unwrap()), 1);
        assert_eq!(calc.cycle_of(time::add_days(start, 65).unwrap()), 2);
        assert_eq!(calc.cycle_of(time::add_days(start, 90).unwrap()), 3);
    }

    #[test]
    fn test_day_in_cycle() {
        let calc = calculator();
        let start = calc.start_date();

        assert_eq!(calc.day_in_cycle(start), 0);
        assert_eq!(calc.day_in_cycle(time::add_days(start, 25).unwrap()), 25);
        assert_eq!(calc.day_in_cycle(time::add_days(start, 30).unwrap()), 0);
        assert_eq!(calc.day_in_cycle(time::add_days(start, 35).unwrap()), 5);
    }

    #[test]
    fn test_time_of_day_is_irrelevant() {
        let calc = calculator();
        let late = Utc.with_ymd_and_hms(2012, 3, 28, 23, 59, 59).unwrap();
        assert_eq!(calc.days_since_start(late), 30);
        assert_eq!(calc.cycle_of(late), 1);
        assert_eq!(calc.day_in_cycle(late), 0);
    }

    #[test]
    fn test_cycle_of_day() {
        let calc = calculator();
        assert_eq!(calc.cycle_of_day(0), 0);
        assert_eq!(calc.cycle_of_day(59), 1);
        assert_eq!(calc.cycle_of_day(60), 2);
    }
}
