//! Day-granularity date arithmetic on GMT instants.
//!
//! Only calendar day boundaries matter to the account: two instants on the
//! same UTC date are the same day, whatever their time of day.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use crate::errors::{AccountError, Result};

/// midnight at the start of the UTC day containing `time`
pub fn normalize_to_midnight(time: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&time.date_naive().and_time(NaiveTime::default()))
}

/// whole calendar days from `earlier` to `later`, negative when `later` comes first
pub fn day_difference(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    (later.date_naive() - earlier.date_naive()).num_days()
}

/// same time of day, `days` calendar days later
///
/// Fails with `InvalidDate` when the result is outside the supported calendar.
pub fn add_days(time: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    Duration::try_days(days)
        .and_then(|delta| time.checked_add_signed(delta))
        .ok_or_else(|| AccountError::InvalidDate {
            message: format!("{} days after {} is out of range", days, time),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_to_midnight() {
        let t = Utc.with_ymd_and_hms(2012, 2, 27, 17, 45, 12).unwrap();
        let midnight = normalize_to_midnight(t);
        assert_eq!(midnight, Utc.with_ymd_and_hms(2012, 2, 27, 0, 0, 0).unwrap());
        assert_eq!(normalize_to_midnight(midnight), midnight);
    }

    #[test]
    fn test_day_difference_ignores_time_of_day() {
        let start = Utc.with_ymd_and_hms(2012, 2, 27, 23, 59, 59).unwrap();
        let next_morning = Utc.with_ymd_and_hms(2012, 2, 28, 0, 0, 1).unwrap();
        assert_eq!(day_difference(next_morning, start), 1);

        let same_day = Utc.with_ymd_and_hms(2012, 2, 27, 0, 0, 0).unwrap();
        assert_eq!(day_difference(start, same_day), 0);
    }

    #[test]
    fn test_day_difference_negative() {
        let a = Utc.with_ymd_and_hms(2012, 3, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2012, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(day_difference(a, b), -4);
    }

    #[test]
    fn test_add_days_across_leap_day() {
        let start = Utc.with_ymd_and_hms(2012, 2, 27, 0, 0, 0).unwrap();
        let later = add_days(start, 3).unwrap();
        assert_eq!(later, Utc.with_ymd_and_hms(2012, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(day_difference(later, start), 3);
    }

    #[test]
    fn test_add_days_out_of_range() {
        let start = Utc.with_ymd_and_hms(2012, 2, 27, 0, 0, 0).unwrap();
        assert!(matches!(
            add_days(start, i64::from(u32::MAX)),
            Err(AccountError::InvalidDate { .. })
        ));
        assert!(matches!(add_days(start, i64::MAX), Err(AccountError::InvalidDate { .. })));
        assert!(add_days(start, -3).is_ok());
    }
}
