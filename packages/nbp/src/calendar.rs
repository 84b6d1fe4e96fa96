//! Day counters used to estimate publication numbers.
//!
//! Both counters are closed-form: they only look at the day of the year and
//! the weekday of January 1, so they run in constant time.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{NbpError, Result};

/// Build a calendar date, failing with `InvalidDate` on out-of-range parts.
///
/// # Examples
/// ```
/// use nbp_rates::calendar::date;
///
/// assert!(date(2012, 2, 29).is_ok());
/// assert!(date(2013, 2, 29).is_err());
/// ```
pub fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| NbpError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
}

/// Weekday of January 1 in the year of `date`, counted from Monday (0..=6).
fn first_weekday_of_year(date: NaiveDate) -> u32 {
    let elapsed = date.ordinal0() % 7;
    (date.weekday().num_days_from_monday() + 7 - elapsed) % 7
}

/// Count Monday-to-Friday days from January 1 through `date`, inclusive.
///
/// A weekend date does not add to the count, so it yields the count of the
/// preceding Friday (or 0 if no weekday has passed yet this year).
///
/// # Examples
/// ```
/// use nbp_rates::calendar::{count_working_days, date};
///
/// // 2012-01-01 is a Sunday, 2012-01-02 a Monday
/// assert_eq!(count_working_days(date(2012, 1, 1).unwrap()), 0);
/// assert_eq!(count_working_days(date(2012, 1, 2).unwrap()), 1);
/// ```
pub fn count_working_days(date: NaiveDate) -> u32 {
    let days = date.ordinal();
    let first = first_weekday_of_year(date);
    let full_weeks = days / 7;
    let partial = (0..days % 7)
        .filter(|offset| (first + offset) % 7 < 5)
        .count() as u32;
    full_weeks * 5 + partial
}

/// Count occurrences of `weekday` from January 1 through `date`, inclusive.
pub fn count_weekday(date: NaiveDate, weekday: Weekday) -> u32 {
    let days = date.ordinal();
    let first = first_weekday_of_year(date);
    let offset = (weekday.num_days_from_monday() + 7 - first) % 7;
    if offset >= days {
        0
    } else {
        (days - 1 - offset) / 7 + 1
    }
}

/// Count Wednesdays from January 1 through `date`, inclusive.
pub fn count_wednesdays(date: NaiveDate) -> u32 {
    count_weekday(date, Weekday::Wed)
}

/// Last calendar day of the year before `year`.
pub fn last_day_of_previous_year(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.checked_sub(1)?, 12, 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        date(year, month, day).unwrap()
    }

    /// Reference implementation walking every day of the year.
    fn brute_force(date: NaiveDate, keep: impl Fn(Weekday) -> bool) -> u32 {
        let mut day = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap();
        let mut count = 0;
        while day <= date {
            if keep(day.weekday()) {
                count += 1;
            }
            day = day.succ_opt().unwrap();
        }
        count
    }

    #[test]
    fn test_date_rejects_out_of_range() {
        assert!(matches!(date(2012, 13, 1), Err(NbpError::InvalidDate(s)) if s == "2012-13-01"));
        assert!(date(2012, 4, 31).is_err());
        assert!(date(2012, 0, 1).is_err());
    }

    #[test]
    fn test_working_days_first_week_2012() {
        // Sunday
        assert_eq!(count_working_days(d(2012, 1, 1)), 0);
        // Monday through Friday
        assert_eq!(count_working_days(d(2012, 1, 2)), 1);
        assert_eq!(count_working_days(d(2012, 1, 6)), 5);
        // Weekend keeps Friday's count
        assert_eq!(count_working_days(d(2012, 1, 7)), 5);
        assert_eq!(count_working_days(d(2012, 1, 8)), 5);
        assert_eq!(count_working_days(d(2012, 1, 9)), 6);
    }

    #[test]
    fn test_working_days_known_values() {
        assert_eq!(count_working_days(d(2012, 6, 15)), 120);
        assert_eq!(count_working_days(d(2012, 12, 31)), 261);
        // 2013-01-01 is a Tuesday
        assert_eq!(count_working_days(d(2013, 1, 1)), 1);
    }

    #[test]
    fn test_wednesdays_known_values() {
        // First Wednesday of 2012 is January 4
        assert_eq!(count_wednesdays(d(2012, 1, 3)), 0);
        assert_eq!(count_wednesdays(d(2012, 1, 4)), 1);
        assert_eq!(count_wednesdays(d(2012, 1, 10)), 1);
        assert_eq!(count_wednesdays(d(2012, 1, 11)), 2);
        assert_eq!(count_wednesdays(d(2012, 12, 31)), 52);
        // 2014-01-01 is a Wednesday
        assert_eq!(count_wednesdays(d(2014, 1, 1)), 1);
    }

    #[test]
    fn test_counters_match_day_by_day_walk() {
        for year in [2011, 2012, 2013, 2014, 2015, 2016, 2020] {
            let mut day = d(year, 1, 1);
            while day.year() == year {
                assert_eq!(
                    count_working_days(day),
                    brute_force(day, |w| !matches!(w, Weekday::Sat | Weekday::Sun)),
                    "working days for {day}"
                );
                assert_eq!(
                    count_wednesdays(day),
                    brute_force(day, |w| w == Weekday::Wed),
                    "wednesdays for {day}"
                );
                day = day.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn test_last_day_of_previous_year() {
        assert_eq!(last_day_of_previous_year(2013), Some(d(2012, 12, 31)));
    }
}
