//! Default evaluation period.

use chrono::{Datelike, NaiveDate};

use crate::models::Period;

/// Returns the calendar month before `today`.
///
/// Evaluations are filed for the month that just ended, so a new draft
/// defaults to it. In January this is December of the previous year.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use plexus_evaluations::calculation::previous_month;
///
/// let period = previous_month(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
/// assert_eq!((period.month, period.year), (12, 2023));
/// ```
pub fn previous_month(today: NaiveDate) -> Period {
    match today.month() {
        1 => Period {
            month: 12,
            year: today.year() - 1,
        },
        month => Period {
            month: month - 1,
            year: today.year(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mid_year() {
        assert_eq!(previous_month(date(2024, 3, 15)), Period { month: 2, year: 2024 });
    }

    #[test]
    fn test_january_wraps_to_previous_december() {
        assert_eq!(previous_month(date(2025, 1, 1)), Period { month: 12, year: 2024 });
    }

    #[test]
    fn test_december() {
        assert_eq!(previous_month(date(2024, 12, 31)), Period { month: 11, year: 2024 });
    }
}
