//! Workday arithmetic for matching news dates to trading days

use chrono::{Datelike, Days, NaiveDate, Weekday};
use tracing::debug;

/// Find the closest workday and the previous workday for a date.
///
/// A workday is any day that is not Saturday or Sunday:
/// - Saturday and Sunday map back to Friday, with Thursday as the previous
///   workday.
/// - Monday's previous workday is the Friday of the prior week.
/// - Any other weekday pairs with the calendar day before it.
pub fn find_workdays(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let closest = match date.weekday() {
        Weekday::Sat => date - Days::new(1),
        Weekday::Sun => date - Days::new(2),
        _ => date,
    };

    let mut previous = closest - Days::new(1);
    while matches!(previous.weekday(), Weekday::Sat | Weekday::Sun) {
        previous = previous - Days::new(1);
    }

    debug!(%date, %closest, %previous, "resolved workdays");

    (closest, previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_saturday_maps_to_friday_and_thursday() {
        // 2025-05-17 is a Saturday
        assert_eq!(
            find_workdays(date("2025-05-17")),
            (date("2025-05-16"), date("2025-05-15"))
        );
    }

    #[test]
    fn test_sunday_maps_to_friday_and_thursday() {
        // 2025-05-18 is a Sunday
        assert_eq!(
            find_workdays(date("2025-05-18")),
            (date("2025-05-16"), date("2025-05-15"))
        );
    }

    #[test]
    fn test_monday_pairs_with_previous_friday() {
        // 2025-05-19 is a Monday
        assert_eq!(
            find_workdays(date("2025-05-19")),
            (date("2025-05-19"), date("2025-05-16"))
        );
    }

    #[test]
    fn test_midweek_pairs_with_the_day_before() {
        // 2025-05-21 is a Wednesday
        assert_eq!(
            find_workdays(date("2025-05-21")),
            (date("2025-05-21"), date("2025-05-20"))
        );
    }
}
