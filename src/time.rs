use std::ops::Sub;

use chrono::{Datelike, Duration, Utc, Weekday};

/// Milliseconds since the Unix epoch, UTC
pub fn timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Move `moment` back to the most recent `start` day, keeping the time of day if it has one
pub fn start_of_week<D>(moment: D, start: Weekday) -> D
where
    D: Datelike + Sub<Duration, Output = D>,
{
    let offset = (7 + moment.weekday().num_days_from_monday() - start.num_days_from_monday()) % 7;
    moment - Duration::days(i64::from(offset))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc, Weekday};

    use super::{start_of_week, timestamp_millis};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn week_start_moves_backwards() {
        let wednesday = date(2024, 5, 15);
        assert_eq!(start_of_week(wednesday, Weekday::Mon), date(2024, 5, 13));
        assert_eq!(start_of_week(wednesday, Weekday::Sun), date(2024, 5, 12));
        assert_eq!(start_of_week(wednesday, Weekday::Wed), wednesday);
        assert_eq!(start_of_week(wednesday, Weekday::Thu), date(2024, 5, 9));
    }

    #[test]
    fn week_start_keeps_time_of_day() {
        let moment = Utc.with_ymd_and_hms(2024, 5, 15, 13, 45, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 13, 13, 45, 0).unwrap();
        assert_eq!(start_of_week(moment, Weekday::Mon), expected);
    }

    #[test]
    fn timestamp_is_after_2020() {
        assert!(timestamp_millis() > 1_577_836_800_000);
    }
}
