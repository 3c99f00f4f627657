use chrono::{Datelike, Duration, NaiveDate};

/// Sunday-to-Saturday week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_from_sunday = date.weekday().num_days_from_sunday() as i64;
    let start = date - Duration::days(days_from_sunday);
    (start, start + Duration::days(6))
}
