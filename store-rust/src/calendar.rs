use chrono::{Datelike, Duration, Local, NaiveDate};

#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Monday of the ISO week containing `date`. Sundays belong to the week
/// that started six days earlier, so the result is never after `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[must_use]
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// `(month, year)` with a 1-based month.
#[must_use]
pub fn current_month(date: NaiveDate) -> (u32, i32) {
    (date.month(), date.year())
}
