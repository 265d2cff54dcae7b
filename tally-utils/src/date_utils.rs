use thiserror::*;

use time::macros::format_description;
use time::{Date, Duration, Month, Weekday};

#[derive(Debug, Error)]
pub enum TallyDateUtilsError {
    #[error("Invalid date: {0}")]
    DateError(#[from] time::error::ComponentRange),
}

/// First and last calendar date of the given month, inclusive.
#[allow(deprecated)]
pub fn month_bounds(year: i32, month: u8) -> Result<(Date, Date), TallyDateUtilsError> {
    let month = Month::try_from(month)?;
    let first = Date::from_calendar_date(year, month, 1)?;
    let last = Date::from_calendar_date(year, month, time::util::days_in_year_month(year, month))?;
    Ok((first, last))
}

pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

pub fn format_iso_date(date: Date) -> String {
    let iso_format = format_description!("[year]-[month]-[day]");
    date.format(&iso_format)
        .expect("Every valid date has an ISO rendering, right?  Right?? :-O")
}

pub fn format_clock_time(time: time::Time) -> String {
    let clock_format = format_description!("[hour]:[minute]");
    time.format(&clock_format)
        .expect("Every valid time has an hour:minute rendering")
}

pub fn iter_dates(from: Date, to: Date) -> DateIterator {
    DateIterator::new(from, to)
}

/// Inclusive day-by-day iterator over a calendar date range.
pub struct DateIterator {
    current: Date,
    end: Date,
}

impl DateIterator {
    pub fn new(from: Date, to: Date) -> Self {
        Self {
            current: from,
            end: to,
        }
    }
}

impl Iterator for DateIterator {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current > self.end {
            None
        } else {
            let next = self.current;
            self.current = self.current.saturating_add(Duration::days(1));
            Some(next)
        }
    }
}
