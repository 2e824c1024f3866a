//! Pure proleptic-Gregorian calendar arithmetic.
//!
//! Everything here is deterministic and total over valid input: no clock,
//! no timezone, no platform date object. Weekdays come from Zeller's
//! congruence so results are stable for every year >= 1. The weekday
//! convention throughout the crate is 1 = Sunday .. 7 = Saturday.

use crate::errors::CalendarError;
use chrono::{Datelike, NaiveDate};

pub const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

pub fn days_in_month(month: u32, year: i32) -> Result<u32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::MonthOutOfRange { month });
    }
    let mut length = MONTH_LENGTHS[month as usize - 1];
    if month == 2 && is_leap_year(year) {
        length += 1;
    }
    Ok(length)
}

/// Converts a 1-based day-of-year into a 1-based (month, day) pair.
pub fn day_of_year_to_month_day(
    day_of_year: u32,
    year: i32,
) -> Result<(u32, u32), CalendarError> {
    check_year(year)?;
    let max = days_in_year(year);
    if day_of_year < 1 || day_of_year > max {
        return Err(CalendarError::DayOfYearOutOfRange {
            day_of_year,
            year,
            max,
        });
    }

    let mut remaining = day_of_year;
    for month in 1..=12 {
        let length = days_in_month(month, year)?;
        if remaining <= length {
            return Ok((month, remaining));
        }
        remaining -= length;
    }

    // Unreachable: the range check above bounds day_of_year by the sum of
    // the month lengths.
    Err(CalendarError::DayOfYearOutOfRange {
        day_of_year,
        year,
        max,
    })
}

/// Inverse of [`day_of_year_to_month_day`].
pub fn month_day_to_day_of_year(month: u32, day: u32, year: i32) -> Result<u32, CalendarError> {
    check_year(year)?;
    let max = days_in_month(month, year)?;
    if day < 1 || day > max {
        return Err(CalendarError::DayOutOfRange {
            day,
            month,
            year,
            max,
        });
    }

    let mut day_of_year = day;
    for earlier in 1..month {
        day_of_year += days_in_month(earlier, year)?;
    }
    Ok(day_of_year)
}

/// Weekday of a date via Zeller's congruence, mapped to 1 = Sunday ..
/// 7 = Saturday.
pub fn day_of_week(year: i32, month: u32, day: u32) -> Result<u32, CalendarError> {
    month_day_to_day_of_year(month, day, year)?;

    // Zeller treats January and February as months 13 and 14 of the
    // previous year. Its raw result is 0 = Saturday .. 6 = Friday.
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let q = day as i32;
    let m = m as i32;
    let k = y.rem_euclid(100);
    let j = y.div_euclid(100);
    let h = (q + (13 * (m + 1)) / 5 + k + k / 4 + j / 4 + 5 * j).rem_euclid(7);

    Ok(((h + 6) % 7) as u32 + 1)
}

pub fn first_weekday_of_year(year: i32) -> Result<u32, CalendarError> {
    day_of_week(year, 1, 1)
}

pub fn weekday_name(year: i32, month: u32, day: u32) -> Result<&'static str, CalendarError> {
    Ok(DAY_NAMES[day_of_week(year, month, day)? as usize - 1])
}

/// 1-based day-of-year of a concrete date, typically "today". A
/// `NaiveDate` is valid by construction, so this is total.
pub fn day_of_year_for_date(date: NaiveDate) -> u32 {
    let mut day_of_year = date.day();
    for month in 1..date.month() {
        let mut length = MONTH_LENGTHS[month as usize - 1];
        if month == 2 && is_leap_year(date.year()) {
            length += 1;
        }
        day_of_year += length;
    }
    day_of_year
}

fn check_year(year: i32) -> Result<(), CalendarError> {
    if year < 1 {
        return Err(CalendarError::YearOutOfRange { year });
    }
    Ok(())
}
