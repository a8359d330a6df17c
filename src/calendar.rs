//! Gregorian calendar arithmetic for walking observation date ranges.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error, Result};

/// A calendar day in the archive.
///
/// Ordering is chronological. Incrementing never mutates; `succ` hands back
/// a new value with month and year carry applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObsDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl ObsDate {
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self> {
        if !is_valid_date(year, month, day) {
            return Err(anyhow!("invalid date {}-{:02}-{:02}", year, month, day));
        }

        Ok(ObsDate { year, month, day })
    }

    pub fn first_of(year: u16) -> Self {
        ObsDate {
            year,
            month: 1,
            day: 1,
        }
    }

    pub fn last_of(year: u16) -> Self {
        ObsDate {
            year,
            month: 12,
            day: 31,
        }
    }

    /// The following calendar day.
    pub fn succ(self) -> Self {
        if self.day < days_in_month(self.year, self.month) {
            ObsDate {
                day: self.day + 1,
                ..self
            }
        } else if self.month < 12 {
            ObsDate {
                year: self.year,
                month: self.month + 1,
                day: 1,
            }
        } else {
            ObsDate {
                year: self.year + 1,
                month: 1,
                day: 1,
            }
        }
    }
}

impl fmt::Display for ObsDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for ObsDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 {
            return Err(anyhow!("expected YYYY-MM-DD, got `{}`", s));
        }

        let year = parts[0].parse()?;
        let month = parts[1].parse()?;
        let day = parts[2].parse()?;

        ObsDate::new(year, month, day)
    }
}

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

pub fn is_valid_date(year: u16, month: u8, day: u8) -> bool {
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month)
}

/// Every day from `start` to `end` inclusive, in calendar order.
///
/// The walk ends at `end` without ever taking its successor, and stops
/// early if an invalid date turns up mid-walk, keeping whatever was
/// enumerated to that point.
pub fn enumerate_days(start: ObsDate, end: ObsDate) -> Vec<ObsDate> {
    let mut days = Vec::new();
    let mut current = start;

    while current <= end {
        if !is_valid_date(current.year, current.month, current.day) {
            break;
        }
        days.push(current);
        if current == end {
            break;
        }
        current = current.succ();
    }

    days
}

// -- Tests -------------------------------------------------------------------
