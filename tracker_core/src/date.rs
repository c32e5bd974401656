//! Calendar days.
//!
//! Exercise dates carry no time of day. They are parsed once at the boundary
//! into a [`CalendarDay`] and compared as day values from then on.

use crate::{Error, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Human-readable form used for storage and responses, e.g. `Mon Jan 01 2024`
const DISPLAY_FORMAT: &str = "%a %b %d %Y";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Four-digit years only
const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// A date at day granularity
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    /// Build a day from year, month and day-of-month
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Current date in the local timezone
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse caller input.
    ///
    /// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp (its date part is used)
    /// and the stored display form. Years must lie in `0..=9999`, whatever
    /// sign or padding the input uses.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let date = NaiveDate::parse_from_str(input, ISO_FORMAT)
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(input)
                    .ok()
                    .map(|timestamp| timestamp.date_naive())
            })
            .or_else(|| NaiveDate::parse_from_str(input, DISPLAY_FORMAT).ok());

        match date {
            Some(date) if YEARS.contains(&date.year()) => Ok(Self(date)),
            _ => Err(Error::validation(format!("Invalid date: {:?}", input))),
        }
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl Serialize for CalendarDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CalendarDay::parse(&raw).map_err(serde::de::Error::custom)
    }
}
