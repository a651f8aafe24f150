//! Time-frame token resolution.
//!
//! A time-frame token designates the date interval a download run should be
//! limited to. It is either an explicit `START:STOP` pair of ISO dates, where
//! either side may be left empty to leave it unbounded, or one of the
//! keywords `thisday`, `thisweek`, `thismonth` and `thisyear`, which are
//! resolved relative to a reference date.

use std::{fmt, str::FromStr};

use chrono::{Duration, Local, Months, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// Error returned for a token that does not designate a time frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time frame {0:?} (expected START:STOP or a keyword)")]
pub struct FormatError(pub String);

/// Reserved tokens resolved relative to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Day,
    Week,
    Month,
    Year,
}

impl FromStr for Keyword {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, FormatError> {
        match s.to_ascii_lowercase().as_str() {
            "thisday" => Ok(Keyword::Day),
            "thisweek" => Ok(Keyword::Week),
            "thismonth" => Ok(Keyword::Month),
            "thisyear" => Ok(Keyword::Year),
            _ => Err(FormatError(s.to_string())),
        }
    }
}

impl Keyword {
    /// The older bound of the span this keyword covers, counted back from
    /// `today`. Months and years are calendar-accurate, not fixed day counts,
    /// so a span ending on the 31st lands on the last valid day of the
    /// target month.
    fn stop(self, today: NaiveDate) -> NaiveDate {
        match self {
            Keyword::Day => today,
            Keyword::Week => today - Duration::days(7),
            Keyword::Month => today.checked_sub_months(Months::new(1)).unwrap_or(today),
            Keyword::Year => today.checked_sub_months(Months::new(12)).unwrap_or(today),
        }
    }

    fn frame(self, today: NaiveDate) -> TimeFrame {
        TimeFrame {
            start: Some(today),
            stop: Some(self.stop(today)),
        }
    }
}

/// A resolved date interval.
///
/// `start` is the newer bound and `stop` the older one, matching the keyword
/// orientation (`thisweek` runs from today back to a week ago). `None` leaves
/// that side unbounded. Explicit input is kept exactly as given: a reversed
/// pair is returned literally, never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeFrame {
    pub start: Option<NaiveDate>,
    pub stop: Option<NaiveDate>,
}

impl TimeFrame {
    /// Whether `date` falls inside the frame, bounds inclusive. An unbounded
    /// side admits everything on that side.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date <= start)
            && self.stop.map_or(true, |stop| date >= stop)
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        write!(f, ":")?;
        if let Some(stop) = self.stop {
            write!(f, "{stop}")?;
        }
        Ok(())
    }
}

/// Resolve a time-frame token against the local wall-clock date.
pub fn resolve(token: &str) -> Result<TimeFrame, FormatError> {
    resolve_at(token, Local::now().date_naive())
}

/// Resolve a time-frame token against an explicit reference date.
///
/// Passing the reference date keeps resolution a pure function of its
/// arguments; [`resolve`] is the wall-clock convenience wrapper.
pub fn resolve_at(token: &str, today: NaiveDate) -> Result<TimeFrame, FormatError> {
    let parts: Vec<&str> = token.split(':').collect();
    match parts.as_slice() {
        [keyword] => Ok(keyword.parse::<Keyword>()?.frame(today)),
        [start, stop] => Ok(TimeFrame {
            start: parse_bound(start, token)?,
            stop: parse_bound(stop, token)?,
        }),
        // More than one colon is malformed no matter what the parts hold.
        _ => Err(FormatError(token.to_string())),
    }
}

fn parse_bound(part: &str, token: &str) -> Result<Option<NaiveDate>, FormatError> {
    if part.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(part, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FormatError(token.to_string()))
}
