//! Timestamp filtering of downloaded item metadata.
//!
//! Applies a resolved [`TimeFrame`] to metadata records, one JSON object per
//! line, keeping the items whose timestamp falls inside the frame.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::timeframe::TimeFrame;

/// Summary of one filtering pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FilterStats {
    pub kept: usize,
    pub dropped: usize,
    pub skipped: usize,
}

/// Extract the calendar date of an item from its metadata.
///
/// Platform dumps are not consistent about timestamp shape, so `key` may hold
/// an ISO date, an RFC 3339 timestamp, or integer epoch seconds.
pub fn item_date(item: &Value, key: &str) -> Option<NaiveDate> {
    match item.get(key)? {
        Value::String(s) => {
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Some(date);
            }
            DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
        }
        Value::Number(n) => DateTime::from_timestamp(n.as_i64()?, 0).map(|dt| dt.date_naive()),
        _ => None,
    }
}

/// Stream metadata records from `input` to `output`, keeping the items whose
/// timestamp under `key` falls inside `frame`. Items without a usable
/// timestamp are skipped with a warning; a line that is not valid JSON aborts
/// the pass.
pub fn filter_lines<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    frame: &TimeFrame,
    key: &str,
) -> Result<FilterStats> {
    let mut stats = FilterStats::default();
    for line in input.lines() {
        let line = line.context("failed to read metadata records")?;
        if line.trim().is_empty() {
            continue;
        }
        let item: Value =
            serde_json::from_str(&line).context("metadata record is not valid JSON")?;
        match item_date(&item, key) {
            Some(date) if frame.contains(date) => {
                writeln!(output, "{line}")?;
                stats.kept += 1;
            }
            Some(_) => stats.dropped += 1,
            None => {
                log::warn!("item has no usable timestamp under {key:?}, skipping");
                stats.skipped += 1;
            }
        }
    }
    Ok(stats)
}
