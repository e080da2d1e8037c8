//! Meeting-time grammar.
//!
//! A schedule string is one or more comma-separated segments of the form
//! `<DayCodes> <start> - <end>`, e.g. `"MWF 9:00 AM - 10:30 AM"` or
//! `"TTH 13:00 - 14:30, F 9 - 11 AM"`. A start without AM/PM takes the end's.
//! Malformed segments are skipped and reported as [`ParseWarning`]s; parsing
//! itself never fails.

use std::ops::Range;

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

use super::day::DayName;

/// A meeting block truncated to whole hours. `start_hour < end_hour` always.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub days: Vec<DayName>,
    pub start_hour: u8,
    pub end_hour: u8,
}

impl TimeRange {
    pub fn hours(&self) -> Range<u8> {
        self.start_hour..self.end_hour
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    #[error("no schedule given for {class}")]
    NoSchedule { class: String },
    #[error("unrecognized day code `{code}` in `{segment}`")]
    UnknownDayCode { segment: String, code: String },
    #[error("expected `<days> <start> - <end>` in `{segment}`")]
    MissingTimes { segment: String },
    #[error("unreadable time `{time}` in `{segment}`")]
    InvalidTime { segment: String, time: String },
    #[error("`{segment}` covers no whole hour ({start}:00 to {end}:00)")]
    EmptyRange { segment: String, start: u8, end: u8 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub ranges: Vec<TimeRange>,
    pub warnings: Vec<ParseWarning>,
}

pub fn parse_schedule(input: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for segment in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match parse_segment(segment) {
            Ok(range) => outcome.ranges.push(range),
            Err(warning) => {
                tracing::debug!(%warning, "skipping schedule segment");
                outcome.warnings.push(warning);
            }
        }
    }

    outcome
}

fn parse_segment(segment: &str) -> Result<TimeRange, ParseWarning> {
    let missing_times = || ParseWarning::MissingTimes {
        segment: segment.to_string(),
    };

    let (code, times) = segment.split_once(char::is_whitespace).ok_or_else(missing_times)?;
    let (start, end) = times.split_once(['-', '\u{2013}']).ok_or_else(missing_times)?;

    let days = expand_day_code(code).ok_or_else(|| ParseWarning::UnknownDayCode {
        segment: segment.to_string(),
        code: code.to_string(),
    })?;

    let end_hour = parse_hour(end).ok_or_else(|| ParseWarning::InvalidTime {
        segment: segment.to_string(),
        time: end.trim().to_string(),
    })?;
    let start_hour = match (meridiem(start), meridiem(end)) {
        (None, Some(shared)) => {
            parse_hour_sharing(start, shared, end_hour).or_else(|| parse_hour(start))
        }
        _ => parse_hour(start),
    }
    .ok_or_else(|| ParseWarning::InvalidTime {
        segment: segment.to_string(),
        time: start.trim().to_string(),
    })?;

    if start_hour >= end_hour {
        return Err(ParseWarning::EmptyRange {
            segment: segment.to_string(),
            start: start_hour,
            end: end_hour,
        });
    }

    Ok(TimeRange {
        days,
        start_hour,
        end_hour,
    })
}

/// Expand a day code such as `MWF` or `TTH` into its days, in week order.
pub fn expand_day_code(code: &str) -> Option<Vec<DayName>> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    if let Some(day) = DayName::from_name(code) {
        return Some(vec![day]);
    }
    // `Weds` or `Thursdy` reads as a misspelled name, not as letter codes.
    if DayName::from_short_prefix(code).is_some() {
        return None;
    }

    let upper = code.to_ascii_uppercase();
    let mut rest = upper.as_str();
    let mut days = Vec::new();

    while !rest.is_empty() {
        let (day, len) = match rest.get(..2) {
            Some("TH") => (DayName::Thursday, 2),
            Some("TU") => (DayName::Tuesday, 2),
            Some("SA") => (DayName::Saturday, 2),
            Some("SU") => (DayName::Sunday, 2),
            _ => {
                let day = match rest.chars().next()? {
                    'M' => DayName::Monday,
                    'T' => DayName::Tuesday,
                    'W' => DayName::Wednesday,
                    'R' => DayName::Thursday,
                    'F' => DayName::Friday,
                    'S' => DayName::Saturday,
                    'U' => DayName::Sunday,
                    _ => return None,
                };
                (day, 1)
            }
        };
        days.push(day);
        rest = &rest[len..];
    }

    days.sort();
    days.dedup();
    Some(days)
}

fn meridiem(raw: &str) -> Option<&'static str> {
    let raw = raw.trim().to_ascii_uppercase();
    if raw.ends_with("AM") {
        Some("AM")
    } else if raw.ends_with("PM") {
        Some("PM")
    } else {
        None
    }
}

/// Start of `1 - 2:30 PM`, read with the end's AM/PM. A PM start that
/// would land after the end (`11 - 1 PM`) is read as AM.
fn parse_hour_sharing(start: &str, shared: &str, end_hour: u8) -> Option<u8> {
    let start = start.trim();
    let hour = parse_hour(&format!("{start} {shared}"))?;
    if shared == "PM" && hour > end_hour {
        return parse_hour(&format!("{start} AM"));
    }
    Some(hour)
}

/// Hour of day (0-23) for `9:00 AM`, `9 am`, `9:00AM` or `13:30`. Minutes
/// are dropped, never rounded.
fn parse_hour(raw: &str) -> Option<u8> {
    let raw = raw.trim().to_ascii_uppercase();

    let time = match raw
        .strip_suffix("AM")
        .map(|clock| (clock, "AM"))
        .or_else(|| raw.strip_suffix("PM").map(|clock| (clock, "PM")))
    {
        Some((clock, meridiem)) => {
            let clock = clock.trim();
            let clock = if clock.contains(':') {
                clock.to_string()
            } else {
                format!("{clock}:00")
            };
            NaiveTime::parse_from_str(&format!("{clock} {meridiem}"), "%I:%M %p").ok()?
        }
        None => NaiveTime::parse_from_str(&raw, "%H:%M").ok()?,
    };

    u8::try_from(time.hour()).ok()
}
