use std::error::Error;
use std::fmt;

use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::models::trip::TripPlan;

const DEFAULT_TRAVELERS: u32 = 1;
const DEFAULT_DAYS_COUNT: usize = 4;
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    MissingDestination,
    MissingDates,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingDestination => write!(f, "Destination is required"),
            ValidationError::MissingDates => write!(f, "Start and end date are required"),
        }
    }
}

impl Error for ValidationError {}

/// Validates and normalizes a raw, untyped request body into a [`TripPlan`].
///
/// Pure function of the input: no external calls are made here, so rejected
/// requests never cost an upstream invocation.
pub fn normalize_trip_request(body: &Value) -> Result<TripPlan, ValidationError> {
    let destination = string_field(body, "destination");
    let start_date = string_field(body, "startDate");
    let end_date = string_field(body, "endDate");

    if destination.is_empty() {
        return Err(ValidationError::MissingDestination);
    }
    if start_date.is_empty() || end_date.is_empty() {
        return Err(ValidationError::MissingDates);
    }

    // Zero is treated as unset, the same way the source's falsy check does.
    let travelers = number_field(&body["travelers"])
        .filter(|n| *n > 0.0)
        .map(|n| n as u32)
        .unwrap_or(DEFAULT_TRAVELERS);
    let budget = match &body["budget"] {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        other => number_field(other),
    };
    let interests = match &body["interests"] {
        Value::Array(items) => items.iter().map(value_as_text).collect(),
        _ => Vec::new(),
    };

    let days_count = num_days_inclusive(&start_date, &end_date);
    let date_labels = (0..days_count)
        .map(|i| date_label_for_day(&start_date, i))
        .collect();

    Ok(TripPlan {
        destination,
        start_date,
        end_date,
        travelers,
        budget,
        interests,
        days_count,
        date_labels,
    })
}

/// Inclusive day span between two ISO dates. Unparseable input falls back to
/// a 4-day trip; an end before the start collapses to a single day rather
/// than being rejected.
pub fn num_days_inclusive(start: &str, end: &str) -> usize {
    let s = NaiveDate::parse_from_str(start, DATE_FORMAT);
    let e = NaiveDate::parse_from_str(end, DATE_FORMAT);
    match (s, e) {
        (Ok(s), Ok(e)) => (e - s).num_days().max(0) as usize + 1,
        _ => DEFAULT_DAYS_COUNT,
    }
}

/// Canonical label for the day at `day_index`: the start date plus that many
/// days as `YYYY-MM-DD`, or `"Day N"` when the start date does not parse.
pub fn date_label_for_day(start: &str, day_index: usize) -> String {
    match NaiveDate::parse_from_str(start, DATE_FORMAT) {
        Ok(s) => (s + Duration::days(day_index as i64))
            .format(DATE_FORMAT)
            .to_string(),
        Err(_) => format!("Day {}", day_index + 1),
    }
}

fn string_field(body: &Value, key: &str) -> String {
    body[key].as_str().unwrap_or("").trim().to_string()
}

// Accepts both JSON numbers and numeric strings; anything else is None.
fn number_field(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
