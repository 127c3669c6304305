//! Reminder normalization
//!
//! Turns the heterogeneous reminder payloads produced by the AI helper into a
//! uniform list of `(message, optional scheduled time)` pairs.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! Accepted element shapes:
//! - `"Reminder 2: Begin task by 2025-09-14T15:37"`: label stripped, time extracted
//! - `{"message": "Call client", "time": "2025-09-14T09:00"}`
//! - anything else, rendered as compact JSON and shown immediately

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::{json, Value};
use std::sync::OnceLock;

use crate::core::{local_to_utc, parse_lenient, parse_timestamp, MINUTE_FORMAT};

/// A reminder ready for the scheduler. `scheduled_at == None` means "show now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedReminder {
    pub message: String,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl NormalizedReminder {
    pub fn immediate(message: &str) -> Self {
        Self {
            message: message.to_string(),
            scheduled_at: None,
        }
    }

    pub fn at(message: &str, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            message: message.to_string(),
            scheduled_at: Some(scheduled_at),
        }
    }
}

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^Reminder \d+: \s*").expect("label pattern compiles"))
}

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}").expect("timestamp pattern compiles")
    })
}

fn trailing_by_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?:^|\s+)by\s*$").expect("trailing pattern compiles"))
}

/// Normalize a reminder payload, preserving input order.
///
/// One level of `{"reminders": [...]}` nesting is unwrapped. Anything that is
/// not (or does not contain) an array yields an empty list.
pub fn normalize(payload: &Value) -> Vec<NormalizedReminder> {
    let list = payload.get("reminders").unwrap_or(payload);

    match list.as_array() {
        Some(items) => items.iter().map(normalize_item).collect(),
        None => Vec::new(),
    }
}

/// Lenient-parse raw AI text and normalize whatever reminders it contains
pub fn reminders_from_text(text: &str) -> Vec<NormalizedReminder> {
    normalize(&parse_lenient(text, json!({ "reminders": [] })))
}

fn normalize_item(item: &Value) -> NormalizedReminder {
    match item {
        Value::String(text) => normalize_text(text),
        Value::Object(record) => match record.get("message").and_then(message_text) {
            Some(message) => NormalizedReminder {
                message,
                scheduled_at: record
                    .get("time")
                    .and_then(Value::as_str)
                    .and_then(parse_timestamp),
            },
            None => NormalizedReminder::immediate(&item.to_string()),
        },
        other => NormalizedReminder::immediate(&other.to_string()),
    }
}

/// Text of a record's `message` field. Empty, zero, false and null count as missing.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        _ => None,
    }
}

fn normalize_text(text: &str) -> NormalizedReminder {
    let stripped = label_pattern().replace(text, "");

    let scheduled = timestamp_pattern().find(&stripped).and_then(|found| {
        NaiveDateTime::parse_from_str(found.as_str(), MINUTE_FORMAT)
            .ok()
            .and_then(local_to_utc)
            .map(|at| (found.range(), at))
    });

    match scheduled {
        Some((range, at)) => {
            let mut message = String::with_capacity(stripped.len());
            message.push_str(&stripped[..range.start]);
            message.push_str(&stripped[range.end..]);
            let message = trailing_by_pattern().replace(&message, "");
            NormalizedReminder::at(message.trim(), at)
        }
        None => NormalizedReminder::immediate(&stripped),
    }
}
