// File: ./src/model/event.rs
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Raw RRULE components keyed by upper-cased name (FREQ, INTERVAL, UNTIL, ...).
///
/// A `BTreeMap` keeps the key order stable so rendering a rule is deterministic.
pub type RecurrenceRule = BTreeMap<String, String>;

/// One event instance inside the query window, as produced by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    pub title: String,
    pub is_recurring: bool,
    pub recurrence_rule: RecurrenceRule,
    pub start: DateTime<Utc>,
}

impl DecodedEvent {
    /// An instance expanded from a recurring series.
    pub fn recurring(title: &str, rule: RecurrenceRule, start: DateTime<Utc>) -> Self {
        Self {
            title: title.to_string(),
            is_recurring: true,
            recurrence_rule: rule,
            start,
        }
    }

    /// A one-off event.
    pub fn single(title: &str, start: DateTime<Utc>) -> Self {
        Self {
            title: title.to_string(),
            is_recurring: false,
            recurrence_rule: RecurrenceRule::new(),
            start,
        }
    }
}

/// Splits an RRULE value (`FREQ=WEEKLY;INTERVAL=2`) into its components.
///
/// An optional `RRULE:` prefix is stripped. Pieces without `=` are dropped.
pub fn parse_rule(raw: &str) -> RecurrenceRule {
    let clean = raw.trim();
    let body = match clean.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("RRULE:") => &clean[6..],
        _ => clean,
    };

    body.split(';')
        .filter_map(|part| part.split_once('='))
        .map(|(k, v)| (k.trim().to_uppercase(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

/// Renders a rule back as `KEY=VALUE;KEY=VALUE` in key order.
pub fn format_rule(rule: &RecurrenceRule) -> String {
    rule.iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(";")
}
