// File: ./src/decoder.rs
//! Reads an iCalendar stream and expands its events into the instances that
//! fall inside a date window.
use crate::error::ReportError;
use crate::model::DecodedEvent;
use crate::model::RecurrenceRule;
use crate::model::event::{format_rule, parse_rule};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use icalendar::{Calendar, CalendarComponent, Component, Event};
use rrule::RRuleSet;
use std::collections::HashSet;
use std::io::Read;
use std::str::FromStr;

/// Upper bound on instances expanded from a single series. A series that
/// exceeds it inside the window is rejected rather than undercounted.
pub const MAX_INSTANCES_PER_SERIES: usize = 100_000;

/// Half-open `[start, end)` range used to select instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// `days` days starting at midnight UTC of `start`.
    pub fn from_date(start: NaiveDate, days: u32) -> Self {
        let start = start.and_time(chrono::NaiveTime::MIN).and_utc();
        Self {
            start,
            end: start + Duration::days(i64::from(days)),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

/// Reads the whole stream, then decodes it.
pub fn decode<R: Read>(mut reader: R, window: &Window) -> Result<Vec<DecodedEvent>, ReportError> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .map_err(|e| ReportError::Decode(format!("Read: {}", e)))?;
    decode_str(&raw, window)
}

pub fn decode_str(raw_ics: &str, window: &Window) -> Result<Vec<DecodedEvent>, ReportError> {
    // Normalize line endings to \r\n for consistent parsing
    let normalized = raw_ics.replace("\r\n", "\n").replace('\n', "\r\n");

    if !normalized.contains("BEGIN:VCALENDAR") {
        return Err(ReportError::Decode("no VCALENDAR block found".to_string()));
    }

    let calendar: Calendar = normalized
        .parse()
        .map_err(|e| ReportError::Decode(format!("Parse: {}", e)))?;

    let mut decoded = Vec::new();
    for component in &calendar.components {
        if let CalendarComponent::Event(event) = component {
            decode_event(event, window, &mut decoded)?;
        }
    }

    log::info!(
        "Decoded {} event instance(s) between {} and {}",
        decoded.len(),
        window.start,
        window.end
    );
    Ok(decoded)
}

fn decode_event(
    event: &Event,
    window: &Window,
    out: &mut Vec<DecodedEvent>,
) -> Result<(), ReportError> {
    // Overrides of a single instance: the master series already yields that slot.
    if event.properties().contains_key("RECURRENCE-ID") {
        return Ok(());
    }

    let title = event.get_summary().unwrap_or("");

    let Some(dtstart) = event
        .properties()
        .get("DTSTART")
        .and_then(|p| parse_ical_datetime(p.value()))
    else {
        log::warn!("Skipping event {:?}: missing or unreadable DTSTART", title);
        return Ok(());
    };

    let Some(rrule) = event.properties().get("RRULE").map(|p| p.value()) else {
        if window.contains(dtstart) {
            out.push(DecodedEvent::single(title, dtstart));
        }
        return Ok(());
    };

    let rule = parse_rule(rrule);
    let exdates = collect_exdates(event);
    let instances = expand(dtstart, &rule, &exdates, window)
        .map_err(|e| ReportError::Decode(format!("RRULE of {:?}: {}", title, e)))?;

    log::debug!("{:?}: {} instance(s) in window", title, instances.len());
    out.extend(
        instances
            .into_iter()
            .map(|start| DecodedEvent::recurring(title, rule.clone(), start)),
    );
    Ok(())
}

/// Parses `YYYYMMDD` and `YYYYMMDDTHHMMSS[Z]`. Floating times are taken as UTC.
pub fn parse_ical_datetime(val: &str) -> Option<DateTime<Utc>> {
    let val = val.trim();
    if val.len() == 8 {
        NaiveDate::parse_from_str(val, "%Y%m%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc())
    } else {
        NaiveDateTime::parse_from_str(
            val,
            if val.ends_with('Z') {
                "%Y%m%dT%H%M%SZ"
            } else {
                "%Y%m%dT%H%M%S"
            },
        )
        .ok()
        .map(|d| Utc.from_utc_datetime(&d))
    }
}

fn collect_exdates(event: &Event) -> Vec<DateTime<Utc>> {
    let mut values: Vec<&str> = Vec::new();
    if let Some(prop) = event.properties().get("EXDATE") {
        values.push(prop.value());
    }
    if let Some(multi_props) = event.multi_properties().get("EXDATE") {
        for prop in multi_props {
            values.push(prop.value());
        }
    }

    let mut seen = HashSet::new();
    values
        .into_iter()
        .flat_map(|v| v.split(','))
        .filter_map(parse_ical_datetime)
        .filter(|d| seen.insert(*d))
        .collect()
}

/// The rrule crate wants UNTIL in the same form as DTSTART, which is always a
/// UTC date-time here.
fn normalize_until(until: &str) -> String {
    if until.len() == 8 && !until.contains('T') {
        format!("{}T235959Z", until)
    } else if until.contains('T') && !until.ends_with('Z') {
        format!("{}Z", until)
    } else {
        until.to_string()
    }
}

/// Rule text handed to the expander. A non-numeric INTERVAL is left out so the
/// expander falls back to 1; the raw value stays on the decoded events and is
/// judged when the series is built.
fn expansion_rule(rule: &RecurrenceRule) -> String {
    let mut rule = rule.clone();
    if let Some(until) = rule.get_mut("UNTIL") {
        *until = normalize_until(until);
    }
    if rule
        .get("INTERVAL")
        .is_some_and(|v| v.parse::<i64>().is_err())
    {
        rule.remove("INTERVAL");
    }
    format_rule(&rule)
}

fn expand(
    dtstart: DateTime<Utc>,
    rule: &RecurrenceRule,
    exdates: &[DateTime<Utc>],
    window: &Window,
) -> Result<Vec<DateTime<Utc>>, String> {
    let mut rrule_string = format!(
        "DTSTART:{}\nRRULE:{}\n",
        dtstart.format("%Y%m%dT%H%M%SZ"),
        expansion_rule(rule)
    );
    for ex in exdates {
        rrule_string.push_str(&format!("EXDATE:{}\n", ex.format("%Y%m%dT%H%M%SZ")));
    }

    let rrule_set = RRuleSet::from_str(&rrule_string).map_err(|e| e.to_string())?;

    let mut instances = Vec::new();
    for occurrence in rrule_set
        .into_iter()
        .map(|d| d.to_utc())
        .skip_while(|d| *d < window.start)
        .take_while(|d| *d < window.end)
    {
        if instances.len() == MAX_INSTANCES_PER_SERIES {
            return Err(format!(
                "more than {} instances inside the window",
                MAX_INSTANCES_PER_SERIES
            ));
        }
        instances.push(occurrence);
    }
    Ok(instances)
}
