// File: ./src/model/series.rs
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::model::event::{DecodedEvent, RecurrenceRule};
use crate::model::title::normalize_title;
use std::str::FromStr;
use strum::{Display, EnumString};

/// RRULE `FREQ` values that carry an annual multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Frequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

impl Frequency {
    pub fn annual_multiplier(self) -> i64 {
        match self {
            Frequency::Yearly => 1,
            Frequency::Monthly => 12,
            Frequency::Weekly => 52,
            Frequency::Daily => 365,
        }
    }
}

/// One recurring series, collapsed from all its instances in the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub title: String,
    pub occurrence_count: usize,
    pub annual_frequency_estimate: usize,
    pub recurrence_rule: RecurrenceRule,
    pub until: String,
    // Rule metadata. Not used for ranking.
    pub frequency: Option<Frequency>,
    pub interval: i64,
    pub annual_multiplier: i64,
}

impl Series {
    /// Builds the display record for a representative instance.
    ///
    /// When `config.derive_rule_metadata` is set, a non-numeric `INTERVAL`
    /// is fatal while a missing or unknown `FREQ` just zeroes the multiplier.
    pub fn build(
        representative: &DecodedEvent,
        occurrence_count: usize,
        config: &ReportConfig,
    ) -> Result<Self, ReportError> {
        let title = normalize_title(&representative.title, config.ascii_only);
        let rule = &representative.recurrence_rule;

        let mut series = Series {
            title,
            occurrence_count,
            annual_frequency_estimate: 0,
            recurrence_rule: rule.clone(),
            until: String::new(),
            frequency: None,
            interval: 1,
            annual_multiplier: 0,
        };

        if !config.derive_rule_metadata {
            return Ok(series);
        }

        if let Some(raw) = rule.get("INTERVAL").filter(|v| !v.is_empty()) {
            series.interval = raw
                .parse::<i64>()
                .map_err(|_| ReportError::RecurrenceField {
                    title: representative.title.clone(),
                    field: "INTERVAL",
                    value: raw.clone(),
                })?;
        }

        series.frequency = rule
            .get("FREQ")
            .and_then(|f| Frequency::from_str(f).ok());
        series.annual_multiplier = series
            .frequency
            .map(Frequency::annual_multiplier)
            .unwrap_or(0);
        if series.frequency.is_none() {
            log::debug!(
                "No usable FREQ for {:?}, annual multiplier left at 0",
                representative.title
            );
        }

        series.until = rule.get("UNTIL").cloned().unwrap_or_default();
        series.annual_frequency_estimate = occurrence_count;

        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::model::event::parse_rule;
    use chrono::{TimeZone, Utc};

    fn event(title: &str, rule: &str) -> DecodedEvent {
        DecodedEvent::recurring(
            title,
            parse_rule(rule),
            Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_extended_extracts_metadata() {
        let cfg = ReportConfig::for_variant(Variant::Extended);
        let ev = event("Standup 🚀", "FREQ=WEEKLY;INTERVAL=2;UNTIL=20251231T000000Z");
        let s = Series::build(&ev, 26, &cfg).unwrap();

        assert_eq!(s.title, "Standup ");
        assert_eq!(s.occurrence_count, 26);
        assert_eq!(s.annual_frequency_estimate, 26);
        assert_eq!(s.frequency, Some(Frequency::Weekly));
        assert_eq!(s.interval, 2);
        assert_eq!(s.annual_multiplier, 52);
        assert_eq!(s.until, "20251231T000000Z");
    }

    #[test]
    fn test_extended_defaults_interval_and_degrades_freq() {
        let cfg = ReportConfig::for_variant(Variant::Extended);
        let s = Series::build(&event("X", "FREQ=HOURLY"), 4, &cfg).unwrap();
        assert_eq!(s.interval, 1);
        assert_eq!(s.frequency, None);
        assert_eq!(s.annual_multiplier, 0);
        assert_eq!(s.until, "");

        let s = Series::build(&event("X", "COUNT=3"), 3, &cfg).unwrap();
        assert_eq!(s.annual_multiplier, 0);
    }

    #[test]
    fn test_extended_rejects_non_numeric_interval() {
        let cfg = ReportConfig::for_variant(Variant::Extended);
        let err = Series::build(&event("Bad", "FREQ=DAILY;INTERVAL=two"), 1, &cfg).unwrap_err();
        match err {
            ReportError::RecurrenceField { field, value, .. } => {
                assert_eq!(field, "INTERVAL");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_basic_ignores_rule_metadata() {
        let cfg = ReportConfig::for_variant(Variant::Basic);
        let s = Series::build(&event("Gym!", "FREQ=DAILY;INTERVAL=two;UNTIL=2026"), 7, &cfg).unwrap();
        assert_eq!(s.title, "Gym");
        assert_eq!(s.occurrence_count, 7);
        assert_eq!(s.annual_frequency_estimate, 0);
        assert_eq!(s.until, "");
        assert_eq!(s.interval, 1);
        assert_eq!(s.recurrence_rule.get("INTERVAL").map(String::as_str), Some("two"));
    }
}
