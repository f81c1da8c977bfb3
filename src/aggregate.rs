// File: ./src/aggregate.rs
//! Collapses recurring instances into one representative per raw title.
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::model::{DecodedEvent, Series};
use std::collections::BTreeMap;

/// Per-run aggregation state. Keys are raw titles, before normalization,
/// so `"Gym"` and `"Gym!"` stay separate series.
#[derive(Debug, Default)]
pub struct Aggregation {
    representatives: BTreeMap<String, DecodedEvent>,
    counts: BTreeMap<String, usize>,
}

impl Aggregation {
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = DecodedEvent>,
    {
        let mut agg = Self::default();
        for event in events {
            agg.observe(event);
        }
        agg
    }

    /// Records one instance. Non-recurring events are ignored.
    pub fn observe(&mut self, event: DecodedEvent) {
        if !event.is_recurring {
            return;
        }
        *self.counts.entry(event.title.clone()).or_insert(0) += 1;
        if !self.representatives.contains_key(&event.title) {
            log::debug!("New series {:?}, first instance at {}", event.title, event.start);
            self.representatives.insert(event.title.clone(), event);
        }
    }

    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    pub fn count(&self, raw_title: &str) -> usize {
        self.counts.get(raw_title).copied().unwrap_or(0)
    }

    pub fn representative(&self, raw_title: &str) -> Option<&DecodedEvent> {
        self.representatives.get(raw_title)
    }

    /// Consumes the aggregation and builds one `Series` per raw title.
    pub fn into_series(self, config: &ReportConfig) -> Result<Vec<Series>, ReportError> {
        let Aggregation {
            representatives,
            counts,
        } = self;

        representatives
            .into_iter()
            .map(|(title, event)| {
                let count = counts.get(&title).copied().unwrap_or(0);
                Series::build(&event, count, config)
            })
            .collect()
    }
}
