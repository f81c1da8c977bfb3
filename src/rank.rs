// File: ./src/rank.rs
//! Deterministic ordering of series for the report.
use crate::model::Series;
use std::cmp::Ordering;

impl Series {
    /// Fewest occurrences first, then title by code point, then (optionally)
    /// the raw UNTIL string, where an empty UNTIL sorts first.
    pub fn compare_for_report(&self, other: &Self, use_until_tiebreak: bool) -> Ordering {
        self.occurrence_count
            .cmp(&other.occurrence_count)
            .then_with(|| self.title.cmp(&other.title))
            .then_with(|| {
                if use_until_tiebreak {
                    self.until.cmp(&other.until)
                } else {
                    Ordering::Equal
                }
            })
    }
}

/// Sorts in place. Stable, so fully equal series keep their input order.
pub fn rank(series: &mut [Series], use_until_tiebreak: bool) {
    series.sort_by(|a, b| a.compare_for_report(b, use_until_tiebreak));
}
