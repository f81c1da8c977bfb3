// File: ./src/pipeline.rs
//! decoded events -> aggregate -> build -> rank -> report.
use crate::aggregate::Aggregation;
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::model::{DecodedEvent, Series};
use crate::rank::rank;
use crate::report::Reporter;
use std::io::Write;

/// Aggregates, builds and ranks. Nothing is written.
pub fn build_report(
    events: Vec<DecodedEvent>,
    config: &ReportConfig,
) -> Result<Vec<Series>, ReportError> {
    let aggregation = Aggregation::from_events(events);
    log::info!("Found {} recurring series", aggregation.len());

    let mut series = aggregation.into_series(config)?;
    rank(&mut series, config.use_until_tiebreak);
    Ok(series)
}

/// Runs the whole pipeline into `out`. Rows are only written once every
/// series has been built, so a fatal error leaves `out` untouched.
pub fn write_report<W: Write>(
    events: Vec<DecodedEvent>,
    config: &ReportConfig,
    title_width: usize,
    out: &mut W,
) -> Result<(), ReportError> {
    let series = build_report(events, config)?;
    Reporter::new(title_width).write_table(&series, out)?;
    Ok(())
}
