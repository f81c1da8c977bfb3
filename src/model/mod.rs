// File: ./src/model/mod.rs
pub mod event;
pub mod series;
pub mod title;

pub use event::{DecodedEvent, RecurrenceRule};
pub use series::{Frequency, Series};
