// Crate root library declaration and module exports.
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod error;
pub mod model;
pub mod paths;
pub mod pipeline;
pub mod rank;
pub mod report;

pub use error::ReportError;
