// File: ./src/cli.rs
//! Command-line surface: argument parsing, logging setup and the batch run.
use crate::config::{Config, ReportConfig, Variant};
use crate::decoder::{self, Window};
use crate::error::ReportError;
use crate::pipeline::write_report;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Frequency digest of the recurring events in an iCalendar file.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the ICS file to parse
    #[arg(long = "ics-filepath", default_value = "")]
    pub ics_filepath: String,

    /// Maximum characters of the title column (extended variant)
    #[arg(long = "min-width")]
    pub min_width: Option<usize>,

    /// Report flavour [default: from config, else extended]
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// First day of the window, YYYY-MM-DD [default: today]
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Day after the window, YYYY-MM-DD [default: start + window_days]
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Config file [default: per-user config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn load_config(&self) -> Result<Config, ReportError> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    pub fn window(&self, config: &Config) -> Window {
        let start = self.start.unwrap_or_else(|| Utc::now().date_naive());
        let mut window = Window::from_date(start, config.window_days);
        if let Some(end) = self.end {
            window.end = end.and_time(chrono::NaiveTime::MIN).and_utc();
        }
        window
    }

    pub fn log_level(&self, config: &Config) -> LevelFilter {
        match self.verbose {
            0 => config.log_level(),
            1 => config.log_level().max(LevelFilter::Info),
            _ => LevelFilter::Debug,
        }
    }
}

/// Logs go to stderr; stdout carries only the table.
pub fn init_logging(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .build();
    if TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("Logger already initialized");
    }
}

/// Reads the calendar named by `args` and prints the report to `out`.
pub fn run_with<W: Write>(args: &Args, config: &Config, out: &mut W) -> Result<()> {
    let variant = args.variant.unwrap_or(config.variant);
    let report_config = ReportConfig::for_variant(variant);
    let title_width = config.title_width(variant, args.min_width);
    let window = args.window(config);
    log::debug!(
        "variant={} title_width={} window={}..{}",
        variant,
        title_width,
        window.start,
        window.end
    );

    // The file handle lives only for the decode step.
    let path = PathBuf::from(&args.ics_filepath);
    let events = {
        let file = File::open(&path).map_err(|source| ReportError::InputAccess {
            path: path.clone(),
            source,
        })?;
        decoder::decode(BufReader::new(file), &window)?
    };

    write_report(events, &report_config, title_width, out)?;
    out.flush().context("Failed to flush report")?;
    Ok(())
}

pub fn run(args: Args) -> Result<()> {
    let config = args.load_config()?;
    init_logging(args.log_level(&config));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run_with(&args, &config, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "recurfreq",
            "--ics-filepath",
            "cal.ics",
            "--min-width",
            "20",
            "--variant",
            "basic",
            "--start",
            "2025-03-01",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.ics_filepath, "cal.ics");
        assert_eq!(args.min_width, Some(20));
        assert_eq!(args.variant, Some(Variant::Basic));
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["recurfreq"]).unwrap();
        assert_eq!(args.ics_filepath, "");
        assert_eq!(args.min_width, None);
        assert_eq!(args.variant, None);
        assert_eq!(args.log_level(&Config::default()), LevelFilter::Warn);
    }

    #[test]
    fn test_window_from_flags() {
        let args = Args::try_parse_from([
            "recurfreq",
            "--start",
            "2025-01-01",
            "--end",
            "2025-02-01",
        ])
        .unwrap();
        let window = args.window(&Config::default());
        assert_eq!(window.start.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(window.end.date_naive(), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());

        let args = Args::try_parse_from(["recurfreq", "--start", "2025-01-01"]).unwrap();
        let window = args.window(&Config::default());
        assert_eq!(window.end.date_naive(), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_verbosity_raises_level() {
        let args = Args {
            verbose: 1,
            ..Args::default()
        };
        assert_eq!(args.log_level(&Config::default()), LevelFilter::Info);
    }
}
