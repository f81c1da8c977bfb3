// File: ./src/config.rs
// Handles report variants, configuration loading and defaults.
use crate::error::ReportError;
use crate::paths::AppPaths;
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

fn default_window_days() -> u32 {
    365
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// The two flavours of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Strict title allow-list, count/title ordering, 30 column titles.
    Basic,
    /// ASCII titles, UNTIL tie-break, rule metadata, 42 column titles.
    #[default]
    Extended,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Basic => write!(f, "basic"),
            Variant::Extended => write!(f, "extended"),
        }
    }
}

/// Knobs of the aggregation pipeline. Both variants run the same code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    pub ascii_only: bool,
    pub use_until_tiebreak: bool,
    pub derive_rule_metadata: bool,
    pub default_title_width: usize,
}

impl ReportConfig {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Basic => Self {
                ascii_only: false,
                use_until_tiebreak: false,
                derive_rule_metadata: false,
                default_title_width: 30,
            },
            Variant::Extended => Self {
                ascii_only: true,
                use_until_tiebreak: true,
                derive_rule_metadata: true,
                default_title_width: 42,
            },
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

/// Contents of the optional `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub min_width: Option<usize>,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            min_width: None,
            window_days: default_window_days(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads the per-user config file. A missing file yields defaults.
    pub fn load() -> Result<Self, ReportError> {
        match AppPaths::get_config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads a config file from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ReportError> {
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| ReportError::Config(format!("{:?}: {}", path, e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ReportError::Config(format!("{:?}: {}", path, e)))?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Resolves the title column width: CLI flag, then config file, then the
    /// variant default. The basic variant always uses its fixed width.
    pub fn title_width(&self, variant: Variant, cli_min_width: Option<usize>) -> usize {
        let report = ReportConfig::for_variant(variant);
        let requested = cli_min_width.or(self.min_width);
        match variant {
            Variant::Basic => {
                if let Some(w) = requested {
                    log::warn!(
                        "min-width {} ignored: the basic variant uses a fixed width of {}",
                        w,
                        report.default_title_width
                    );
                }
                report.default_title_width
            }
            Variant::Extended => requested.unwrap_or(report.default_title_width),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}
