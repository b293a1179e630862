use crate::alerts::Thresholds;
use crate::collectors::scan::ScanParser;
use crate::util::timespan::parse_timespan;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "CHECK_ZPOOL_SCRUB_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    #[serde(default)]
    pub zpool: ZpoolConfig,

    #[serde(default)]
    pub parser: ParserConfig,
}

/// A duration either as plain seconds or as a timespan string ("31 days").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Span {
    Seconds(u64),
    Text(String),
}

impl Span {
    pub fn seconds(&self) -> crate::error::Result<u64> {
        match self {
            Span::Seconds(s) => Ok(*s),
            Span::Text(t)    => parse_timespan(t),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Age of the last scrub that raises WARNING.
    pub warning:  Span,
    /// Age of the last scrub that raises CRITICAL.
    pub critical: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZpoolConfig {
    /// Name or path of the zpool binary.
    pub command: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Also read "D days HH:MM:SS to go" remaining times (OpenZFS 0.8+).
    #[serde(default)]
    pub extended_time_to_go: bool,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            warning:  Span::Seconds(Thresholds::DEFAULT_WARNING),
            critical: Span::Seconds(Thresholds::DEFAULT_CRITICAL),
        }
    }
}

impl Default for ZpoolConfig {
    fn default() -> Self {
        Self { command: "zpool".into() }
    }
}

// ── Load ──────────────────────────────────────────────────────────────

impl Config {
    /// Missing file → defaults. Unreadable or malformed file → error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(path),
            None       => Ok(Config::default()),
        }
    }

    pub fn load_from(path: PathBuf) -> Result<Self> {
        match fs::read_to_string(&path) {
            Ok(text) => Self::load_from_str(&text)
                .with_context(|| format!("parsing {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Config::default())
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    pub fn load_from_str(s: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(s)?;
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Some(p) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(p));
        }
        dirs::config_dir().map(|p| p.join("check_zpool_scrub").join("check_zpool_scrub.toml"))
    }

    pub fn scan_parser(&self) -> ScanParser {
        if self.parser.extended_time_to_go {
            ScanParser::default().with_extended_time_to_go()
        } else {
            ScanParser::default()
        }
    }
}
