//! Field extractors over the free-form text of `zpool status <pool>`.
//!
//! Every extractor is a pure `fn(&str) -> Option<T>` searching the whole
//! text; a missing match is `None`, never an error. Decimal separators are
//! normalized by hand so the result does not depend on the host locale.
//!
//! Output formats follow `print_scan_status()` in OpenZFS
//! `cmd/zpool/zpool_main.c`; new variants get a new extractor appended to
//! the relevant list in [`ScanParser`].

use crate::models::scrub::PoolStatusSnapshot;
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

pub type Extractor<T> = fn(&str) -> Option<T>;

static PROGRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+[,.]\d+)% done").expect("valid regex"));
static SPEED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"at (\d+[,.]\d+)M/s").expect("valid regex"));
static TIME_TO_GO_HM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)h(\d+)m to go").expect("valid regex"));
static TIME_TO_GO_CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(\d+) days? )?(\d+):(\d{2}):(\d{2}) to go").expect("valid regex")
});
static LAST_SCRUB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:canceled on|in progress since|errors on) (.+)$").expect("valid regex")
});

/// ctime(3) layout, i.e. `%c` in the C locale.
const CTIME_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// "96,19" and "96.19" both read as 96.19.
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse().ok()
}

/// `96,19% done` → 0.9619
pub fn progress(text: &str) -> Option<f64> {
    let caps = PROGRESS_RE.captures(text)?;
    parse_decimal(&caps[1]).map(|pct| pct / 100.0)
}

/// `at 1,90M/s` → 1.9 (MB/s)
pub fn speed(text: &str) -> Option<f64> {
    let caps = SPEED_RE.captures(text)?;
    parse_decimal(&caps[1])
}

/// `55h33m to go` → 199980 seconds. Older zpool releases only.
pub fn time_to_go_hm(text: &str) -> Option<u64> {
    let caps = TIME_TO_GO_HM_RE.captures(text)?;
    let hours: u64 = caps[1].parse().ok()?;
    let minutes: u64 = caps[2].parse().ok()?;
    Some((hours * 60 + minutes) * 60)
}

/// `2 days 03:04:05 to go` or `03:04:05 to go`, as printed by OpenZFS 0.8+.
pub fn time_to_go_clock(text: &str) -> Option<u64> {
    let caps = TIME_TO_GO_CLOCK_RE.captures(text)?;
    let days: u64 = match caps.get(1) {
        Some(d) => d.as_str().parse().ok()?,
        None    => 0,
    };
    let hours: u64 = caps[2].parse().ok()?;
    let minutes: u64 = caps[3].parse().ok()?;
    let seconds: u64 = caps[4].parse().ok()?;
    Some(((days * 24 + hours) * 60 + minutes) * 60 + seconds)
}

/// Date after `canceled on`, `in progress since` or `errors on`.
pub fn last_scrub(text: &str) -> Option<NaiveDateTime> {
    let caps = LAST_SCRUB_RE.captures(text)?;
    let raw = caps[1].trim();
    // ctime pads single-digit days with a second space: "Sun Feb  9 ..."
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    match NaiveDateTime::parse_from_str(&normalized, CTIME_FORMAT) {
        Ok(t)  => Some(t),
        Err(e) => {
            tracing::warn!(date = raw, error = %e, "unparsable scrub date");
            None
        }
    }
}

/// Ordered extractor lists, one per snapshot field; the first hit wins.
#[derive(Clone)]
pub struct ScanParser {
    pub progress:   Vec<Extractor<f64>>,
    pub speed:      Vec<Extractor<f64>>,
    pub time_to_go: Vec<Extractor<u64>>,
    pub last_scrub: Vec<Extractor<NaiveDateTime>>,
}

impl Default for ScanParser {
    fn default() -> Self {
        Self {
            progress:   vec![progress],
            speed:      vec![speed],
            time_to_go: vec![time_to_go_hm],
            last_scrub: vec![last_scrub],
        }
    }
}

impl ScanParser {
    /// Also read the `HH:MM:SS to go` remaining-time format.
    pub fn with_extended_time_to_go(mut self) -> Self {
        self.time_to_go.push(time_to_go_clock);
        self
    }

    pub fn parse(&self, pool: &str, text: &str) -> PoolStatusSnapshot {
        PoolStatusSnapshot {
            pool_name:     pool.to_string(),
            progress:      first(&self.progress, text),
            speed:         first(&self.speed, text),
            time_to_go:    first(&self.time_to_go, text),
            last_scrub_at: first(&self.last_scrub, text),
        }
    }
}

fn first<T>(extractors: &[Extractor<T>], text: &str) -> Option<T> {
    extractors.iter().find_map(|extract| extract(text))
}
