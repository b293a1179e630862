use crate::clock::Clock;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Scrub state of one pool, read from a single `zpool status` text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolStatusSnapshot {
    pub pool_name:     String,
    /// Fraction in 0..=1.
    pub progress:      Option<f64>,
    /// MB/s as printed by zpool.
    pub speed:         Option<f64>,
    /// Seconds.
    pub time_to_go:    Option<u64>,
    /// Wall-clock time in the host's zone; None = no scrub on record.
    pub last_scrub_at: Option<NaiveDateTime>,
}

impl PoolStatusSnapshot {
    pub fn empty(pool_name: impl Into<String>) -> Self {
        Self {
            pool_name:     pool_name.into(),
            progress:      None,
            speed:         None,
            time_to_go:    None,
            last_scrub_at: None,
        }
    }

    /// Recomputed against `clock` on every call. None only without a last scrub.
    pub fn last_scrub_elapsed_seconds(&self, clock: &dyn Clock) -> Option<u64> {
        self.last_scrub_at.map(|wall| clock.seconds_since(wall))
    }

    /// Epoch seconds of the last scrub.
    pub fn last_scrub_timestamp(&self, clock: &dyn Clock) -> Option<i64> {
        self.last_scrub_at.map(|wall| clock.resolve_local(wall).timestamp())
    }

    pub fn is_scrubbing(&self) -> bool {
        self.progress.is_some_and(|p| p < 1.0)
    }
}
