// Shared fixtures: a scripted zpool and a frozen clock.

#![allow(dead_code)]

use check_zpool_scrub::clock::FixedClock;
use check_zpool_scrub::collectors::zfs::ZpoolSource;
use check_zpool_scrub::error::{CheckError, Result};
use chrono::{TimeZone, Utc};
use std::cell::RefCell;

/// In-memory `zpool` with a fixed listing and per-pool status text.
pub struct FakeZpool {
    pub pools:  Vec<(String, String)>,
    pub probed: RefCell<Vec<String>>,
}

impl FakeZpool {
    pub fn new(pools: Vec<(&str, String)>) -> Self {
        Self {
            pools:  pools.into_iter().map(|(n, t)| (n.to_string(), t)).collect(),
            probed: RefCell::new(Vec::new()),
        }
    }
}

impl ZpoolSource for FakeZpool {
    fn list_pools(&self) -> Result<Vec<String>> {
        Ok(self.pools.iter().map(|(n, _)| n.clone()).collect())
    }

    fn pool_status(&self, pool: &str) -> Result<String> {
        self.probed.borrow_mut().push(pool.to_string());
        self.pools.iter()
            .find(|(n, _)| n == pool)
            .map(|(_, t)| t.clone())
            .ok_or_else(|| CheckError::Spawn {
                command: format!("zpool status {}", pool),
                source:  std::io::Error::new(std::io::ErrorKind::NotFound, "no such pool"),
            })
    }
}

/// Friday 2017-09-01 10:55:34 UTC.
pub fn september_clock() -> FixedClock {
    FixedClock::utc(Utc.with_ymd_and_hms(2017, 9, 1, 10, 55, 34).unwrap())
}

pub fn in_progress(pool: &str, since: &str, pct: &str, speed: &str, eta: &str) -> String {
    format!(
        "  pool: {pool}
 state: ONLINE
  scan: scrub in progress since {since}
    9,12T scanned out of 9,48T at {speed}M/s, {eta} to go
    0 repaired, {pct}% done
config:

\tNAME        STATE     READ WRITE CKSUM
\t{pool}      ONLINE       0     0     0

errors: No known data errors
"
    )
}

pub fn finished(pool: &str, on: &str) -> String {
    format!(
        "  pool: {pool}
 state: ONLINE
  scan: scrub repaired 0 in 266h29m with 0 errors on {on}
config:

\tNAME        STATE     READ WRITE CKSUM
\t{pool}      ONLINE       0     0     0

errors: No known data errors
"
    )
}

pub fn never_scrubbed(pool: &str) -> String {
    format!(
        "  pool: {pool}
 state: ONLINE
  scan: none requested
config:

\tNAME        STATE     READ WRITE CKSUM
\t{pool}      ONLINE       0     0     0

errors: No known data errors
"
    )
}
