use crate::clock::Clock;
use crate::error::{CheckError, Result};
use crate::models::scrub::PoolStatusSnapshot;
use serde::Serialize;

/// Plugin states, ordered for aggregation: UNKNOWN outranks CRITICAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Ok       => "OK",
            Severity::Warning  => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown  => "UNKNOWN",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Severity::Ok       => 0,
            Severity::Warning  => 1,
            Severity::Critical => 2,
            Severity::Unknown  => 3,
        }
    }
}

/// Maximum age of the last scrub, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    warning:  u64,
    critical: u64,
}

impl Thresholds {
    pub const DEFAULT_WARNING: u64 = 31 * 24 * 60 * 60;
    pub const DEFAULT_CRITICAL: u64 = 2 * Self::DEFAULT_WARNING;

    pub fn new(warning: u64, critical: u64) -> Result<Self> {
        if warning > critical {
            return Err(CheckError::InvalidThresholds { warning, critical });
        }
        Ok(Self { warning, critical })
    }

    pub fn warning(&self) -> u64 { self.warning }
    pub fn critical(&self) -> u64 { self.critical }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { warning: Self::DEFAULT_WARNING, critical: Self::DEFAULT_CRITICAL }
    }
}

/// One performance-data value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Perf {
    pub label: String,
    pub value: f64,
    pub uom:   &'static str,
}

impl Perf {
    fn new(pool: &str, metric: &str, value: f64, uom: &'static str) -> Self {
        Self { label: format!("{}: {}", pool, metric), value, uom }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub pool:     String,
    pub severity: Severity,
    pub hint:     String,
    pub elapsed:  Option<u64>,
    pub snapshot: PoolStatusSnapshot,
    pub perfdata: Vec<Perf>,
}

/// Judge one pool. Only strict excess of a threshold raises the state.
pub fn evaluate(snap: &PoolStatusSnapshot, thr: &Thresholds, clock: &dyn Clock) -> Evaluation {
    let pool = &snap.pool_name;
    let elapsed = snap.last_scrub_elapsed_seconds(clock);

    let (severity, hint) = match (snap.last_scrub_at, elapsed) {
        (Some(_), Some(e)) if e > thr.critical => (
            Severity::Critical,
            format!("Pool “{}”: {} >= {}", pool, e, thr.critical),
        ),
        // The warning hint names the critical threshold, as older releases did.
        (Some(_), Some(e)) if e > thr.warning => (
            Severity::Warning,
            format!("Pool “{}”: {} >= {}", pool, e, thr.critical),
        ),
        (Some(_), Some(e)) => (
            Severity::Ok,
            format!("Pool “{}”: {} < {}", pool, e, thr.warning),
        ),
        _ => (
            Severity::Unknown,
            format!("The pool “{}” has never had a scrub.", pool),
        ),
    };

    tracing::info!(pool = %pool, severity = severity.label(), elapsed, "evaluated");

    Evaluation {
        pool:     pool.clone(),
        severity,
        hint,
        elapsed,
        perfdata: perfdata(snap, elapsed, clock),
        snapshot: snap.clone(),
    }
}

fn perfdata(snap: &PoolStatusSnapshot, elapsed: Option<u64>, clock: &dyn Clock) -> Vec<Perf> {
    let pool = snap.pool_name.as_str();
    let mut out = Vec::new();
    if let Some(e) = elapsed {
        out.push(Perf::new(pool, "last_scrub_timespan", e as f64, "s"));
    }
    if let Some(ts) = snap.last_scrub_timestamp(clock) {
        out.push(Perf::new(pool, "last_scrub_timestamp", ts as f64, ""));
    }
    if let Some(p) = snap.progress {
        out.push(Perf::new(pool, "progress", p * 100.0, "%"));
    }
    if let Some(s) = snap.speed {
        out.push(Perf::new(pool, "speed", s, "m/s"));
    }
    if let Some(t) = snap.time_to_go {
        out.push(Perf::new(pool, "time_to_go", t as f64, "s"));
    }
    out
}

/// Overall state of a run; OK when nothing was checked.
pub fn worst(evaluations: &[Evaluation]) -> Severity {
    evaluations.iter()
        .map(|e| e.severity)
        .max()
        .unwrap_or(Severity::Ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Duration, TimeZone, Utc};

    const WARN: u64 = 2_678_400;
    const CRIT: u64 = 5_356_800;

    fn clock() -> FixedClock {
        FixedClock::utc(Utc.with_ymd_and_hms(2017, 9, 1, 10, 55, 34).unwrap())
    }

    /// A snapshot whose last scrub lies `age` seconds before `clock()`.
    fn aged(pool: &str, age: u64) -> PoolStatusSnapshot {
        let when = clock().now - Duration::seconds(age as i64);
        PoolStatusSnapshot {
            last_scrub_at: Some(when.naive_utc()),
            ..PoolStatusSnapshot::empty(pool)
        }
    }

    fn severity_at(age: u64, warning: u64, critical: u64) -> Severity {
        let thr = Thresholds::new(warning, critical).unwrap();
        evaluate(&aged("p", age), &thr, &clock()).severity
    }

    #[test]
    fn boundaries_are_strict() {
        let cases = [
            (0, Severity::Ok),
            (WARN, Severity::Ok),
            (WARN + 1, Severity::Warning),
            (CRIT, Severity::Warning),
            (CRIT + 1, Severity::Critical),
        ];
        for (age, expected) in cases {
            assert_eq!(severity_at(age, WARN, CRIT), expected, "age {}", age);
        }
    }

    #[test]
    fn bands_match_thresholds() {
        for (w, c) in [(0, 0), (10, 10), (10, 20), (100, 1000)] {
            for e in [0, 1, 9, 10, 11, 19, 20, 21, 99, 100, 101, 999, 1000, 1001] {
                let expected = if e <= w {
                    Severity::Ok
                } else if e <= c {
                    Severity::Warning
                } else {
                    Severity::Critical
                };
                assert_eq!(severity_at(e, w, c), expected, "e={} w={} c={}", e, w, c);
            }
        }
    }

    #[test]
    fn never_scrubbed_is_unknown_for_any_thresholds() {
        for (w, c) in [(0, 0), (WARN, CRIT), (u64::MAX, u64::MAX)] {
            let thr = Thresholds::new(w, c).unwrap();
            let ev = evaluate(&PoolStatusSnapshot::empty("fresh"), &thr, &clock());
            assert_eq!(ev.severity, Severity::Unknown);
            assert_eq!(ev.hint, "The pool “fresh” has never had a scrub.");
            assert!(ev.perfdata.is_empty());
        }
    }

    #[test]
    fn hints() {
        let thr = Thresholds::default();
        let c = clock();
        assert_eq!(evaluate(&aged("a", 0), &thr, &c).hint, "Pool “a”: 0 < 2678400");
        assert_eq!(evaluate(&aged("a", WARN + 1), &thr, &c).hint, "Pool “a”: 2678401 >= 5356800");
        assert_eq!(evaluate(&aged("a", CRIT + 1), &thr, &c).hint, "Pool “a”: 5356801 >= 5356800");
    }

    #[test]
    fn perfdata_covers_known_fields() {
        let snap = PoolStatusSnapshot {
            progress:   Some(0.7238),
            speed:      Some(57.4),
            time_to_go: Some(51_120),
            ..aged("tank", 60)
        };
        let ev = evaluate(&snap, &Thresholds::default(), &clock());
        let labels: Vec<_> = ev.perfdata.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, [
            "tank: last_scrub_timespan",
            "tank: last_scrub_timestamp",
            "tank: progress",
            "tank: speed",
            "tank: time_to_go",
        ]);
        assert_eq!(ev.perfdata[0].value, 60.0);
        assert_eq!(ev.perfdata[1].value, 1_504_263_274.0);
        assert!((ev.perfdata[2].value - 72.38).abs() < 1e-9);
        assert_eq!(ev.perfdata[2].uom, "%");
        assert_eq!(ev.perfdata[3].uom, "m/s");
    }

    #[test]
    fn rejects_inverted_thresholds() {
        assert!(matches!(
            Thresholds::new(2, 1),
            Err(CheckError::InvalidThresholds { warning: 2, critical: 1 })
        ));
        assert!(Thresholds::new(5, 5).is_ok());
    }

    #[test]
    fn unknown_outranks_critical() {
        let thr = Thresholds::default();
        let evs = vec![
            evaluate(&aged("a", CRIT + 1), &thr, &clock()),
            evaluate(&PoolStatusSnapshot::empty("b"), &thr, &clock()),
            evaluate(&aged("c", 0), &thr, &clock()),
        ];
        assert_eq!(worst(&evs), Severity::Unknown);
        assert_eq!(worst(&evs[..1]), Severity::Critical);
        assert_eq!(worst(&[]), Severity::Ok);
    }
}
