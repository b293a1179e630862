use chrono::{DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};

/// Source of "now", and of the zone that `zpool` prints its dates in.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Interpret a wall-clock time as printed by `zpool` (host local time).
    fn resolve_local(&self, wall: NaiveDateTime) -> DateTime<Utc>;

    /// Whole seconds between `wall` and now, rounded half to even and
    /// clamped at zero.
    fn seconds_since(&self, wall: NaiveDateTime) -> u64 {
        let ms = (self.now() - self.resolve_local(wall)).num_milliseconds().max(0);
        (ms as f64 / 1000.0).round_ties_even() as u64
    }
}

/// Resolve `wall` in `tz`. An ambiguous time (DST fall-back) takes the
/// earlier instant; a skipped time (spring-forward gap) is read with the
/// offset in force before the gap, which lands it after the gap.
pub fn resolve_wall<Tz: TimeZone>(tz: &Tz, wall: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(t) => t.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let before = tz.offset_from_utc_datetime(&(wall - Duration::days(1))).fix();
            (wall - Duration::seconds(i64::from(before.local_minus_utc()))).and_utc()
        }
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn resolve_local(&self, wall: NaiveDateTime) -> DateTime<Utc> {
        resolve_wall(&Local, wall)
    }
}

/// A frozen clock with an explicit zone offset, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now:    DateTime<Utc>,
    pub offset: FixedOffset,
}

impl FixedClock {
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self { now, offset: Utc.fix() }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn resolve_local(&self, wall: NaiveDateTime) -> DateTime<Utc> {
        resolve_wall(&self.offset, wall)
    }
}
