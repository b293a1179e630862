// Resolution of zpool's local wall-clock dates through the host zone.
// TZ is process-wide, so this file holds a single test.

#![cfg(unix)]

use check_zpool_scrub::alerts::{evaluate, Severity, Thresholds};
use check_zpool_scrub::clock::{Clock, SystemClock};
use check_zpool_scrub::collectors::scan::ScanParser;
use chrono::NaiveDate;
use std::path::Path;

#[test]
fn test_dst_edges_in_new_york() {
    if !Path::new("/usr/share/zoneinfo/America/New_York").exists() {
        eprintln!("no tzdata for America/New_York, skipping");
        return;
    }
    std::env::set_var("TZ", "America/New_York");

    // 02:30 on 2017-03-12 was skipped by the spring-forward; read with the
    // EST offset it lands on 03:30 EDT.
    let gap = NaiveDate::from_ymd_opt(2017, 3, 12).unwrap().and_hms_opt(2, 30, 0).unwrap();
    assert_eq!(SystemClock.resolve_local(gap).timestamp(), 1_489_303_800);

    // 01:30 on 2017-11-05 happened twice; the earlier (EDT) instant wins.
    let overlap = NaiveDate::from_ymd_opt(2017, 11, 5).unwrap().and_hms_opt(1, 30, 0).unwrap();
    assert_eq!(SystemClock.resolve_local(overlap).timestamp(), 1_509_859_800);

    let text = "  pool: p\n state: ONLINE\n  scan: scrub repaired 0 in 0h1m with 0 errors on Sun Mar 12 02:30:00 2017\n";
    let snap = ScanParser::default().parse("p", text);
    assert_eq!(snap.last_scrub_at, Some(gap));
    assert!(snap.last_scrub_elapsed_seconds(&SystemClock).is_some());

    let ev = evaluate(&snap, &Thresholds::default(), &SystemClock);
    assert_eq!(ev.severity, Severity::Critical);
    assert!(ev.hint.starts_with("Pool “p”: "), "{}", ev.hint);
    let ts = ev.perfdata.iter().find(|p| p.label == "p: last_scrub_timestamp").unwrap();
    assert_eq!(ts.value, 1_489_303_800.0);
}
