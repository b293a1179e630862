use crate::alerts::{worst, Evaluation, Perf, Severity};
use crate::util::human::{fmt_decimal2, fmt_duration, fmt_perf_value};
use std::fmt::Display;

pub const PLUGIN_NAME: &str = "ZPOOL_SCRUB";

/// Rendered plugin output plus the state that decides the exit code.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub severity: Severity,
    pub text:     String,
}

impl Report {
    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }
}

/// `ZPOOL_SCRUB STATE[ - hint] | perfdata`, then long output for `-v`.
pub fn generate(evaluations: &[Evaluation], verbose: u8) -> Report {
    let severity = worst(evaluations);
    let mut out = format!("{} {}", PLUGIN_NAME, severity.label());

    if severity != Severity::Ok {
        if let Some(ev) = evaluations.iter().find(|e| e.severity == severity) {
            out.push_str(" - ");
            out.push_str(&ev.hint);
        }
    }

    let mut perfdata: Vec<&Perf> = evaluations.iter().flat_map(|e| &e.perfdata).collect();
    perfdata.sort_by(|a, b| a.label.cmp(&b.label));
    if !perfdata.is_empty() {
        out.push_str(" |");
        for p in perfdata {
            out.push(' ');
            out.push_str(&fmt_perf(p));
        }
    }
    out.push('\n');

    if verbose >= 1 {
        for ev in evaluations {
            out.push_str(&format!("{}: {}\n", ev.severity.label(), ev.hint));
            if verbose >= 2 {
                out.push_str(&detail(ev));
            }
        }
    }

    Report { severity, text: out }
}

/// Fatal errors become a single UNKNOWN line.
pub fn generate_error(err: &impl Display) -> Report {
    Report {
        severity: Severity::Unknown,
        text:     format!("{} {}: {}\n", PLUGIN_NAME, Severity::Unknown.label(), err),
    }
}

fn fmt_perf(p: &Perf) -> String {
    format!("'{}'={}{}", p.label, fmt_perf_value(p.value), p.uom)
}

fn detail(ev: &Evaluation) -> String {
    let snap = &ev.snapshot;
    let mut out = String::new();
    match (snap.last_scrub_at, ev.elapsed) {
        (Some(at), Some(e)) => out.push_str(&format!(
            "  last scrub: {} ({} ago)\n", at.format("%Y-%m-%d %H:%M:%S"), fmt_duration(e)
        )),
        _ => out.push_str("  last scrub: none\n"),
    }
    if snap.is_scrubbing() {
        let pct = snap.progress.map(|p| fmt_decimal2(p * 100.0)).unwrap_or_default();
        let speed = snap.speed
            .map(|s| format!(" at {} MB/s", fmt_decimal2(s)))
            .unwrap_or_default();
        let eta = snap.time_to_go
            .map(|t| format!(", {} to go", fmt_duration(t)))
            .unwrap_or_default();
        out.push_str(&format!("  scrubbing: {}% done{}{}\n", pct, speed, eta));
    }
    out
}
