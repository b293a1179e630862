/// Shortest form that reads back to the same value: "96.19", "0.004", "2678400"
pub fn fmt_perf_value(v: f64) -> String {
    if v == 0.0 { "0".to_string() } else { format!("{}", v) }
}

/// At most two decimals, for the long output: "96.19", "1.9", "0"
pub fn fmt_decimal2(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Format seconds as "31d 0h 0m 0s", dropping leading zero units.
pub fn fmt_duration(secs: u64) -> String {
    let (d, rem) = (secs / 86_400, secs % 86_400);
    let (h, rem) = (rem / 3_600, rem % 3_600);
    let (m, s)   = (rem / 60, rem % 60);
    if d > 0      { format!("{}d {}h {}m {}s", d, h, m, s) }
    else if h > 0 { format!("{}h {}m {}s", h, m, s) }
    else if m > 0 { format!("{}m {}s", m, s) }
    else          { format!("{}s", s) }
}
