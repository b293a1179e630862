//! systemd.time(7)-style durations: `90`, `1h30m`, `2 months 8 days`, `3min 45.234s`.

use crate::error::{CheckError, Result};
use regex::Regex;
use std::sync::LazyLock;

static LETTER_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("valid regex"));
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.?\d*|\.\d+)([A-Za-z]+)$").expect("valid regex"));

/// Replaced in this order, so plural forms go before their singulars.
const UNIT_WORDS: &[(&[&str], &str)] = &[
    (&["years", "year"],               "y"),
    (&["months", "month"],             "M"),
    (&["weeks", "week"],               "w"),
    (&["days", "day"],                 "d"),
    (&["hours", "hour", "hr"],         "h"),
    (&["minutes", "minute", "min"],    "m"),
    (&["seconds", "second", "sec"],    "s"),
];

/// A month is 30.44 days and a year 365.25 days, as in systemd.
const UNIT_SECONDS: &[(&str, f64)] = &[
    ("y", 31_557_600.0),
    ("M", 2_630_016.0),
    ("w", 604_800.0),
    ("d", 86_400.0),
    ("h", 3_600.0),
    ("m", 60.0),
    ("s", 1.0),
];

/// Parse a duration into whole seconds. Plain numbers are taken as seconds.
pub fn parse_timespan(input: &str) -> Result<u64> {
    if let Ok(n) = input.trim().parse::<f64>() {
        return whole_seconds(input, n);
    }

    let mut compact: String = input.split_whitespace().collect();
    for (words, code) in UNIT_WORDS {
        for word in words.iter() {
            compact = compact.replace(word, code);
        }
    }
    let spaced = LETTER_RUN_RE.replace_all(&compact, "$0 ");

    let mut total = 0.0;
    let mut tokens = 0;
    for token in spaced.split_whitespace() {
        let caps = TOKEN_RE.captures(token).ok_or_else(|| invalid(input, token))?;
        let value: f64 = caps[1].parse().map_err(|_| invalid(input, token))?;
        let (_, secs) = UNIT_SECONDS.iter()
            .find(|(unit, _)| *unit == &caps[2])
            .ok_or_else(|| invalid(input, &caps[2]))?;
        total += value * secs;
        tokens += 1;
    }
    if tokens == 0 {
        return Err(invalid(input, input));
    }
    whole_seconds(input, total)
}

fn whole_seconds(input: &str, value: f64) -> Result<u64> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(input, input.trim()));
    }
    Ok(value.round_ties_even() as u64)
}

fn invalid(input: &str, token: &str) -> CheckError {
    CheckError::InvalidTimespan { input: input.to_string(), token: token.to_string() }
}
