//! Compact duration rendering for trace timings

use std::fmt::Write;
use std::time::Duration;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);
const YEAR: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Render an elapsed duration.
///
/// Spans under a day use the compact `1h30m0s` form. Longer spans are
/// prefixed with whole years (365 days, only when nonzero) and days, followed
/// by the compact form of the remainder.
///
/// ```
/// use rust_log_dispatch::core::duration::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h30m0s");
/// assert_eq!(format_duration(Duration::from_secs(25 * 3600)), "1d1h0m0s");
/// ```
pub fn format_duration(d: Duration) -> String {
    if d < DAY {
        return format_compact(d);
    }

    let mut out = String::new();
    let mut rest = d.as_nanos();

    let year = YEAR.as_nanos();
    if rest >= year {
        let _ = write!(out, "{}y", rest / year);
        rest %= year;
    }

    let day = DAY.as_nanos();
    let _ = write!(out, "{}d", rest / day);
    rest %= day;

    out.push_str(&format_compact(Duration::from_nanos(rest as u64)));
    out
}

/// Render a duration as hours, minutes and fractional seconds, or as a
/// single sub-second unit when shorter than one second.
pub fn format_compact(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return format!("{}µs", fraction(nanos, 1_000));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", fraction(nanos, 1_000_000));
    }

    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = fraction(
        u128::from(total_secs % 60) * 1_000_000_000 + u128::from(d.subsec_nanos()),
        1_000_000_000,
    );

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{}h{}m", hours, minutes);
    } else if minutes > 0 {
        let _ = write!(out, "{}m", minutes);
    }
    let _ = write!(out, "{}s", seconds);
    out
}

/// `value / unit` as a decimal with trailing zeros trimmed.
fn fraction(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let rem = value % unit;
    if rem == 0 {
        return whole.to_string();
    }

    let width = unit.ilog10() as usize;
    let digits = format!("{:0width$}", rem, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
