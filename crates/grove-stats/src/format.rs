//! Human-readable formatting of durations and rounding of sizes.

/// Formats a number of seconds as days, hours, minutes and seconds.
///
/// Larger units are only included once the duration reaches them. Once a
/// larger unit is included, every smaller unit is shown too, even when zero.
///
/// # Examples
///
/// ```
/// use grove_stats::format::beautify_time;
///
/// assert_eq!(beautify_time(42), "42 seconds");
/// assert_eq!(beautify_time(3661), "1 hour, 1 minute, 1 seconds");
/// assert_eq!(beautify_time(3605), "1 hour, 0 minutes, 5 seconds");
/// ```
#[must_use]
pub fn beautify_time(seconds: u64) -> String {
    let mut result = format!("{} seconds", seconds % 60);
    if seconds / 60 == 0 {
        return result;
    }
    result = unit_prefix((seconds / 60) % 60, "minute") + &result;
    if seconds / 3600 == 0 {
        return result;
    }
    result = unit_prefix((seconds / 3600) % 24, "hour") + &result;
    let days = seconds / 86400;
    if days == 0 {
        return result;
    }
    unit_prefix(days, "day") + &result
}

fn unit_prefix(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}, ")
    } else {
        format!("{count} {unit}s, ")
    }
}

/// Rounds `value` up to the next multiple of `multiple`.
///
/// A `multiple` of zero leaves `value` unchanged. Returns `None` if the
/// rounded value does not fit in a `usize`.
///
/// # Examples
///
/// ```
/// use grove_stats::format::round_to_next_multiple;
///
/// assert_eq!(round_to_next_multiple(10, 4), Some(12));
/// assert_eq!(round_to_next_multiple(12, 4), Some(12));
/// assert_eq!(round_to_next_multiple(7, 0), Some(7));
/// assert_eq!(round_to_next_multiple(usize::MAX, 2), None);
/// ```
#[must_use]
pub fn round_to_next_multiple(value: usize, multiple: usize) -> Option<usize> {
    if multiple == 0 {
        return Some(value);
    }
    value.checked_next_multiple_of(multiple)
}
