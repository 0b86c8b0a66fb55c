use chrono::TimeDelta;

const MS_PER_MINUTE: i64 = 60_000;

/// Round a span to the nearest whole minute (half a minute rounds up).
///
/// Negative spans round like positive ones; callers floor at zero where a
/// stay length is expected.
pub fn round_to_minutes(span: TimeDelta) -> i64 {
    round_ms_to_minutes(span.num_milliseconds())
}

pub(crate) fn round_ms_to_minutes(ms: i64) -> i64 {
    (ms + MS_PER_MINUTE / 2).div_euclid(MS_PER_MINUTE)
}

/// Human label for a minute count, e.g. `2h 05m` or `45m`.
pub fn format_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let (hours, rest) = (minutes / 60, minutes % 60);

    if hours == 0 {
        format!("{rest}m")
    } else {
        format!("{hours}h {rest:02}m")
    }
}
