use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::model::attendance::StayInterval;
use crate::model::calendar::CalendarPolicy;
use crate::utils::duration::round_ms_to_minutes;

/// Apportion a stay over the local calendar days it touches.
///
/// Rounding happens on the elapsed time at each midnight boundary rather than
/// per segment, so the segments always add up to the rounded length of the
/// whole stay. A check-out exactly at midnight does not open an empty day.
pub fn split_by_day(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    policy: &CalendarPolicy,
) -> BTreeMap<NaiveDate, i64> {
    let start = policy.local_datetime(check_in);
    let end = policy.local_datetime(check_out);
    let mut days = BTreeMap::new();

    if end <= start {
        return days;
    }

    let mut day = start.date();
    let mut elapsed_ms = 0i64;

    loop {
        let segment_end = match day.succ_opt().map(|next| next.and_time(NaiveTime::MIN)) {
            Some(midnight) if midnight < end => midnight,
            _ => end,
        };
        let elapsed_after = (segment_end - start).num_milliseconds();

        days.insert(
            day,
            round_ms_to_minutes(elapsed_after) - round_ms_to_minutes(elapsed_ms),
        );

        if segment_end == end {
            break;
        }
        elapsed_ms = elapsed_after;
        day = segment_end.date();
    }

    days
}

pub fn split_stay(stay: &StayInterval, policy: &CalendarPolicy) -> BTreeMap<NaiveDate, i64> {
    split_by_day(stay.check_in, stay.check_out, policy)
}
