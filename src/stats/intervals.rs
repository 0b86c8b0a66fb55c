use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::model::attendance::{Event, StayInterval};
use crate::utils::duration::round_to_minutes;

/// A check-out together with the check-in chosen for it, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckOutMatch<'a> {
    pub check_out: &'a Event,
    pub check_in: Option<&'a Event>,
}

impl CheckOutMatch<'_> {
    pub fn stay(&self) -> Option<StayInterval> {
        let check_in = self.check_in?;
        StayInterval::new(
            self.check_out.member_id.as_str(),
            check_in.timestamp,
            self.check_out.timestamp,
        )
    }
}

/// Check-ins per member, sorted by timestamp. Equal timestamps keep input order.
struct CheckInIndex<'a> {
    by_member: HashMap<&'a str, Vec<&'a Event>>,
}

impl<'a> CheckInIndex<'a> {
    fn build(events: &[&'a Event]) -> Self {
        let mut by_member: HashMap<&'a str, Vec<&'a Event>> = HashMap::new();
        for event in events.iter().copied().filter(|e| e.is_check_in()) {
            by_member.entry(event.member_id.as_str()).or_default().push(event);
        }
        for check_ins in by_member.values_mut() {
            check_ins.sort_by_key(|e| e.timestamp);
        }
        Self { by_member }
    }

    /// Latest check-in strictly before `check_out`. Among several check-ins
    /// sharing that timestamp the first one seen wins.
    fn nearest_preceding(&self, check_out: &Event) -> Option<&'a Event> {
        let check_ins = self.by_member.get(check_out.member_id.as_str())?;
        let before = check_ins.partition_point(|e| e.timestamp < check_out.timestamp);
        let latest = check_ins[..before].last()?.timestamp;
        let first_of_latest = check_ins[..before].partition_point(|e| e.timestamp < latest);
        Some(check_ins[first_of_latest])
    }
}

/// Pair every check-out with its nearest preceding check-in of the same member.
///
/// Each check-out is matched independently, so one check-in may serve more
/// than one check-out when the data has gaps. Output follows the input order
/// of the check-outs.
pub fn reconstruct<'a, I>(events: I) -> Vec<CheckOutMatch<'a>>
where
    I: IntoIterator<Item = &'a Event>,
{
    let events: Vec<&'a Event> = events.into_iter().collect();
    let index = CheckInIndex::build(&events);

    let matches: Vec<CheckOutMatch<'a>> = events
        .iter()
        .copied()
        .filter(|e| e.is_check_out())
        .map(|check_out| CheckOutMatch {
            check_out,
            check_in: index.nearest_preceding(check_out),
        })
        .collect();

    tracing::debug!(
        events = events.len(),
        check_outs = matches.len(),
        unmatched = matches.iter().filter(|m| m.check_in.is_none()).count(),
        "Reconstructed stays"
    );
    matches
}

/// Whole minutes a store should record on a check-out, floored at zero.
pub fn checkout_duration(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    round_to_minutes(check_out - check_in).max(0)
}

/// Check-ins of members who are currently present: their most recent event
/// is a check-in. Ordered by each member's first appearance in the input.
///
/// A check-out sharing its timestamp with a check-in counts as the later
/// event, whatever the input order. Between two events of the same type the
/// one seen last wins.
pub fn open_check_ins(events: &[Event]) -> Vec<&Event> {
    let mut order: Vec<&str> = Vec::new();
    let mut latest: HashMap<&str, &Event> = HashMap::new();

    for event in events {
        let member = event.member_id.as_str();
        let newer = match latest.get(member) {
            None => {
                order.push(member);
                true
            }
            Some(current) => match event.timestamp.cmp(&current.timestamp) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => event.is_check_out() || current.is_check_in(),
            },
        };
        if newer {
            latest.insert(member, event);
        }
    }

    order
        .into_iter()
        .filter_map(|member| latest.get(member).copied())
        .filter(|event| event.is_check_in())
        .collect()
}
