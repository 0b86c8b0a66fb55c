use crate::model::attendance::Event;
use crate::model::calendar::{CalendarPolicy, ReportPeriod};
use crate::model::stats::{DailyMinutes, Stats};
use crate::stats::day_split::split_stay;
use crate::stats::intervals::{CheckOutMatch, reconstruct};

/// Which members an aggregation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberFilter<'a> {
    All,
    Only(&'a str),
}

impl MemberFilter<'_> {
    fn accepts(&self, event: &Event) -> bool {
        match self {
            MemberFilter::All => true,
            MemberFilter::Only(member_id) => event.member_id == *member_id,
        }
    }
}

/// Minutes one check-out adds to the day map.
///
/// A check-out without a recorded duration adds nothing. A matched one is
/// split over the days of its stay; an unmatched one puts its recorded
/// duration on the check-out day.
fn contribution(matched: &CheckOutMatch<'_>, policy: &CalendarPolicy) -> DailyMinutes {
    let Some(duration) = matched.check_out.duration else {
        return DailyMinutes::new();
    };

    match matched.stay() {
        Some(stay) => split_stay(&stay, policy).into_iter().collect(),
        None => {
            let day = policy.local_date(matched.check_out.timestamp);
            std::iter::once((day, duration.max(0))).collect()
        }
    }
}

fn fold_matches<'a, I, F>(events: I, policy: &CalendarPolicy, keep: F) -> DailyMinutes
where
    I: IntoIterator<Item = &'a Event>,
    F: Fn(&CheckOutMatch<'a>) -> bool,
{
    let matches = reconstruct(events);

    let daily = matches
        .iter()
        .filter(|m| keep(m))
        .map(|m| contribution(m, policy))
        .fold(DailyMinutes::new(), DailyMinutes::merge);

    tracing::debug!(
        check_outs = matches.len(),
        days = daily.len(),
        total_minutes = daily.total(),
        "Aggregated daily minutes"
    );
    daily
}

pub fn daily_minutes(
    events: &[Event],
    policy: &CalendarPolicy,
    filter: MemberFilter<'_>,
) -> DailyMinutes {
    fold_matches(events.iter().filter(|e| filter.accepts(e)), policy, |_| true)
}

/// Day map for events already grouped by the caller, e.g. one member's events.
pub(crate) fn daily_minutes_of<'a, I>(events: I, policy: &CalendarPolicy) -> DailyMinutes
where
    I: IntoIterator<Item = &'a Event>,
{
    fold_matches(events, policy, |_| true)
}

/// Like [`daily_minutes`], restricted to check-outs whose local date falls in
/// `period`. Check-ins before the period can still be matched.
pub fn daily_minutes_in_period(
    events: &[Event],
    policy: &CalendarPolicy,
    filter: MemberFilter<'_>,
    period: ReportPeriod,
) -> DailyMinutes {
    fold_matches(events.iter().filter(|e| filter.accepts(e)), policy, |m| {
        period.contains(policy.local_date(m.check_out.timestamp))
    })
}

/// Overall summary for a set of events.
pub fn calculate_stats(events: &[Event], policy: &CalendarPolicy) -> Stats {
    if events.is_empty() {
        return Stats::default();
    }

    let daily = daily_minutes(events, policy, MemberFilter::All);
    Stats::from_totals(daily.total(), daily.len() as u32)
}
