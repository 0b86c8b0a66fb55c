use std::collections::{BTreeMap, HashMap};

use crate::model::attendance::Event;
use crate::model::calendar::CalendarPolicy;
use crate::model::stats::{DailyMinutes, PeriodStats, Stats};
use crate::stats::daily::daily_minutes_of;

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    minutes: i64,
    days: u32,
}

impl Bucket {
    fn push(&mut self, minutes: i64) {
        self.minutes = self.minutes.saturating_add(minutes);
        self.days = self.days.saturating_add(1);
    }

    fn stats(self) -> Stats {
        Stats::from_totals(self.minutes, self.days)
    }
}

fn into_stats<K: Ord>(buckets: BTreeMap<K, Bucket>) -> BTreeMap<K, Stats> {
    buckets
        .into_iter()
        .map(|(key, bucket)| (key, bucket.stats()))
        .collect()
}

/// Roll a day map up into daily, weekly, monthly, weekday/weekend and total
/// summaries.
///
/// A day whose week key cannot be derived is logged and left out of the
/// weekly map only; every other bucket still counts it.
pub fn period_stats(daily: &DailyMinutes, policy: &CalendarPolicy) -> PeriodStats {
    let mut weekly: BTreeMap<_, Bucket> = BTreeMap::new();
    let mut monthly: BTreeMap<_, Bucket> = BTreeMap::new();
    let mut weekday = Bucket::default();
    let mut weekend = Bucket::default();
    let mut total = Bucket::default();

    for (day, minutes) in daily.iter() {
        match policy.week_key(day) {
            Ok(week) => weekly.entry(week).or_default().push(minutes),
            Err(e) => tracing::warn!(error = %e, %day, "Skipping day in weekly rollup"),
        }
        monthly.entry(policy.month_key(day)).or_default().push(minutes);

        if policy.is_weekend(day) {
            weekend.push(minutes);
        } else {
            weekday.push(minutes);
        }
        total.push(minutes);
    }

    PeriodStats {
        daily: daily
            .iter()
            .map(|(day, minutes)| (day, Stats::single_day(minutes)))
            .collect(),
        weekly: into_stats(weekly),
        monthly: into_stats(monthly),
        weekday: weekday.stats(),
        weekend: weekend.stats(),
        total: total.stats(),
    }
}

/// Per-member summaries, in the order members first appear in `events`.
pub fn stats_by_member(events: &[Event], policy: &CalendarPolicy) -> Vec<(String, Stats)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Event>)> = Vec::new();

    for event in events {
        let member = event.member_id.as_str();
        let slot = *slots.entry(member).or_insert_with(|| {
            groups.push((member, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(event);
    }

    groups
        .into_iter()
        .map(|(member, member_events)| {
            let daily = daily_minutes_of(member_events, policy);
            (
                member.to_string(),
                Stats::from_totals(daily.total(), daily.len() as u32),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::calendar::{MonthKey, WeekKey};
    use chrono::{NaiveDate, TimeZone, Utc, Weekday};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn sample() -> DailyMinutes {
        // Thu 29 Feb, Sat 2 Mar, Mon 4 Mar, Sun 10 Mar
        [
            (day(2, 29), 120),
            (day(3, 2), 60),
            (day(3, 4), 300),
            (day(3, 10), 30),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn empty_map_rolls_up_to_zeroes() {
        let stats = period_stats(&DailyMinutes::new(), &CalendarPolicy::default());
        assert_eq!(stats, PeriodStats::default());
        assert_eq!(stats.total, Stats { total_time: 0, average_time: 0.0, days_present: 0 });
    }

    #[test]
    fn daily_entries_are_single_day_stats() {
        let stats = period_stats(&sample(), &CalendarPolicy::default());
        assert_eq!(stats.daily.len(), 4);
        assert_eq!(
            stats.daily[&day(3, 4)],
            Stats { total_time: 300, average_time: 300.0, days_present: 1 }
        );
    }

    #[test]
    fn weekly_groups_by_policy_week() {
        let stats = period_stats(&sample(), &CalendarPolicy::default());
        let week = |d| WeekKey { starts_on: d };

        assert_eq!(stats.weekly.len(), 2);
        assert_eq!(stats.weekly[&week(day(2, 26))], Stats::from_totals(180, 2));
        assert_eq!(stats.weekly[&week(day(3, 4))], Stats::from_totals(330, 2));

        let sunday_start = CalendarPolicy {
            week_start: Weekday::Sun,
            ..CalendarPolicy::default()
        };
        let stats = period_stats(&sample(), &sunday_start);
        assert_eq!(stats.weekly.len(), 3);
        assert_eq!(stats.weekly[&week(day(3, 10))], Stats::from_totals(30, 1));
    }

    #[test]
    fn monthly_groups_by_year_month() {
        let stats = period_stats(&sample(), &CalendarPolicy::default());
        assert_eq!(stats.monthly[&MonthKey { year: 2024, month: 2 }], Stats::from_totals(120, 1));
        assert_eq!(stats.monthly[&MonthKey { year: 2024, month: 3 }], Stats::from_totals(390, 3));
    }

    #[test]
    fn weekend_split_follows_policy() {
        let stats = period_stats(&sample(), &CalendarPolicy::default());
        assert_eq!(stats.weekend, Stats::from_totals(90, 2));
        assert_eq!(stats.weekday, Stats::from_totals(420, 2));
        assert_eq!(stats.total, Stats::from_totals(510, 4));

        let friday_saturday = CalendarPolicy {
            weekend: vec![Weekday::Fri, Weekday::Sat],
            ..CalendarPolicy::default()
        };
        let stats = period_stats(&sample(), &friday_saturday);
        assert_eq!(stats.weekend, Stats::from_totals(60, 1));
    }

    #[test]
    fn unkeyable_week_is_skipped_but_still_counted_elsewhere() {
        crate::logging::init_test();
        let first = NaiveDate::MIN;
        let policy = CalendarPolicy {
            week_start: chrono::Datelike::weekday(&first).succ(),
            ..CalendarPolicy::default()
        };
        let daily: DailyMinutes = [(first, 45)].into_iter().collect();

        let stats = period_stats(&daily, &policy);
        assert!(stats.weekly.is_empty());
        assert_eq!(stats.total, Stats::from_totals(45, 1));
        assert_eq!(stats.monthly.len(), 1);
    }

    #[test]
    fn members_in_first_seen_order() {
        let at = |h| Utc.with_ymd_and_hms(2024, 3, 4, h, 0, 0).unwrap();
        let events = vec![
            Event::check_in("b1", "bob", at(8)),
            Event::check_in("a1", "alice", at(9)),
            Event::check_out("a2", "alice", at(12), Some(180)),
            Event::check_out("b2", "bob", at(10), Some(120)),
        ];

        let by_member = stats_by_member(&events, &CalendarPolicy::default());
        assert_eq!(
            by_member,
            vec![
                ("bob".to_string(), Stats::from_totals(120, 1)),
                ("alice".to_string(), Stats::from_totals(180, 1)),
            ]
        );
    }

    #[test]
    fn interleaved_members_are_grouped_once() {
        let at = |h| Utc.with_ymd_and_hms(2024, 3, 5, h, 0, 0).unwrap();
        let events = vec![
            Event::check_in("a1", "alice", at(8)),
            Event::check_in("b1", "bob", at(8)),
            Event::check_out("a2", "alice", at(9), Some(60)),
            Event::check_in("a3", "alice", at(13)),
            Event::check_out("b2", "bob", at(14), Some(360)),
            Event::check_out("a4", "alice", at(15), Some(120)),
            Event::check_out("c1", "carol", at(16), None),
        ];

        let by_member = stats_by_member(&events, &CalendarPolicy::default());
        assert_eq!(
            by_member,
            vec![
                ("alice".to_string(), Stats::from_totals(180, 1)),
                ("bob".to_string(), Stats::from_totals(360, 1)),
                ("carol".to_string(), Stats::default()),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_weekday_weekend_partition_is_complete(
            entries in proptest::collection::vec((0u64..730, 1i64..1440), 0..60)
        ) {
            let origin = day(1, 1);
            let daily: DailyMinutes = entries
                .into_iter()
                .map(|(offset, minutes)| (origin + chrono::Days::new(offset), minutes))
                .collect();

            let stats = period_stats(&daily, &CalendarPolicy::default());

            prop_assert_eq!(
                stats.weekday.days_present + stats.weekend.days_present,
                stats.total.days_present
            );
            prop_assert_eq!(stats.weekday.total_time + stats.weekend.total_time, stats.total.total_time);
            prop_assert_eq!(stats.total.days_present as usize, daily.len());
            if stats.total.days_present > 0 {
                prop_assert_eq!(
                    stats.total.average_time,
                    stats.total.total_time as f64 / f64::from(stats.total.days_present)
                );
            }
            let weekly_days: u32 = stats.weekly.values().map(|s| s.days_present).sum();
            prop_assert_eq!(weekly_days, stats.total.days_present);
        }
    }
}
