use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::calendar::{MonthKey, WeekKey};
use crate::utils::date_keys::parse_day_key;

/// Summary over a set of present days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_time: i64,
    pub average_time: f64,
    pub days_present: u32,
}

impl Stats {
    /// Builds a summary whose average is `total / days`, or 0 with no days.
    pub fn from_totals(total_time: i64, days_present: u32) -> Self {
        let average_time = if days_present > 0 {
            total_time as f64 / f64::from(days_present)
        } else {
            0.0
        };

        Self {
            total_time,
            average_time,
            days_present,
        }
    }

    pub fn single_day(minutes: i64) -> Self {
        Self::from_totals(minutes, 1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeriodStats {
    pub daily: BTreeMap<NaiveDate, Stats>,
    pub weekly: BTreeMap<WeekKey, Stats>,
    pub monthly: BTreeMap<MonthKey, Stats>,
    pub weekday: Stats,
    pub weekend: Stats,
    pub total: Stats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTotal {
    pub name: String,
    pub total_time: i64,
}

/// Minutes present per local calendar day.
///
/// Only positive contributions create an entry, so every key is a day the
/// member (or members) were actually present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DailyMinutes(BTreeMap<NaiveDate, i64>);

impl DailyMinutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals saturate at `i64::MAX` instead of wrapping.
    pub fn add(&mut self, day: NaiveDate, minutes: i64) {
        if minutes > 0 {
            let entry = self.0.entry(day).or_insert(0);
            *entry = entry.saturating_add(minutes);
        }
    }

    /// Fold step: sum `other` into `self`.
    pub fn merge(mut self, other: DailyMinutes) -> Self {
        for (day, minutes) in other.0 {
            self.add(day, minutes);
        }
        self
    }

    /// Build from string day keys, e.g. a map read back from the store.
    /// Keys that do not parse are logged and skipped.
    pub fn from_keyed<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        entries
            .into_iter()
            .fold(Self::new(), |mut acc, (key, minutes)| {
                match parse_day_key(key.as_ref()) {
                    Ok(day) => acc.add(day, minutes),
                    Err(e) => tracing::warn!(error = %e, minutes, "Skipping unparseable day key"),
                }
                acc
            })
    }

    pub fn get(&self, day: NaiveDate) -> Option<i64> {
        self.0.get(&day).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, i64)> + '_ {
        self.0.iter().map(|(day, minutes)| (*day, *minutes))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.0.values().fold(0i64, |acc, minutes| acc.saturating_add(*minutes))
    }
}

impl FromIterator<(NaiveDate, i64)> for DailyMinutes {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, i64)>>(iter: T) -> Self {
        let mut daily = Self::new();
        for (day, minutes) in iter {
            daily.add(day, minutes);
        }
        daily
    }
}
