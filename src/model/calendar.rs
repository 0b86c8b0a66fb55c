use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc, Weekday,
};
use derive_more::Display;
use serde::{Serialize, Serializer};

use crate::error::KeyError;

/// Grouping key for one policy week, identified by its first date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "W{}", starts_on)]
pub struct WeekKey {
    pub starts_on: NaiveDate,
}

/// Grouping key for a calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}", year, month)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl Serialize for WeekKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where calendar days begin and how they group into weeks.
///
/// The offset is applied once, when an instant is turned into a local date
/// or local wall-clock time. It is fixed, so daylight-saving shifts are not
/// modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarPolicy {
    pub utc_offset: FixedOffset,
    pub week_start: Weekday,
    pub weekend: Vec<Weekday>,
}

impl Default for CalendarPolicy {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            week_start: Weekday::Mon,
            weekend: vec![Weekday::Sat, Weekday::Sun],
        }
    }
}

impl CalendarPolicy {
    pub fn local_datetime(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.utc_offset).naive_local()
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local_datetime(instant).date()
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend.contains(&date.weekday())
    }

    pub fn week_key(&self, date: NaiveDate) -> Result<WeekKey, KeyError> {
        let back = (7 + date.weekday().num_days_from_monday()
            - self.week_start.num_days_from_monday())
            % 7;

        date.checked_sub_days(Days::new(u64::from(back)))
            .map(|starts_on| WeekKey { starts_on })
            .ok_or(KeyError::OutOfRange { date })
    }

    pub fn month_key(&self, date: NaiveDate) -> MonthKey {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// Inclusive range of local dates a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The whole calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
