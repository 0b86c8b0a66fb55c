//! Attendance aggregation: rebuilds stays from check-in/check-out events and
//! rolls the minutes present up into daily, weekly, monthly and
//! weekday/weekend statistics.
//!
//! Everything here is a pure function of the events passed in. Loading
//! events from storage and presenting the results belong to the caller.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod stats;
pub mod utils;

pub use config::Config;
pub use error::KeyError;
pub use model::attendance::{Event, EventType, StayInterval, active_events};
pub use model::calendar::{CalendarPolicy, MonthKey, ReportPeriod, WeekKey};
pub use model::stats::{DailyMinutes, MemberTotal, PeriodStats, Stats};
pub use stats::compare::rank_members;
pub use stats::daily::{MemberFilter, calculate_stats, daily_minutes, daily_minutes_in_period};
pub use stats::day_split::{split_by_day, split_stay};
pub use stats::intervals::{CheckOutMatch, checkout_duration, open_check_ins, reconstruct};
pub use stats::rollup::{period_stats, stats_by_member};
pub use utils::duration::format_minutes;
