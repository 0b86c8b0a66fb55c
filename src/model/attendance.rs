use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventType {
    In,
    Out,
}

/// A check-in or check-out record as handed over by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub member_id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,

    /// Minutes recorded on a check-out when it was written
    #[serde(default)]
    pub duration: Option<i64>,

    #[serde(default)]
    pub deleted: bool,
}

impl Event {
    pub fn check_in(id: impl Into<String>, member_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            member_id: member_id.into(),
            event_type: EventType::In,
            timestamp: at,
            duration: None,
            deleted: false,
        }
    }

    pub fn check_out(
        id: impl Into<String>,
        member_id: impl Into<String>,
        at: DateTime<Utc>,
        duration: Option<i64>,
    ) -> Self {
        Self {
            id: id.into(),
            member_id: member_id.into(),
            event_type: EventType::Out,
            timestamp: at,
            duration,
            deleted: false,
        }
    }

    pub fn is_check_in(&self) -> bool {
        self.event_type == EventType::In
    }

    pub fn is_check_out(&self) -> bool {
        self.event_type == EventType::Out
    }
}

/// A reconstructed stay. Only exists while aggregating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayInterval {
    pub member_id: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
}

impl StayInterval {
    /// Returns `None` unless `check_in < check_out`.
    pub fn new(
        member_id: impl Into<String>,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Option<Self> {
        (check_in < check_out).then(|| Self {
            member_id: member_id.into(),
            check_in,
            check_out,
        })
    }
}

/// Drop soft-deleted records. This is the only place the `deleted` flag is read.
pub fn active_events<I>(events: I) -> Vec<Event>
where
    I: IntoIterator<Item = Event>,
{
    let mut dropped = 0usize;
    let active: Vec<Event> = events
        .into_iter()
        .filter(|event| {
            if event.deleted {
                dropped += 1;
            }
            !event.deleted
        })
        .collect();

    tracing::debug!(kept = active.len(), dropped, "Filtered soft-deleted events");
    active
}
