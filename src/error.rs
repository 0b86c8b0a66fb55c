use chrono::NaiveDate;
use thiserror::Error;

/// Failures while deriving a grouping key from a calendar date.
///
/// These never abort an aggregation: callers log them and leave the
/// offending day out of the affected bucket.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid day key `{key}`: {source}")]
    Unparseable {
        key: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("week containing {date} starts outside the supported calendar range")]
    OutOfRange { date: NaiveDate },
}
