use chrono::NaiveDate;

use crate::error::KeyError;

/// Format used for day keys in persisted day-keyed maps.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` day key
pub fn parse_day_key(key: &str) -> Result<NaiveDate, KeyError> {
    NaiveDate::parse_from_str(key.trim(), DAY_KEY_FORMAT).map_err(|source| KeyError::Unparseable {
        key: key.to_string(),
        source,
    })
}

pub fn format_day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}
