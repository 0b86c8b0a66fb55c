use std::collections::HashMap;
use std::env;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{FixedOffset, Weekday};
use dotenvy::dotenv;
use tracing::Level;

use crate::model::calendar::CalendarPolicy;

#[derive(Clone, Debug)]
pub struct Config {
    // Calendar
    pub utc_offset: FixedOffset,
    pub week_start: Weekday,
    pub weekend: Vec<Weekday>,

    // Logging
    pub log_dir: String,
    pub log_file: String,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings from a `.env` style file without touching the process
    /// environment.
    pub fn from_dotenv_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let vars = dotenvy::from_path_iter(path)
            .with_context(|| format!("failed to open {}", path.display()))?
            .collect::<Result<HashMap<String, String>, _>>()
            .with_context(|| format!("failed to parse {}", path.display()))?;

        Self::from_lookup(|key| vars.get(key).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let offset_minutes: i32 = var("ATTENDANCE_UTC_OFFSET_MINUTES", "0")
            .trim()
            .parse()
            .context("ATTENDANCE_UTC_OFFSET_MINUTES must be a whole number of minutes")?;
        let utc_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| anyhow!("UTC offset of {offset_minutes} minutes is out of range"))?;

        let week_start = parse_weekday(&var("ATTENDANCE_WEEK_START", "Mon"))
            .context("invalid ATTENDANCE_WEEK_START")?;

        let weekend = var("ATTENDANCE_WEEKEND", "Sat,Sun")
            .split(',')
            .map(str::trim)
            .filter(|day| !day.is_empty())
            .map(parse_weekday)
            .collect::<Result<Vec<_>>>()
            .context("invalid ATTENDANCE_WEEKEND")?;

        let log_level = var("LOG_LEVEL", "info")
            .trim()
            .parse::<Level>()
            .context("invalid LOG_LEVEL")?;

        Ok(Self {
            utc_offset,
            week_start,
            weekend,
            log_dir: var("LOG_DIR", "logs"),
            log_file: var("LOG_FILE", "attendance.log"),
            log_level,
        })
    }

    pub fn calendar_policy(&self) -> CalendarPolicy {
        CalendarPolicy {
            utc_offset: self.utc_offset,
            week_start: self.week_start,
            weekend: self.weekend.clone(),
        }
    }
}

fn parse_weekday(value: &str) -> Result<Weekday> {
    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| anyhow!("`{value}` is not a weekday"))
}
