//! Picks one representative forecast slot per upcoming day.
//!
//! Each day keeps the slot whose hour is closest to noon. Days on or before
//! the anchor day (the location's "today") are dropped and at most
//! [`MAX_FORECAST_DAYS`] days are returned.

use chrono::{DateTime, Timelike, Utc};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::types::{primary_condition, ApiForecastSlot, WeatherError};

/// Upper bound on the number of days returned by [`select_daily`]
pub const MAX_FORECAST_DAYS: usize = 5;

const NOON: i64 = 12;

/// One 3-hour forecast slot
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Unix seconds, UTC
    pub timestamp: i64,
    /// Provider text `"YYYY-MM-DD HH:MM:SS"`; `None` when absent or empty
    pub local_time_text: Option<String>,
    pub temperature: f64,
    pub condition_main: String,
}

impl From<ApiForecastSlot> for ForecastEntry {
    fn from(slot: ApiForecastSlot) -> Self {
        let condition_main = primary_condition(&slot.weather)
            .and_then(|c| c.main.clone())
            .unwrap_or_default();

        Self {
            timestamp: slot.dt.unwrap_or(0),
            local_time_text: slot.dt_txt.filter(|t| !t.is_empty()),
            temperature: slot.main.and_then(|m| m.temp).unwrap_or(0.0),
            condition_main,
        }
    }
}

/// Best slot seen so far for one calendar day
#[derive(Debug, Clone, Copy)]
struct DayBucket<'a> {
    score: i64,
    entry: &'a ForecastEntry,
}

fn utc_datetime(ts: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| WeatherError::Parse(format!("timestamp {} out of range", ts)))
}

/// Calendar day of `now_ts` shifted by the location's UTC offset.
pub fn anchor_day(now_ts: i64, tz_shift: i64) -> Result<String, WeatherError> {
    let local = now_ts
        .checked_add(tz_shift)
        .ok_or_else(|| WeatherError::Parse(format!("timestamp {} + {} overflows", now_ts, tz_shift)))?;
    Ok(utc_datetime(local)?.format("%Y-%m-%d").to_string())
}

/// Day key and hour of a slot.
///
/// The provider text wins when present. Without it both values come from
/// the raw UTC timestamp with no offset applied, unlike [`anchor_day`].
pub fn day_and_hour(entry: &ForecastEntry) -> Result<(String, i64), WeatherError> {
    let Some(text) = entry.local_time_text.as_deref() else {
        let utc = utc_datetime(entry.timestamp)?;
        return Ok((utc.format("%Y-%m-%d").to_string(), i64::from(utc.hour())));
    };

    let day: String = text.chars().take(10).collect();
    let hour = if text.chars().count() >= 13 {
        let digits: String = text.chars().skip(11).take(2).collect();
        digits.trim().parse::<i64>().map_err(|e| {
            WeatherError::Parse(format!("invalid hour '{}' in '{}': {}", digits, text, e))
        })?
    } else {
        i64::from(utc_datetime(entry.timestamp)?.hour())
    };

    Ok((day, hour))
}

/// Select the closest-to-noon slot for each day after `anchor`.
///
/// Ties keep the first slot seen. The result is ordered by day.
pub fn select_daily(
    entries: &[ForecastEntry],
    anchor: &str,
) -> Result<Vec<ForecastEntry>, WeatherError> {
    let mut by_day: BTreeMap<String, DayBucket<'_>> = BTreeMap::new();

    for entry in entries {
        let (day, hour) = day_and_hour(entry)?;
        let score = (hour - NOON).abs();

        match by_day.entry(day) {
            Entry::Vacant(slot) => {
                slot.insert(DayBucket { score, entry });
            }
            Entry::Occupied(mut slot) => {
                if score < slot.get().score {
                    slot.insert(DayBucket { score, entry });
                }
            }
        }
    }

    let chosen: Vec<ForecastEntry> = by_day
        .into_iter()
        .filter(|(day, _)| day.as_str() > anchor)
        .take(MAX_FORECAST_DAYS)
        .map(|(_, bucket)| bucket.entry.clone())
        .collect();

    tracing::debug!(
        "Selected {} of {} forecast slots after {}",
        chosen.len(),
        entries.len(),
        anchor
    );
    Ok(chosen)
}
