//! Wall-clock arithmetic: hour rounding, day buckets and the forecast offset.
//!
//! Every function takes "now" as an argument so callers decide which clock
//! (and which time zone) drives the report.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Timelike, Utc};

use crate::{
    error::ReportError,
    model::{Forecast, ForecastEntry, TimeOfDay},
};

/// Spacing between samples of the provider's 3-hourly series.
pub const FORECAST_STEP_HOURS: i64 = 3;

/// How far ahead the "near-term" forecast sentence looks.
pub const LOOKAHEAD_HOURS: i64 = 3;

/// Hour of day the first forecast step is counted from.
pub const DAY_ANCHOR_HOUR: u32 = 9;

/// Which forecast entry represents "[`LOOKAHEAD_HOURS`] from now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastOffset {
    /// Rounded local time the lookahead lands on.
    pub target: NaiveDateTime,
    /// `target.hour()`, always 0..=23.
    pub hour: u32,
    /// Whole forecast steps between today's anchor and `target`. May be negative.
    pub steps: i64,
}

/// Same wall-clock time one day later, the instant "rain tomorrow" is checked at.
pub fn tomorrow(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(1)
}

/// Truncate `now` to the hour, rounding up when at least half past.
///
/// 23:30 and later rolls into 00:00 of the next day.
pub fn rounded_current_time(now: NaiveDateTime) -> Result<NaiveDateTime, ReportError> {
    let hour_start = NaiveDateTime::new(now.date(), NaiveTime::MIN)
        .checked_add_signed(Duration::hours(i64::from(now.hour())))
        .ok_or_else(|| ReportError::field(format!("cannot truncate {now} to the hour")))?;

    if now.minute() >= 30 {
        hour_start
            .checked_add_signed(Duration::hours(1))
            .ok_or_else(|| ReportError::field(format!("cannot round {now} up to the next hour")))
    } else {
        Ok(hour_start)
    }
}

pub fn time_of_day(hour: u32) -> TimeOfDay {
    match hour {
        6..=11 => TimeOfDay::Morning,
        12..=17 => TimeOfDay::Afternoon,
        18..=23 => TimeOfDay::Evening,
        _ => TimeOfDay::Night,
    }
}

/// `H:MM` label of the unrounded local time, e.g. `9:05` or `14:30`.
pub fn reference_time_label(now: NaiveDateTime) -> String {
    format!("{}:{:02}", now.hour(), now.minute())
}

/// Locate the lookahead time and count forecast steps from today's anchor hour.
pub fn forecast_entry_offset(now: NaiveDateTime) -> Result<ForecastOffset, ReportError> {
    let target = rounded_current_time(now)?
        .checked_add_signed(Duration::hours(LOOKAHEAD_HOURS))
        .ok_or_else(|| ReportError::field(format!("lookahead from {now} is out of range")))?;

    let anchor = now
        .date()
        .and_hms_opt(DAY_ANCHOR_HOUR, 0, 0)
        .ok_or_else(|| ReportError::field("invalid forecast anchor hour"))?;

    let steps = (target - anchor).num_hours().div_euclid(FORECAST_STEP_HOURS);

    Ok(ForecastOffset { target, hour: target.hour(), steps })
}

/// Walk `steps` entries into the series.
///
/// Negative steps clamp to the first entry. Walking past the last entry is an error.
pub fn select_entry(forecast: &Forecast, steps: i64) -> Result<&ForecastEntry, ReportError> {
    let entries = &forecast.entries;
    if entries.is_empty() {
        return Err(ReportError::EmptyWeatherResult(forecast.location_name.clone()));
    }

    if steps < 0 {
        tracing::debug!(steps, "negative forecast offset, using the first entry");
    }

    let index = usize::try_from(steps.max(0))
        .map_err(|_| ReportError::field(format!("forecast offset {steps} does not fit an index")))?;

    entries.get(index).ok_or_else(|| {
        ReportError::field(format!(
            "forecast offset {index} is beyond the {} available entries",
            entries.len()
        ))
    })
}
