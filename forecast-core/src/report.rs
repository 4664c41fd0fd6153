//! The report pipeline: fetch, derive, render.

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, info, instrument};

use crate::{
    clock,
    display::{ConditionsSnapshot, DisplayRecord},
    error::ReportError,
    model::{ForecastEntry, Interval, PrecipitationOutlook},
    provider::WeatherProvider,
};

const RAIN_SENTENCE: &str = "Carry an umbrella as there might be some rain tomorrow.";
const CLEAR_SENTENCE: &str = "We are expecting clear skies tomorrow. Don't miss your shades!!";
const FOG_SENTENCE: &str = "Also, it might be foggy the next few days.";

/// The forecast entry picked for the near-term sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastSummary {
    /// Local hour (0..=23) the entry stands for.
    pub hour: u32,
    pub status: String,
    pub detailed_status: String,
}

impl ForecastSummary {
    pub fn new(hour: u32, entry: &ForecastEntry) -> Self {
        Self {
            hour,
            status: entry.status.clone(),
            detailed_status: entry.detailed_status.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub city: String,
    pub current: DisplayRecord,
    pub forecast: ForecastSummary,
    pub outlook: PrecipitationOutlook,
}

impl Report {
    /// Greeting, near-term forecast and rain sentences, plus a fog sentence when fog is expected.
    pub fn render(&self) -> Result<String, ReportError> {
        let c = &self.current;

        let greeting = format!(
            "Good {}!! It is {} hours in {}, and we have {} with {}% {} humidity. \
             The temperature ranges between {} and {} degrees Celsius but it may feel like {} degrees Celsius.",
            c.require("time_of_day")?,
            c.require("ref_time")?,
            self.city,
            c.require("detailed_status")?,
            c.require("humidity")?,
            c.require("humidity_level")?,
            c.require("temp_min")?,
            c.require("temp_max")?,
            c.require("temp_feels_like")?,
        );

        let near_term = format!(
            "At around {} hours, we might have {}.",
            self.forecast.hour, self.forecast.detailed_status
        );

        let rain = if self.outlook.rain { RAIN_SENTENCE } else { CLEAR_SENTENCE };

        let mut lines = vec![greeting, near_term, rain.to_string()];
        if self.outlook.fog {
            lines.push(FOG_SENTENCE.to_string());
        }

        Ok(lines.join("\n"))
    }
}

/// Run the whole pipeline for `city` as seen from the local time `now`.
///
/// A single 3-hourly forecast feeds both the near-term sentence and the outlook.
#[instrument(skip(provider))]
pub async fn build_report(
    provider: &dyn WeatherProvider,
    city: &str,
    now: DateTime<FixedOffset>,
) -> Result<Report, ReportError> {
    let current = provider.current_at_place(city).await?;
    let snapshot = ConditionsSnapshot::new(&current, now);
    let record = snapshot.display_record()?;

    let forecast = provider.forecast_at_place(city, Interval::ThreeHours).await?;

    let offset = clock::forecast_entry_offset(now.naive_local())?;
    let entry = clock::select_entry(&forecast, offset.steps)?;
    debug!(hour = offset.hour, steps = offset.steps, status = %entry.status, "near-term forecast entry");

    let outlook = forecast.precipitation_outlook(clock::tomorrow(now.with_timezone(&Utc)));
    info!(
        location = %forecast.location_name,
        rain = outlook.rain,
        snow = outlook.snow,
        fog = outlook.fog,
        "precipitation outlook"
    );

    Ok(Report {
        city: city.to_owned(),
        current: record,
        forecast: ForecastSummary::new(offset.hour, entry),
        outlook,
    })
}
