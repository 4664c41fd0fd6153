use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Temperatures in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub min: f64,
    pub max: f64,
    pub feels_like: Option<f64>,
}

/// "Now" weather at a place, as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub status: String,
    pub detailed_status: String,
    pub weather_code: u16,
    pub sunrise_time: Option<DateTime<Utc>>,
    pub sunset_time: Option<DateTime<Utc>>,
    pub humidity: u8,
    pub temperature: Temperature,
    pub reference_time: DateTime<Utc>,
}

/// One sample of a forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub reference_time: DateTime<Utc>,
    pub status: String,
    pub detailed_status: String,
    pub weather_code: u16,
}

/// Sampling granularity of a forecast series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    ThreeHours,
    Daily,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::ThreeHours => "3h",
            Interval::Daily => "daily",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered forecast series for a place. Entries are sorted by `reference_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location_name: String,
    pub interval: Interval,
    pub entries: Vec<ForecastEntry>,
}

impl Forecast {
    pub fn new(location_name: String, interval: Interval, mut entries: Vec<ForecastEntry>) -> Self {
        entries.sort_by_key(|e| e.reference_time);
        Self { location_name, interval, entries }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HumidityBand {
    Low,
    Medium,
    High,
}

impl HumidityBand {
    /// Below 30% is low, below 60% medium, anything else high.
    pub fn from_percent(humidity: i32) -> Self {
        if humidity < 30 {
            HumidityBand::Low
        } else if humidity < 60 {
            HumidityBand::Medium
        } else {
            HumidityBand::High
        }
    }
}

impl fmt::Display for HumidityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HumidityBand::Low => "low",
            HumidityBand::Medium => "medium",
            HumidityBand::High => "high",
        };
        f.write_str(s)
    }
}

/// Rain/snow/fog predicates evaluated over a forecast series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrecipitationOutlook {
    pub rain: bool,
    pub snow: bool,
    pub fog: bool,
}
