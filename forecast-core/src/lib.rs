//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - The OpenWeatherMap client behind the [`WeatherProvider`] trait
//! - Clock arithmetic for day buckets and forecast offsets
//! - Record cleanup and the English report templates
//!
//! It is used by `forecast-cli`, but the pipeline in [`report`] can be driven by any provider.

pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod outlook;
pub mod provider;
pub mod report;

pub use config::ClientConfig;
pub use display::{ConditionsSnapshot, DisplayRecord, format_for_display};
pub use error::ReportError;
pub use model::{
    CurrentConditions, Forecast, ForecastEntry, HumidityBand, Interval, PrecipitationOutlook,
    Temperature, TimeOfDay,
};
pub use provider::{WeatherProvider, connect};
pub use report::{Report, build_report};
