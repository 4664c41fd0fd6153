use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    config::ClientConfig,
    error::ReportError,
    model::{CurrentConditions, Forecast, ForecastEntry, Interval, Temperature},
};

use super::{WeatherProvider, validate_api_key};

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    config: ClientConfig,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: &str, config: ClientConfig) -> Result<Self, ReportError> {
        validate_api_key(api_key)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { api_key: api_key.to_owned(), config, http })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        place: &str,
        extra: &[(&str, String)],
    ) -> Result<T, ReportError> {
        if place.trim().is_empty() {
            return Err(ReportError::UnresolvableCity(place.to_owned()));
        }

        let url = self.config.endpoint(path);

        let mut query: Vec<(&str, &str)> = vec![
            ("q", place),
            ("appid", self.api_key.as_str()),
            ("units", self.config.units.as_str()),
        ];
        query.extend(extra.iter().map(|(k, v)| (*k, v.as_str())));

        let res = self.http.get(&url).query(&query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        debug!(%status, path, bytes = body.len(), "provider responded");

        match status {
            s if s.is_success() => Ok(serde_json::from_str(&body)?),
            StatusCode::UNAUTHORIZED => Err(ReportError::InvalidCredential(provider_message(&body))),
            // 400 is "Nothing to geocode", 404 "city not found"
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                debug!(message = %provider_message(&body), "place not resolved");
                Err(ReportError::UnresolvableCity(place.to_owned()))
            }
            s => {
                warn!(status = %s, path, "provider request failed");
                Err(ReportError::Provider { status: s.as_u16(), body: truncate_body(&body) })
            }
        }
    }

    async fn fetch_current(&self, place: &str) -> Result<CurrentConditions, ReportError> {
        let parsed: OwCurrentResponse = self.get_json("weather", place, &[]).await?;

        let weather = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ReportError::EmptyWeatherResult(place.to_owned()))?;

        Ok(CurrentConditions {
            location_name: parsed.name,
            status: weather.main,
            detailed_status: weather.description,
            weather_code: weather.id,
            sunrise_time: parsed.sys.sunrise.and_then(unix_to_utc),
            sunset_time: parsed.sys.sunset.and_then(unix_to_utc),
            humidity: parsed.main.humidity,
            temperature: Temperature {
                min: parsed.main.temp_min,
                max: parsed.main.temp_max,
                feels_like: parsed.main.feels_like,
            },
            reference_time: required_time(parsed.dt)?,
        })
    }

    async fn fetch_forecast(&self, place: &str, interval: Interval) -> Result<Forecast, ReportError> {
        let parsed: OwForecastResponse = match interval {
            Interval::ThreeHours => self.get_json("forecast", place, &[]).await?,
            Interval::Daily => {
                let cnt = self.config.daily_count.to_string();
                self.get_json("forecast/daily", place, &[("cnt", cnt)]).await?
            }
        };

        if parsed.list.is_empty() {
            return Err(ReportError::EmptyWeatherResult(place.to_owned()));
        }

        let entries = parsed
            .list
            .into_iter()
            .map(OwForecastEntry::into_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let location_name = match parsed.city.country {
            Some(country) if !country.is_empty() => format!("{}, {}", parsed.city.name, country),
            _ => parsed.city.name,
        };

        Ok(Forecast::new(location_name, interval, entries))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp_min: f64,
    temp_max: f64,
    feels_like: Option<f64>,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u16,
    main: String,
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl OwForecastEntry {
    fn into_entry(self) -> Result<ForecastEntry, ReportError> {
        let reference_time = required_time(self.dt)?;
        let weather = self.weather.into_iter().next().ok_or_else(|| {
            ReportError::field(format!("forecast entry at {reference_time} has no weather condition"))
        })?;

        Ok(ForecastEntry {
            reference_time,
            status: weather.main,
            detailed_status: weather.description,
            weather_code: weather.id,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn current_at_place(&self, place: &str) -> Result<CurrentConditions, ReportError> {
        let current = self.fetch_current(place).await?;
        debug!(status = %current.status, humidity = current.humidity, "current conditions");
        Ok(current)
    }

    #[instrument(skip(self))]
    async fn forecast_at_place(&self, place: &str, interval: Interval) -> Result<Forecast, ReportError> {
        let forecast = self.fetch_forecast(place, interval).await?;
        debug!(entries = forecast.entries.len(), "forecast series");
        Ok(forecast)
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn required_time(ts: i64) -> Result<DateTime<Utc>, ReportError> {
    unix_to_utc(ts).ok_or_else(|| ReportError::field(format!("timestamp {ts} is out of range")))
}

fn provider_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
