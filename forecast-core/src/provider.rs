use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    config::ClientConfig,
    error::ReportError,
    model::{CurrentConditions, Forecast, Interval},
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// A source of current and forecast weather for named places.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// "Now" weather at `place`. Fails with [`ReportError::UnresolvableCity`] for unknown places.
    async fn current_at_place(&self, place: &str) -> Result<CurrentConditions, ReportError>;

    /// Forecast series at `place` sampled every `interval`.
    async fn forecast_at_place(&self, place: &str, interval: Interval) -> Result<Forecast, ReportError>;
}

/// Reject credentials that can never be valid before spending a request on them.
pub fn validate_api_key(api_key: &str) -> Result<(), ReportError> {
    if api_key.trim().is_empty() {
        return Err(ReportError::InvalidCredential("API key is empty".to_string()));
    }

    if api_key.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ReportError::InvalidCredential(
            "API key must not contain whitespace".to_string(),
        ));
    }

    Ok(())
}

/// Open a provider session for `api_key`.
pub fn connect(api_key: &str, config: ClientConfig) -> Result<Box<dyn WeatherProvider>, ReportError> {
    let provider = OpenWeatherProvider::new(api_key, config)?;
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        let err = validate_api_key("   ").unwrap_err();
        assert!(matches!(err, ReportError::InvalidCredential(_)));
    }

    #[test]
    fn key_with_whitespace_is_rejected() {
        let err = validate_api_key("abc def").unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn plausible_key_is_accepted() {
        assert!(validate_api_key("5adaceb79e5cb497b69d64fa00f45b01").is_ok());
    }

    #[test]
    fn connect_fails_fast_on_bad_key() {
        let err = connect("", ClientConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn connect_works_with_plausible_key() {
        assert!(connect("KEY", ClientConfig::default()).is_ok());
    }
}
