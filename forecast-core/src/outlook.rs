//! Precipitation predicates over a forecast series.
//!
//! Conditions are classified by OpenWeatherMap condition code rather than by
//! the free-text status, so "light rain" and "shower rain" both count as rain.

use chrono::{DateTime, Utc};
use std::ops::RangeInclusive;

use crate::model::{Forecast, ForecastEntry, PrecipitationOutlook};

const RAIN_CODES: RangeInclusive<u16> = 500..=531;
const SNOW_CODES: RangeInclusive<u16> = 600..=622;
const FOG_CODES: [u16; 2] = [701, 741];

fn is_rain(entry: &ForecastEntry) -> bool {
    RAIN_CODES.contains(&entry.weather_code)
}

fn is_snow(entry: &ForecastEntry) -> bool {
    SNOW_CODES.contains(&entry.weather_code)
}

fn is_fog(entry: &ForecastEntry) -> bool {
    FOG_CODES.contains(&entry.weather_code)
}

impl Forecast {
    /// Entry closest to `at`, or `None` when `at` falls outside the series.
    pub fn entry_closest_to(&self, at: DateTime<Utc>) -> Option<&ForecastEntry> {
        let first = self.entries.first()?;
        let last = self.entries.last()?;

        if at < first.reference_time || at > last.reference_time {
            return None;
        }

        self.entries
            .iter()
            .min_by_key(|e| (e.reference_time - at).num_seconds().abs())
    }

    /// Whether the sample nearest to `at` is a rain condition.
    pub fn will_be_rainy_at(&self, at: DateTime<Utc>) -> bool {
        match self.entry_closest_to(at) {
            Some(entry) => is_rain(entry),
            None => {
                tracing::debug!(%at, "time is outside forecast coverage, assuming no rain");
                false
            }
        }
    }

    pub fn will_have_snow(&self) -> bool {
        self.entries.iter().any(is_snow)
    }

    pub fn will_have_fog(&self) -> bool {
        self.entries.iter().any(is_fog)
    }

    /// Rain at `rain_at`, snow or fog anywhere in the series.
    pub fn precipitation_outlook(&self, rain_at: DateTime<Utc>) -> PrecipitationOutlook {
        PrecipitationOutlook {
            rain: self.will_be_rainy_at(rain_at),
            snow: self.will_have_snow(),
            fog: self.will_have_fog(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::tomorrow, model::Interval};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 5, 0, 0, 0).unwrap()
    }

    /// One entry per 3 hours, codes in order.
    fn forecast(codes: &[u16]) -> Forecast {
        let entries = codes
            .iter()
            .enumerate()
            .map(|(i, code)| ForecastEntry {
                reference_time: start() + Duration::hours(3 * i as i64),
                status: "x".into(),
                detailed_status: format!("code {code}"),
                weather_code: *code,
            })
            .collect();

        Forecast::new("Bangalore".into(), Interval::ThreeHours, entries)
    }

    #[test]
    fn rain_at_picks_nearest_entry() {
        // entries at 00, 03, 06, 09 with rain only at 06
        let f = forecast(&[800, 800, 501, 800]);

        assert!(f.will_be_rainy_at(start() + Duration::minutes(6 * 60 + 40)));
        assert!(!f.will_be_rainy_at(start() + Duration::minutes(8 * 60)));
    }

    #[test]
    fn rain_tomorrow_checks_one_day_ahead() {
        // 9 entries cover 00:00 .. 24:00
        let mut codes = vec![800; 9];
        codes[8] = 520;
        let f = forecast(&codes);

        let outlook = f.precipitation_outlook(tomorrow(start()));
        assert!(outlook.rain);
        assert!(!outlook.snow);
        assert!(!outlook.fog);
    }

    #[test]
    fn outside_coverage_is_not_rainy() {
        let f = forecast(&[500, 500]);
        assert!(!f.will_be_rainy_at(start() + Duration::days(3)));
        assert!(!f.will_be_rainy_at(start() - Duration::hours(1)));
        assert!(f.will_be_rainy_at(start() + Duration::hours(2)));
    }

    #[test]
    fn snow_and_fog_scan_whole_series() {
        let f = forecast(&[800, 601, 800, 741]);
        assert!(f.will_have_snow());
        assert!(f.will_have_fog());

        let mist_only = forecast(&[701]);
        assert!(mist_only.will_have_fog());

        let haze = forecast(&[721, 804]);
        assert!(!haze.will_have_fog());
        assert!(!haze.will_have_snow());
    }

    #[test]
    fn empty_series_has_no_precipitation() {
        let f = forecast(&[]);
        assert_eq!(f.precipitation_outlook(tomorrow(start())), PrecipitationOutlook::default());
    }
}
