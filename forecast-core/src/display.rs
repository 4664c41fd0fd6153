//! Turning records into flat `key -> text` maps for the sentence templates.

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::{
    clock,
    error::ReportError,
    model::{CurrentConditions, HumidityBand, TimeOfDay},
};

/// Current conditions plus the facts derived from the local clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionsSnapshot {
    pub status: String,
    pub detailed_status: String,
    pub sunrise_time: Option<DateTime<Utc>>,
    pub sunset_time: Option<DateTime<Utc>>,
    pub ref_time: String,
    pub humidity: u8,
    pub humidity_level: HumidityBand,
    pub time_of_day: TimeOfDay,
    pub temp_min: f64,
    pub temp_max: f64,
    pub temp_feels_like: Option<f64>,
}

impl ConditionsSnapshot {
    pub fn new(conditions: &CurrentConditions, now: DateTime<FixedOffset>) -> Self {
        let local = now.naive_local();

        Self {
            status: conditions.status.clone(),
            detailed_status: conditions.detailed_status.clone(),
            sunrise_time: conditions.sunrise_time,
            sunset_time: conditions.sunset_time,
            ref_time: clock::reference_time_label(local),
            humidity: conditions.humidity,
            humidity_level: HumidityBand::from_percent(i32::from(conditions.humidity)),
            time_of_day: clock::time_of_day(local.hour()),
            temp_min: conditions.temperature.min,
            temp_max: conditions.temperature.max,
            temp_feels_like: conditions.temperature.feels_like,
        }
    }

    /// Only fields that are present end up in the record.
    pub fn display_record(&self) -> Result<DisplayRecord, ReportError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(format_for_display(&map)),
            other => Err(ReportError::field(format!("snapshot serialized to {other}, not an object"))),
        }
    }
}

/// Flat, string-valued view of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayRecord(BTreeMap<String, String>);

impl DisplayRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Like [`DisplayRecord::get`], but a missing key is a [`ReportError::FieldExtraction`].
    pub fn require(&self, key: &str) -> Result<&str, ReportError> {
        self.get(key)
            .ok_or_else(|| ReportError::field(format!("missing field '{key}' in weather details")))
    }

    /// Back into a JSON object so the pipeline can be reapplied.
    pub fn to_json(&self) -> Map<String, Value> {
        self.0.iter().map(|(k, v)| (k.clone(), Value::String(v.clone()))).collect()
    }
}

fn is_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s == "None",
        _ => false,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Drop null and empty values, then stringify what is left.
///
/// Removal happens before stringification so a null never survives as text.
pub fn format_for_display(record: &Map<String, Value>) -> DisplayRecord {
    let fields = record
        .iter()
        .filter(|(_, v)| !is_null(v))
        .filter(|(_, v)| !is_empty(v))
        .map(|(k, v)| (k.clone(), stringify(v)))
        .collect();

    DisplayRecord(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Temperature;
    use chrono::TimeZone;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn conditions() -> CurrentConditions {
        CurrentConditions {
            location_name: "Bangalore".into(),
            status: "Rain".into(),
            detailed_status: "light rain".into(),
            weather_code: 500,
            sunrise_time: None,
            sunset_time: Some(Utc.with_ymd_and_hms(2023, 6, 5, 13, 20, 0).unwrap()),
            humidity: 45,
            temperature: Temperature { min: 22.0, max: 26.5, feels_like: Some(24.0) },
            reference_time: Utc.with_ymd_and_hms(2023, 6, 5, 4, 0, 0).unwrap(),
        }
    }

    fn ist(h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(5 * 3600 + 1800).unwrap().with_ymd_and_hms(2023, 6, 5, h, m, 0).unwrap()
    }

    #[test]
    fn removes_null_empty_and_none_text() {
        let input = object(json!({
            "a": null,
            "b": "",
            "c": {},
            "d": [],
            "e": "None",
            "f": 5,
            "g": "x",
        }));

        let expected = DisplayRecord(BTreeMap::from([
            ("f".to_string(), "5".to_string()),
            ("g".to_string(), "x".to_string()),
        ]));

        assert_eq!(format_for_display(&input), expected);
    }

    #[test]
    fn non_empty_nested_values_are_stringified() {
        let input = object(json!({ "t": { "min": 1 }, "l": [1, 2], "ok": true, "f": 22.5 }));
        let out = format_for_display(&input);

        assert_eq!(out.get("t"), Some(r#"{"min":1}"#));
        assert_eq!(out.get("l"), Some("[1,2]"));
        assert_eq!(out.get("ok"), Some("true"));
        assert_eq!(out.get("f"), Some("22.5"));
    }

    #[test]
    fn formatting_is_idempotent() {
        let inputs = [
            json!({ "a": null, "b": "", "e": "None", "f": 5, "g": "x", "h": [0] }),
            json!({
                "temperature": { "temp_min": 22.0, "temp_max": 26.0, "feels_like": null },
                "tags": ["rain", ""],
                "empty": { "inner": {} },
                "flag": false,
                "n": -3.5,
                "blank": {},
            }),
            json!({}),
        ];

        for input in inputs {
            let once = format_for_display(&object(input));
            let twice = format_for_display(&once.to_json());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn snapshot_derives_local_facts() {
        let snapshot = ConditionsSnapshot::new(&conditions(), ist(9, 5));

        assert_eq!(snapshot.ref_time, "9:05");
        assert_eq!(snapshot.time_of_day, TimeOfDay::Morning);
        assert_eq!(snapshot.humidity_level, HumidityBand::Medium);
    }

    #[test]
    fn snapshot_record_skips_absent_fields() {
        let record = ConditionsSnapshot::new(&conditions(), ist(19, 40)).display_record().unwrap();

        assert_eq!(record.get("sunrise_time"), None);
        assert_eq!(record.get("sunset_time"), Some("2023-06-05T13:20:00Z"));
        assert_eq!(record.get("time_of_day"), Some("Evening"));
        assert_eq!(record.get("humidity"), Some("45"));
        assert_eq!(record.get("humidity_level"), Some("medium"));
        assert_eq!(record.get("temp_min"), Some("22.0"));
        assert_eq!(record.get("temp_max"), Some("26.5"));
    }

    #[test]
    fn require_reports_missing_field() {
        let record = DisplayRecord::default();
        let err = record.require("humidity").unwrap_err();
        assert!(err.to_string().contains("humidity"));
    }
}
