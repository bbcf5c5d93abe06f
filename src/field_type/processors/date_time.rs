//! `date`, `time` and `datetime` processors.

use crate::field_type::processor::{FieldTypeProcessor, ProcessorError};
use crate::field_type::vocabulary::{DATETIME_DEFAULT, DATE_DEFAULT, TIME_DEFAULT};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::warn;

const DATETIME: &str = "datetime";
const DATE_INTERVAL: &str = "dateInterval";

/// Components of an adjustment interval, in ISO 8601 order.
const INTERVAL_KEYS: [&str; 6] = ["year", "month", "day", "hour", "minute", "second"];

#[allow(clippy::expect_used)]
static INTERVAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("interval regex is valid")
});

#[derive(Debug, Default)]
pub struct DateProcessor;

impl FieldTypeProcessor for DateProcessor {
    fn pre_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        DATE_DEFAULT.to_internal(&mut hash);
        Ok(hash)
    }

    fn post_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        DATE_DEFAULT.to_token(&mut hash);
        Ok(hash)
    }
}

#[derive(Debug, Default)]
pub struct TimeProcessor;

impl FieldTypeProcessor for TimeProcessor {
    fn pre_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        TIME_DEFAULT.to_internal(&mut hash);
        Ok(hash)
    }

    fn post_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        TIME_DEFAULT.to_token(&mut hash);
        Ok(hash)
    }
}

/// `datetime`: `defaultType` setting plus the `dateInterval` used by
/// `DEFAULT_CURRENT_DATE_ADJUSTED`.
///
/// Storage keeps the interval as an ISO 8601 duration (`P0Y0M1DT2H0M0S`); clients see a
/// hash of components (`{"year": 0, ..., "second": 0}`).
#[derive(Debug, Default)]
pub struct DateAndTimeProcessor;

impl FieldTypeProcessor for DateAndTimeProcessor {
    fn pre_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        DATETIME_DEFAULT.to_internal(&mut hash);
        if let Some(slot) = hash.as_object_mut().and_then(|m| m.get_mut(DATE_INTERVAL)) {
            let duration = match slot {
                Value::Object(components) => Some(interval_to_duration(components)?),
                _ => None,
            };
            if let Some(duration) = duration {
                *slot = Value::String(duration);
            }
        }
        Ok(hash)
    }

    fn post_process_field_settings_hash(&self, mut hash: Value) -> Result<Value, ProcessorError> {
        DATETIME_DEFAULT.to_token(&mut hash);
        if let Some(slot) = hash.as_object_mut().and_then(|m| m.get_mut(DATE_INTERVAL)) {
            if let Some(duration) = slot.as_str() {
                match duration_to_interval(duration) {
                    Some(components) => *slot = Value::Object(components),
                    None => warn!(value = %duration, "Unparseable dateInterval left unchanged"),
                }
            }
        }
        Ok(hash)
    }
}

fn interval_to_duration(components: &Map<String, Value>) -> Result<String, ProcessorError> {
    let mut parts = [0u64; 6];
    for (idx, key) in INTERVAL_KEYS.iter().enumerate() {
        parts[idx] = match components.get(*key) {
            None | Some(Value::Null) => 0,
            Some(v) => v
                .as_u64()
                .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
                .ok_or_else(|| ProcessorError::InvalidHash {
                    field_type: DATETIME.to_string(),
                    reason: format!("{DATE_INTERVAL}.{key} must be a non-negative integer"),
                })?,
        };
    }
    let [y, m, d, h, i, s] = parts;
    Ok(format!("P{y}Y{m}M{d}DT{h}H{i}M{s}S"))
}

fn duration_to_interval(duration: &str) -> Option<Map<String, Value>> {
    let caps = INTERVAL_RE.captures(duration)?;
    let mut components = Map::new();
    for (idx, key) in INTERVAL_KEYS.iter().enumerate() {
        let value = caps
            .get(idx + 1)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0);
        components.insert((*key).to_string(), Value::from(value));
    }
    Some(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_datetime_interval_out() {
        let out = DateAndTimeProcessor
            .post_process_field_settings_hash(json!({
                "defaultType": 2,
                "useSeconds": false,
                "dateInterval": "P1DT2H"
            }))
            .unwrap();
        assert_eq!(
            out,
            json!({
                "defaultType": "DEFAULT_CURRENT_DATE_ADJUSTED",
                "useSeconds": false,
                "dateInterval": {"year": 0, "month": 0, "day": 1, "hour": 2, "minute": 0, "second": 0}
            })
        );
    }

    #[test]
    fn test_datetime_interval_in() {
        let out = DateAndTimeProcessor
            .pre_process_field_settings_hash(json!({
                "defaultType": "DEFAULT_CURRENT_DATE_ADJUSTED",
                "dateInterval": {"day": 1, "hour": "2"}
            }))
            .unwrap();
        assert_eq!(
            out,
            json!({"defaultType": 2, "dateInterval": "P0Y0M1DT2H0M0S"})
        );
    }

    #[test]
    fn test_datetime_invalid_interval_component() {
        let err = DateAndTimeProcessor
            .pre_process_field_settings_hash(json!({"dateInterval": {"day": -1}}))
            .unwrap_err();
        assert!(matches!(err, ProcessorError::InvalidHash { .. }));
    }

    #[test]
    fn test_null_interval_untouched() {
        let hash = json!({"defaultType": 0, "dateInterval": null});
        let out = DateAndTimeProcessor
            .post_process_field_settings_hash(hash)
            .unwrap();
        assert_eq!(out, json!({"defaultType": "DEFAULT_EMPTY", "dateInterval": null}));
    }

    #[test]
    fn test_date_and_time_tokens() {
        assert_eq!(
            DateProcessor
                .post_process_field_settings_hash(json!({"defaultType": 1}))
                .unwrap(),
            json!({"defaultType": "DEFAULT_CURRENT_DATE"})
        );
        assert_eq!(
            TimeProcessor
                .pre_process_field_settings_hash(json!({"defaultType": "DEFAULT_CURRENT_TIME"}))
                .unwrap(),
            json!({"defaultType": 1})
        );
    }
}
