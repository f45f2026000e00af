//! Payload normalization
//!
//! Clients send samples either as a direct object
//! `{"timestamps": [...], "rms_values": [...]}` or as the association list
//! `{"keys": ["timestamps", "rms_values"], "values": [[...], [...]]}` produced
//! by serializers that cannot emit dictionaries. Each shape is handled by its
//! own [`PayloadShape`] and the first shape that yields data wins.

use crate::error::{FilterError, Result};
use crate::types::SampleSeries;
use serde_json::{Map, Value};

pub const TIMESTAMPS_FIELD: &str = "timestamps";
pub const RMS_VALUES_FIELD: &str = "rms_values";

const NO_DATA: &str = "No data received";
const INVALID_FORMAT: &str = "Invalid data format";

/// A recognizer for one payload encoding
pub trait PayloadShape {
    fn name(&self) -> &'static str;

    /// Extract `(timestamps, rms_values)`.
    ///
    /// Returns `Ok(None)` when the payload is not in this shape or either
    /// sequence is missing or empty.
    fn extract(&self, payload: &Map<String, Value>) -> Result<Option<(Vec<f64>, Vec<f64>)>>;
}

/// `{"timestamps": [...], "rms_values": [...]}`
pub struct DirectFields;

impl PayloadShape for DirectFields {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn extract(&self, payload: &Map<String, Value>) -> Result<Option<(Vec<f64>, Vec<f64>)>> {
        let timestamps = match payload.get(TIMESTAMPS_FIELD) {
            Some(v) => numeric_sequence(TIMESTAMPS_FIELD, v)?,
            None => None,
        };
        let rms_values = match payload.get(RMS_VALUES_FIELD) {
            Some(v) => numeric_sequence(RMS_VALUES_FIELD, v)?,
            None => None,
        };

        Ok(timestamps.zip(rms_values))
    }
}

/// `{"keys": ["timestamps", "rms_values"], "values": [[...], [...]]}`
pub struct KeyValueList;

impl KeyValueList {
    fn lookup<'a>(keys: &[Value], values: &'a [Value], name: &str) -> Option<&'a Value> {
        let index = keys.iter().position(|k| k.as_str() == Some(name))?;
        values.get(index)
    }
}

impl PayloadShape for KeyValueList {
    fn name(&self) -> &'static str {
        "keys/values"
    }

    fn extract(&self, payload: &Map<String, Value>) -> Result<Option<(Vec<f64>, Vec<f64>)>> {
        let (Some(Value::Array(keys)), Some(Value::Array(values))) =
            (payload.get("keys"), payload.get("values"))
        else {
            return Ok(None);
        };

        let (Some(ts), Some(rms)) = (
            Self::lookup(keys, values, TIMESTAMPS_FIELD),
            Self::lookup(keys, values, RMS_VALUES_FIELD),
        ) else {
            return Ok(None);
        };

        let timestamps = numeric_sequence(TIMESTAMPS_FIELD, ts)?;
        let rms_values = numeric_sequence(RMS_VALUES_FIELD, rms)?;
        Ok(timestamps.zip(rms_values))
    }
}

const SHAPES: [&dyn PayloadShape; 2] = [&DirectFields, &KeyValueList];

/// Read a JSON array of numbers. `null` elements become NaN (missing sample).
///
/// Non-arrays and empty arrays are reported as absent.
fn numeric_sequence(field: &str, value: &Value) -> Result<Option<Vec<f64>>> {
    let items = match value {
        Value::Array(items) if !items.is_empty() => items,
        _ => return Ok(None),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Number(n) => n.as_f64().ok_or_else(|| {
                FilterError::InvalidInput(format!("Unrepresentable number in '{}' at index {}", field, i))
            }),
            Value::Null => Ok(f64::NAN),
            other => Err(FilterError::InvalidInput(format!(
                "Non-numeric value in '{}' at index {}: {}",
                field, i, other
            ))),
        })
        .collect::<Result<Vec<f64>>>()
        .map(Some)
}

/// Normalize a request payload into a [`SampleSeries`]
pub fn normalize(payload: &Value) -> Result<SampleSeries> {
    let fields = match payload {
        Value::Object(map) if !map.is_empty() => map,
        Value::Null | Value::Object(_) => return Err(FilterError::InvalidInput(NO_DATA.to_string())),
        Value::Array(items) if items.is_empty() => {
            return Err(FilterError::InvalidInput(NO_DATA.to_string()))
        }
        _ => return Err(FilterError::InvalidInput(INVALID_FORMAT.to_string())),
    };

    for shape in SHAPES {
        if let Some((timestamps, magnitudes)) = shape.extract(fields)? {
            if timestamps.len() != magnitudes.len() {
                return Err(FilterError::InvalidInput(format!(
                    "Length mismatch: {} timestamps but {} rms_values",
                    timestamps.len(),
                    magnitudes.len()
                )));
            }
            log::debug!(
                "Extracted {} samples from {} format",
                magnitudes.len(),
                shape.name()
            );
            return Ok(SampleSeries {
                timestamps,
                magnitudes,
            });
        }
    }

    log::warn!("Could not extract timestamps or rms_values from payload");
    Err(FilterError::InvalidInput(INVALID_FORMAT.to_string()))
}
