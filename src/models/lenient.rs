//! Tolerant field decoders for roster JSON.
//!
//! Upstream column mapping keeps values it could not coerce in their raw
//! form (an unparsable slot token stays a string, valid attribute JSON is
//! already an object). These decoders accept those shapes so the checks get
//! to see and report them instead of the whole document failing to load.
//! Only JSON numbers count as numbers; a numeric string is not one.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a string as-is; any other JSON value is re-serialized to text.
/// `null` becomes the empty string.
pub(crate) fn string_or_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Decodes a list of phase numbers, keeping malformed entries as NaN.
pub(crate) fn phase_numbers<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values.iter().map(number_or_nan).collect())
}

/// Decodes a list of phases, dropping entries that are not whole numbers.
pub(crate) fn integral_phases<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let phases: Vec<i64> = values
        .iter()
        .map(number_or_nan)
        .filter(|n| n.is_finite() && n.fract() == 0.0)
        .map(|n| n as i64)
        .collect();
    if phases.len() != values.len() {
        tracing::warn!(
            dropped = values.len() - phases.len(),
            "ignoring non-integral phase entries"
        );
    }
    Ok(phases)
}

/// Decodes an integer field. Fractions truncate toward zero and huge
/// values clamp to the `i64` range; `null` and non-numbers become 0.
pub(crate) fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => n.as_f64().map(|f| f as i64).unwrap_or(0),
        },
        Value::Null => 0,
        other => {
            tracing::warn!(value = %other, "non-numeric value in integer field, using 0");
            0
        }
    };
    Ok(number)
}

fn number_or_nan(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
