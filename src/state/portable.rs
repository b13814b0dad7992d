use serde_json::Value;

use crate::errors::{PlannerError, Result};
use crate::models::{CorrelationInput, CorrelationSet, Currency};

/// Serialize the correlation set to the transferable `[{id, d1, 4h, 1h}]` form.
pub fn export_portable(set: &CorrelationSet) -> Result<String> {
    Ok(serde_json::to_string(set)?)
}

/// Parse a portable payload into a complete replacement set.
///
/// The payload must be a non-empty array of objects, each with at least a
/// currency `id` and a numeric `d1`. Missing `4h`/`1h` read as zero, as do
/// currencies the payload leaves out. Nothing is returned unless every entry
/// is valid, so callers can swap the result in wholesale.
pub fn parse_portable(text: &str) -> Result<CorrelationSet> {
    let raw: Value = serde_json::from_str(text.trim()).map_err(|e| invalid(format!("not JSON: {}", e)))?;

    let entries = raw
        .as_array()
        .ok_or_else(|| invalid("expected an array".to_string()))?;
    if entries.is_empty() {
        return Err(invalid("payload is empty".to_string()));
    }

    let inputs = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| parse_entry(i, entry))
        .collect::<Result<Vec<_>>>()?;

    CorrelationSet::from_inputs(inputs)
}

fn parse_entry(index: usize, entry: &Value) -> Result<CorrelationInput> {
    let obj = entry
        .as_object()
        .ok_or_else(|| invalid(format!("entry {} is not an object", index)))?;

    let id_raw = obj
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(format!("entry {} has no string `id`", index)))?;
    let id = Currency::from_str_loose(id_raw).ok_or_else(|| PlannerError::UnknownCurrency(id_raw.to_string()))?;

    let d1 = obj
        .get("d1")
        .and_then(Value::as_f64)
        .ok_or_else(|| invalid(format!("entry {} has no numeric `d1`", index)))?;

    let optional = |key: &str| -> Result<f64> {
        match obj.get(key) {
            None | Some(Value::Null) => Ok(0.0),
            Some(v) => v
                .as_f64()
                .ok_or_else(|| invalid(format!("entry {} has non-numeric `{}`", index, key))),
        }
    };

    Ok(CorrelationInput::new(id, d1, optional("4h")?, optional("1h")?))
}

fn invalid(reason: String) -> PlannerError {
    PlannerError::InvalidPortablePayload { reason }
}
