use serde_json::Value;
use std::collections::HashSet;

use crate::errors::ResponseValidationError;
use crate::models::{find_pair, Action, Recommendation};

/// Check a raw service response and turn it into typed recommendations.
///
/// Accepts either a bare array or an object with a `recommendations` array.
/// The batch must hold exactly `expected` entries, each with a known `pair`,
/// an `action` of BUY/SELL/HOLD, non-blank `reasoning` and a finite numeric
/// `confidence`. Pairs may not repeat. The first problem found rejects the
/// whole batch.
pub fn validate_response(
    raw: &Value,
    expected: usize,
) -> Result<Vec<Recommendation>, ResponseValidationError> {
    let entries = match raw {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("recommendations") {
            Some(Value::Array(items)) => items,
            _ => return Err(ResponseValidationError::NotASequence),
        },
        _ => return Err(ResponseValidationError::NotASequence),
    };

    if entries.len() != expected {
        return Err(ResponseValidationError::WrongLength {
            expected,
            actual: entries.len(),
        });
    }

    let mut seen = HashSet::new();
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let rec = validate_entry(index, entry)?;
            if !seen.insert(rec.pair.clone()) {
                return Err(ResponseValidationError::DuplicatePair {
                    index,
                    pair: rec.pair,
                });
            }
            Ok(rec)
        })
        .collect()
}

fn validate_entry(index: usize, entry: &Value) -> Result<Recommendation, ResponseValidationError> {
    let obj = entry
        .as_object()
        .ok_or(ResponseValidationError::NotAnObject { index })?;

    let field = |name: &'static str| {
        obj.get(name)
            .filter(|v| !v.is_null())
            .ok_or(ResponseValidationError::MissingField { index, field: name })
    };
    let malformed = |name: &'static str| ResponseValidationError::MalformedField { index, field: name };

    let pair_raw = field("pair")?.as_str().ok_or_else(|| malformed("pair"))?;
    let pair = find_pair(pair_raw).ok_or_else(|| ResponseValidationError::UnknownPair {
        index,
        pair: pair_raw.to_string(),
    })?;

    let action = field("action")?
        .as_str()
        .map(str::trim)
        .and_then(Action::from_wire)
        .ok_or_else(|| malformed("action"))?;

    let reasoning = field("reasoning")?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed("reasoning"))?;

    let confidence = field("confidence")?
        .as_f64()
        .filter(|c| c.is_finite())
        .ok_or_else(|| malformed("confidence"))?;

    Ok(Recommendation {
        pair: pair.symbol.to_string(),
        action,
        reasoning: reasoning.to_string(),
        confidence,
    })
}
