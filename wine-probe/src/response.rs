// wine-probe/src/response.rs
// ============================================================================
// Module: Prediction Response
// Description: Extraction of the `wine_quality` value from response JSON.
// Purpose: Accept a number or a sequence of numbers and reject everything else.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The endpoint answers with a JSON object carrying `wine_quality`. Only a
//! JSON number or an array of JSON numbers is accepted; booleans, strings,
//! null, and nested objects are reported as non-numeric. Numbers keep their
//! JSON representation, so `6.0` prints as `6.0` and `6` as `6`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde_json::Number;
use serde_json::Value;

use crate::checks::CheckError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Response field carrying the model output.
pub const PREDICTION_FIELD: &str = "wine_quality";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Numeric model output extracted from a prediction response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    /// Single score.
    Scalar(Number),
    /// Ordered sequence of scores.
    Series(Vec<Number>),
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => write!(f, "{value}"),
            Self::Series(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

// ============================================================================
// SECTION: Extraction
// ============================================================================

/// Extracts the prediction from a decoded response body.
///
/// # Errors
///
/// Returns [`CheckError::MissingField`] when the body is not an object or has
/// no `wine_quality` key, and [`CheckError::NonNumericPrediction`] when the
/// value is neither a number nor an array of numbers.
pub fn extract_prediction(body: &Value) -> Result<Prediction, CheckError> {
    let value = body
        .as_object()
        .and_then(|object| object.get(PREDICTION_FIELD))
        .ok_or(CheckError::MissingField {
            field: PREDICTION_FIELD,
        })?;
    match value {
        Value::Number(number) => Ok(Prediction::Scalar(number.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Number(number) => Some(number.clone()),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Prediction::Series)
            .ok_or(CheckError::NonNumericPrediction),
        Value::Null | Value::Bool(_) | Value::String(_) | Value::Object(_) => {
            Err(CheckError::NonNumericPrediction)
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
