//! Shared validation helpers for inbound HTTP adapters.
//!
//! Bill amounts arrive as JSON numbers or strings (forms and scripts both
//! talk to this API), so handlers coerce them here rather than letting serde
//! reject one representation with an opaque deserialization error.

use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::domain::Error;

fn invalid_amount_error(field: &str, value: &Value) -> Error {
    Error::invalid_amount(format!("{field} must be a decimal amount")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_amount",
    }))
}

/// Coerce a JSON value into a decimal amount. Accepts numbers and numeric
/// strings; everything else is an invalid amount.
pub(crate) fn parse_amount(field: &str, value: &Value) -> Result<Decimal, Error> {
    let parsed = match value {
        Value::Number(number) => number.to_string().parse::<Decimal>().ok(),
        Value::String(raw) => raw.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid_amount_error(field, value))
}

/// Like [`parse_amount`] but treats an absent or null value as zero.
pub(crate) fn parse_optional_amount(field: &str, value: Option<&Value>) -> Result<Decimal, Error> {
    match value {
        None | Some(Value::Null) => Ok(Decimal::ZERO),
        Some(value) => parse_amount(field, value),
    }
}

/// Like [`parse_amount`] but an absent or null value is a missing-field
/// request error rather than an invalid amount.
pub(crate) fn parse_required_amount(field: &str, value: Option<&Value>) -> Result<Decimal, Error> {
    match value {
        None | Some(Value::Null) => Err(Error::invalid_request(format!(
            "missing required field: {field}"
        ))
        .with_details(json!({ "field": field, "code": "missing_field" }))),
        Some(value) => parse_amount(field, value),
    }
}
