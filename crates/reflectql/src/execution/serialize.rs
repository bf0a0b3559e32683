//! Leaf scalar serialisation.

use crate::resolvers::Scalar;
use serde_json::Value as JsonValue;

/// Convert a resolved leaf scalar into its JSON value.
///
/// Floats are emitted with the shortest text that round-trips for their
/// width; NaN and the infinities have no JSON form and become `null`.
pub(crate) fn scalar_to_json(scalar: &Scalar) -> JsonValue {
    match scalar {
        Scalar::Bool(value) => JsonValue::Bool(*value),
        Scalar::Int(value) => JsonValue::Number((*value).into()),
        Scalar::Uint(value) => JsonValue::Number((*value).into()),
        Scalar::Float32(value) => float32_to_json(*value),
        Scalar::Float64(value) => float64_to_json(*value),
        Scalar::Str(value) => JsonValue::String(value.clone()),
    }
}

fn float64_to_json(value: f64) -> JsonValue {
    match serde_json::Number::from_f64(value) {
        Some(number) => JsonValue::Number(number),
        None => JsonValue::Null,
    }
}

/// An `f32` widened to `f64` drags noise digits along (`0.1f32` would print
/// as `0.10000000149011612`), so take the shortest `f32` text and reparse it.
fn float32_to_json(value: f32) -> JsonValue {
    if !value.is_finite() {
        return JsonValue::Null;
    }
    value
        .to_string()
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

#[cfg(test)]
mod test {
    use super::*;

    fn text(scalar: Scalar) -> String {
        scalar_to_json(&scalar).to_string()
    }

    #[test]
    fn integers_and_bools() {
        assert_eq!(text(Scalar::Int(-42)), "-42");
        assert_eq!(text(Scalar::Uint(42)), "42");
        assert_eq!(text(Scalar::Bool(true)), "true");
        assert_eq!(text(Scalar::Bool(false)), "false");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(text(Scalar::Str(String::from("a\"b\n"))), r#""a\"b\n""#);
    }

    #[test]
    fn floats_round_trip() {
        assert_eq!(text(Scalar::Float64(0.1)), "0.1");
        assert_eq!(text(Scalar::Float32(0.1)), "0.1");
        assert_eq!(text(Scalar::Float64(6.0221413e23)), "6.0221413e23");
    }

    #[test]
    fn non_finite_floats_are_null() {
        assert_eq!(text(Scalar::Float64(f64::NAN)), "null");
        assert_eq!(text(Scalar::Float64(f64::INFINITY)), "null");
        assert_eq!(text(Scalar::Float32(f32::NEG_INFINITY)), "null");
    }
}
