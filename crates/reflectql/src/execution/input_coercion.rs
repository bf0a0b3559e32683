//! Coercing parsed argument literals into the reflected input shapes.

use crate::enums::EnumValue;
use crate::reflect::{Input, ScalarKind};
use crate::resolvers::{CoercedRecord, CoercedValue};
use crate::Schema;
use reflectql_parser::ast::Value;

/// Coerce one parsed literal against its reflected target.
///
/// Error messages stack context as they unwind: `…, property: k` for object
/// fields, `…, Array index: [i]` for list elements. The method name and
/// argument name are appended by the caller.
pub(crate) fn match_input_value(
    value: &Value,
    target: &Input,
    schema: &Schema,
) -> Result<CoercedValue, String> {
    if let Input::Ptr(inner) = target {
        // a null literal leaves an optional argument absent
        if matches!(value, Value::Null) {
            return Ok(CoercedValue::Null);
        }
        return match_input_value(value, inner, schema);
    }

    match value {
        Value::Variable(_) => Err(String::from("variable arguments are currently unsupported")),
        Value::Null => Ok(CoercedValue::Null),
        Value::Enum(name) => {
            let Input::Enum { key } = target else {
                return Err(mismatch(target));
            };
            let Some(representation) = schema.enums.representation_of(key, name) else {
                return Err(format!("unknown enum value {name} for enum {key}"));
            };
            Ok(match representation {
                EnumValue::Int(value) => CoercedValue::Int(*value),
                EnumValue::Str(value) => CoercedValue::Str(value.clone()),
            })
        }
        Value::Int(int) => match target {
            Input::Scalar(kind) => coerce_int(*int, *kind, target),
            _ => Err(mismatch(target)),
        },
        Value::Float(float) => match target {
            Input::Scalar(ScalarKind::Float32) => Ok(CoercedValue::Float32(*float as f32)),
            Input::Scalar(ScalarKind::Float64) => Ok(CoercedValue::Float64(*float)),
            _ => Err(mismatch(target)),
        },
        Value::String(string) => match target {
            Input::Scalar(ScalarKind::String) => Ok(CoercedValue::Str(string.clone())),
            _ => Err(mismatch(target)),
        },
        Value::Boolean(boolean) => match target {
            Input::Scalar(ScalarKind::Bool) => Ok(CoercedValue::Bool(*boolean)),
            _ => Err(mismatch(target)),
        },
        Value::List(items) => {
            let Input::Array(elem) = target else {
                return Err(mismatch(target));
            };
            let mut list = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let coerced = match_input_value(item, elem, schema)
                    .map_err(|err| format!("{err}, Array index: [{index}]"))?;
                list.push(coerced);
            }
            Ok(CoercedValue::List(list))
        }
        Value::Object(object) => {
            let fields = match target {
                Input::Struct { fields, .. } => fields,
                Input::StructRef { name } => match schema.in_types.get(name) {
                    Some(Input::Struct { fields, .. }) => fields,
                    _ => return Err(format!("unknown input type {name}")),
                },
                _ => return Err(mismatch(target)),
            };

            let mut record = CoercedRecord::default();
            for (key, item) in object {
                let Some(field_input) = fields.get(key) else {
                    return Err(format!("undefined property {key}"));
                };
                let coerced = match_input_value(item, field_input, schema)
                    .map_err(|err| format!("{err}, property: {key}"))?;
                record.insert(key.clone(), coerced);
            }
            Ok(CoercedValue::Record(record))
        }
    }
}

fn coerce_int(int: i64, kind: ScalarKind, target: &Input) -> Result<CoercedValue, String> {
    macro_rules! narrow {
        ($ty: ty, Int) => {
            <$ty>::try_from(int)
                .map(|value| CoercedValue::Int(value.into()))
                .map_err(|_| overflow(int, stringify!($ty)))
        };
        ($ty: ty, Uint) => {
            <$ty>::try_from(int)
                .map(|value| CoercedValue::Uint(value.into()))
                .map_err(|_| overflow(int, stringify!($ty)))
        };
    }

    match kind {
        ScalarKind::Int8 => narrow!(i8, Int),
        ScalarKind::Int16 => narrow!(i16, Int),
        ScalarKind::Int32 => narrow!(i32, Int),
        ScalarKind::Int64 => Ok(CoercedValue::Int(int)),
        ScalarKind::Uint8 => narrow!(u8, Uint),
        ScalarKind::Uint16 => narrow!(u16, Uint),
        ScalarKind::Uint32 => narrow!(u32, Uint),
        ScalarKind::Uint64 => narrow!(u64, Uint),
        ScalarKind::Float32 => Ok(CoercedValue::Float32(int as f32)),
        ScalarKind::Float64 => Ok(CoercedValue::Float64(int as f64)),
        ScalarKind::Bool | ScalarKind::String => Err(mismatch(target)),
    }
}

fn mismatch(target: &Input) -> String {
    format!(
        "argument type mismatch, expected {}",
        target.expected_text()
    )
}

fn overflow(int: i64, ty: &str) -> String {
    format!("value {int} overflows {ty}")
}
