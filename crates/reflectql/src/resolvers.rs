//! The dynamic value layer the executor walks.
//!
//! Every object type registered in the schema has a runtime counterpart
//! implementing [`ObjectSource`]. The executor asks it for field values by
//! source name and receives a [`SourceValue`], whose shape must match the
//! reflected descriptor for that field.

use crate::collections::IndexMap;
use crate::enums::EnumValue;
use std::collections::HashMap;

/// An owned leaf scalar value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
}

macro_rules! scalar_from {
    ($($ty: ty => |$value: ident| $expr: expr),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from($value: $ty) -> Self {
                    $expr
                }
            }
        )*
    };
}

scalar_from! {
    bool => |v| Scalar::Bool(v),
    i8 => |v| Scalar::Int(v.into()),
    i16 => |v| Scalar::Int(v.into()),
    i32 => |v| Scalar::Int(v.into()),
    i64 => |v| Scalar::Int(v),
    u8 => |v| Scalar::Uint(v.into()),
    u16 => |v| Scalar::Uint(v.into()),
    u32 => |v| Scalar::Uint(v.into()),
    u64 => |v| Scalar::Uint(v),
    f32 => |v| Scalar::Float32(v),
    f64 => |v| Scalar::Float64(v),
    String => |v| Scalar::Str(v),
    &str => |v| Scalar::Str(v.to_string()),
}

/// A GraphQL object whose fields can be resolved during execution.
///
/// Use the [`impl_object_source!`][crate::impl_object_source] macro to
/// implement this trait with reduced boilerplate.
pub trait ObjectSource {
    /// The name of the object type this value belongs to, as registered
    /// during reflection.
    fn type_name(&self) -> &str;

    /// Resolves a field of this object.
    ///
    /// For callable fields, `arguments` carries the coerced argument records;
    /// for plain data fields it is empty. The returned value is expected to
    /// match the reflected shape of the field.
    fn resolve_field<'a>(
        &'a self,
        field_name: &'a str,
        arguments: &'a Arguments<'a>,
    ) -> Result<SourceValue<'a>, ResolveError>;
}

impl<T: ObjectSource + ?Sized> ObjectSource for &T {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn resolve_field<'a>(
        &'a self,
        field_name: &'a str,
        arguments: &'a Arguments<'a>,
    ) -> Result<SourceValue<'a>, ResolveError> {
        (**self).resolve_field(field_name, arguments)
    }
}

impl<T: ObjectSource + ?Sized> ObjectSource for Box<T> {
    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn resolve_field<'a>(
        &'a self,
        field_name: &'a str,
        arguments: &'a Arguments<'a>,
    ) -> Result<SourceValue<'a>, ResolveError> {
        (**self).resolve_field(field_name, arguments)
    }
}

/// An error reported by an [`ObjectSource`]; recorded in the response's
/// error list.
#[derive(Debug)]
pub struct ResolveError {
    pub message: String,
}

impl ResolveError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn unknown_field(field_name: &str, object: &dyn ObjectSource) -> Self {
        Self {
            message: format!(
                "unexpected field name: {field_name} in type {}",
                object.type_name()
            ),
        }
    }
}

impl From<String> for ResolveError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ResolveError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// The value of a resolved field.
pub enum SourceValue<'a> {
    /// A leaf scalar, serialised per its reflected kind.
    Leaf(Scalar),
    /// A nil optional; serialises as `null`.
    Null,
    /// Expected where the reflected type is an object.
    Object(Box<dyn ObjectSource + 'a>),
    /// Expected where the reflected type is a sequence.
    List(Box<dyn Iterator<Item = SourceValue<'a>> + 'a>),
    /// The representation of a registered enum value.
    Enum(EnumValue),
}

impl<'a> SourceValue<'a> {
    /// Construct a null value.
    pub fn null() -> Self {
        Self::Null
    }

    /// Construct a leaf value from anything convertible to a scalar.
    pub fn leaf(scalar: impl Into<Scalar>) -> Self {
        Self::Leaf(scalar.into())
    }

    /// Construct a leaf value or null from an optional scalar.
    pub fn opt_leaf<T: Into<Scalar>>(opt: Option<T>) -> Self {
        match opt {
            Some(scalar) => Self::Leaf(scalar.into()),
            None => Self::Null,
        }
    }

    /// Construct an object value from the source for that object.
    pub fn object(source: impl ObjectSource + 'a) -> Self {
        Self::Object(Box::new(source))
    }

    /// Construct an object value or null from an optional source.
    pub fn opt_object(opt_source: Option<impl ObjectSource + 'a>) -> Self {
        match opt_source {
            Some(source) => Self::Object(Box::new(source)),
            None => Self::Null,
        }
    }

    /// Construct a list value from an iterator.
    pub fn list<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        I::IntoIter: 'a,
    {
        Self::List(Box::new(iter.into_iter()))
    }

    /// Construct an enum value from its representation.
    pub fn enum_value(representation: impl Into<EnumValue>) -> Self {
        Self::Enum(representation.into())
    }
}

/// Per-request values shared with methods that declare the ambient context
/// parameter.
#[derive(Debug, Default)]
pub struct RequestCtx {
    pub values: HashMap<String, serde_json::Value>,
}

/// The coerced arguments handed to a callable field.
pub struct Arguments<'a> {
    pub(crate) records: Vec<CoercedRecord>,
    pub(crate) ctx: Option<&'a RequestCtx>,
}

impl<'a> Arguments<'a> {
    pub(crate) fn empty() -> Arguments<'static> {
        Arguments {
            records: Vec::new(),
            ctx: None,
        }
    }

    /// Look an argument up by name across all records.
    pub fn get(&self, name: &str) -> Option<&CoercedValue> {
        self.records.iter().find_map(|record| record.get(name))
    }

    /// The argument record at `index`, in declaration order.
    pub fn record(&self, index: usize) -> Option<&CoercedRecord> {
        self.records.get(index)
    }

    /// The request context, when the method declares the ambient parameter.
    pub fn ctx(&self) -> Option<&'a RequestCtx> {
        self.ctx
    }
}

pub type CoercedRecord = IndexMap<String, CoercedValue>;

/// A parsed literal after coercion against the reflected input shape.
#[derive(Clone, Debug, PartialEq)]
pub enum CoercedValue {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
    List(Vec<CoercedValue>),
    Record(CoercedRecord),
}

impl CoercedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CoercedValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CoercedValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CoercedValue::Int(value) => Some(*value),
            CoercedValue::Uint(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            CoercedValue::Uint(value) => Some(*value),
            CoercedValue::Int(value) => u64::try_from(*value).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CoercedValue::Float64(value) => Some(*value),
            CoercedValue::Float32(value) => Some((*value).into()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CoercedValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[CoercedValue]> {
        match self {
            CoercedValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&CoercedRecord> {
        match self {
            CoercedValue::Record(record) => Some(record),
            _ => None,
        }
    }
}
