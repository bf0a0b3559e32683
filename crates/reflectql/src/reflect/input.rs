use crate::reflect::{Input, Registry, ScalarKind};
use crate::SchemaError;

/// A Rust type that can appear in an argument position.
///
/// Mirrors [`OutputType`][crate::OutputType] for the input world: scalars,
/// `Option<T>`, `Vec<T>` and `Box<T>` are covered here; input object and
/// enum types implement this by hand through [`Registry::input_object`] and
/// [`Registry::enum_input`].
pub trait InputType {
    fn reflect_input(registry: &mut Registry<'_>) -> Result<Input, SchemaError>;
}

macro_rules! scalar_input {
    ($($ty: ty => $kind: ident),* $(,)?) => {
        $(
            impl InputType for $ty {
                fn reflect_input(_registry: &mut Registry<'_>) -> Result<Input, SchemaError> {
                    Ok(Input::Scalar(ScalarKind::$kind))
                }
            }
        )*
    };
}

scalar_input! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    String => String,
}

impl<T: InputType> InputType for Option<T> {
    fn reflect_input(registry: &mut Registry<'_>) -> Result<Input, SchemaError> {
        let inner = T::reflect_input(registry)?;
        Ok(Input::Ptr(Box::new(inner)))
    }
}

impl<T: InputType> InputType for Vec<T> {
    fn reflect_input(registry: &mut Registry<'_>) -> Result<Input, SchemaError> {
        let inner = T::reflect_input(registry)?;
        Ok(Input::Array(Box::new(inner)))
    }
}

impl<T: InputType + ?Sized> InputType for Box<T> {
    fn reflect_input(registry: &mut Registry<'_>) -> Result<Input, SchemaError> {
        T::reflect_input(registry)
    }
}
