use crate::reflect::{Obj, ObjKind, Registry, ScalarKind};
use crate::SchemaError;

/// A Rust type that can appear in a response position.
///
/// Scalars, `Option<T>`, `Vec<T>` and `Box<T>` are covered by the impls
/// below; object and enum types implement this by hand through
/// [`Registry::object`] and [`Registry::enum_type`].
pub trait OutputType {
    fn reflect_output(registry: &mut Registry<'_>) -> Result<Obj, SchemaError>;
}

macro_rules! data_output {
    ($($ty: ty => $kind: ident),* $(,)?) => {
        $(
            impl OutputType for $ty {
                fn reflect_output(_registry: &mut Registry<'_>) -> Result<Obj, SchemaError> {
                    Ok(Obj::data(ScalarKind::$kind))
                }
            }
        )*
    };
}

data_output! {
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

impl<T: OutputType> OutputType for Option<T> {
    fn reflect_output(registry: &mut Registry<'_>) -> Result<Obj, SchemaError> {
        let inner = T::reflect_output(registry)?;
        Ok(Obj::anonymous(ObjKind::Ptr(Box::new(inner))))
    }
}

impl<T: OutputType> OutputType for Vec<T> {
    fn reflect_output(registry: &mut Registry<'_>) -> Result<Obj, SchemaError> {
        let inner = T::reflect_output(registry)?;
        Ok(Obj::anonymous(ObjKind::Array(Box::new(inner))))
    }
}

impl<T: OutputType + ?Sized> OutputType for Box<T> {
    fn reflect_output(registry: &mut Registry<'_>) -> Result<Obj, SchemaError> {
        T::reflect_output(registry)
    }
}
