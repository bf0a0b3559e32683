/// Implement [`ObjectSource`][crate::ObjectSource] for a type with one block
/// per resolvable field.
///
/// ```rust
/// use reflectql::{impl_object_source, SourceValue};
///
/// struct Todo {
///     id: String,
///     done: bool,
/// }
///
/// impl_object_source! {
///     for Todo as "Todo":
///
///     fn id(&self_) {
///         Ok(SourceValue::leaf(self_.id.as_str()))
///     }
///
///     fn done(&self_) {
///         Ok(SourceValue::leaf(self_.done))
///     }
/// }
/// ```
///
/// Callable fields take the coerced arguments as a second binding:
/// `fn search(&self_, args) { … }`.
#[macro_export]
macro_rules! impl_object_source {
    (
        for $ty: ty as $type_name: literal:
        $(
            fn $field_name: ident(
                $( &$self_: ident $(, $( $args: ident $(,)? )? )? )?
            ) $block: block
        )*
    ) => {
        impl $crate::ObjectSource for $ty {
            fn type_name(&self) -> &str {
                $type_name
            }

            fn resolve_field<'a>(
                &'a self,
                field_name: &'a str,
                arguments: &'a $crate::Arguments<'a>,
            ) -> Result<$crate::SourceValue<'a>, $crate::ResolveError> {
                let _allow_unused = arguments;
                match field_name {
                    $(
                        stringify!($field_name) => {
                            $(
                                let $self_ = self;
                                $($(
                                    let $args = arguments;
                                )?)?
                            )?
                            $block
                        }
                    )*
                    _ => Err($crate::ResolveError::unknown_field(field_name, self)),
                }
            }
        }
    };
}
