//! A reflection-style GraphQL execution engine: the Rust types registered as
//! the query and mutation roots *are* the schema.
//!
//! Registration walks the root types through [`OutputType`]/[`InputType`]
//! and mirrors them into descriptor graphs; execution parses a query
//! document, walks its selections against those descriptors and the live
//! root values, and produces an insertion-ordered JSON response plus an
//! accumulated error list.
//!
//! ```rust
//! use reflectql::{
//!     impl_object_source, Obj, OutputType, Registry, Schema, SchemaError,
//!     SchemaOptions, SourceValue,
//! };
//!
//! struct Query {
//!     greeting: String,
//! }
//!
//! impl OutputType for Query {
//!     fn reflect_output(registry: &mut Registry<'_>) -> Result<Obj, SchemaError> {
//!         registry.object("Query", |obj| obj.field::<String>("greeting"))
//!     }
//! }
//!
//! impl_object_source! {
//!     for Query as "Query":
//!
//!     fn greeting(&self_) {
//!         Ok(SourceValue::leaf(self_.greeting.as_str()))
//!     }
//! }
//!
//! struct Mutation;
//!
//! impl OutputType for Mutation {
//!     fn reflect_output(registry: &mut Registry<'_>) -> Result<Obj, SchemaError> {
//!         registry.object("Mutation", |_obj| Ok(()))
//!     }
//! }
//!
//! impl_object_source! {
//!     for Mutation as "Mutation":
//! }
//!
//! let mut schema = Schema::new();
//! schema
//!     .register(
//!         Query { greeting: String::from("hello") },
//!         Mutation,
//!         SchemaOptions::default(),
//!     )
//!     .unwrap();
//!
//! let (data, errors) = schema.resolve("{ greeting }", "");
//! assert!(errors.is_empty());
//! assert_eq!(data, r#"{"greeting":"hello"}"#);
//! ```

pub mod collections;
mod enums;
mod execution;
mod macros;
mod reflect;
mod resolvers;
mod response;

pub use crate::enums::EnumValue;
pub use crate::reflect::{
    InField, Input, InputObjectBuilder, InputType, MethodBuilder, MethodMeta, Obj, ObjKind,
    ObjectBuilder, OutputType, ParamGroup, RecordBuilder, Registry, ScalarKind,
};
pub use crate::resolvers::{
    Arguments, CoercedRecord, CoercedValue, ObjectSource, RequestCtx, ResolveError, Scalar,
    SourceValue,
};
pub use crate::response::{generate_response, GraphQLError};

/// Re-export of the document parser used by [`Schema::resolve`].
pub use reflectql_parser as parser;

use crate::enums::EnumRegistry;
use crate::execution::engine::Ctx;
use parking_lot::Mutex;
use reflectql_parser::parse_query_and_check_names;

/// A failure while registering enums or root types.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("`{0}` is not a valid GraphQL name")]
    InvalidName(String),
    #[error("enum {0} is already registered")]
    DuplicateEnum(String),
    #[error("enum {0} must have at least one value")]
    EmptyEnum(String),
    #[error("enum {0} mixes string and integer representations")]
    MixedEnumRepr(String),
    #[error("enum {0} registers the value {1} twice")]
    DuplicateEnumValue(String, String),
    #[error("enum {0} reuses an already registered representation for {1}")]
    DuplicateEnumRepr(String, String),
    #[error("enum {0} is not registered")]
    UnknownEnum(String),
    #[error("type {0} already has a field named {1}")]
    DuplicateField(String, String),
    #[error("method {0} declares the argument {1} twice")]
    DuplicateArgument(String, String),
    #[error("root type {0} must be a registered object type")]
    RootNotObject(String),
}

/// Registration options.
#[derive(Clone, Copy, Debug)]
pub struct SchemaOptions {
    /// How deep selection resolution may nest before it short-circuits with
    /// a `reached max depth` error.
    pub max_depth: u8,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self { max_depth: 255 }
    }
}

pub(crate) struct Root {
    pub(crate) obj: Obj,
    pub(crate) value: Box<dyn ObjectSource + Send + Sync>,
}

pub(crate) struct Roots {
    pub(crate) query: Root,
    pub(crate) mutation: Root,
}

/// A registered schema: the reflected type universe plus the root values
/// queries and mutations resolve against.
///
/// Execution is single-call serial: every `resolve` takes the schema's lock
/// for the duration of the call.
pub struct Schema {
    pub(crate) types: collections::IndexMap<String, Obj>,
    pub(crate) in_types: collections::IndexMap<String, Input>,
    pub(crate) enums: EnumRegistry,
    pub(crate) max_depth: u8,
    roots: Option<Roots>,
    lock: Mutex<()>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    pub fn new() -> Self {
        Self {
            types: collections::IndexMap::default(),
            in_types: collections::IndexMap::default(),
            enums: EnumRegistry::default(),
            max_depth: SchemaOptions::default().max_depth,
            roots: None,
            lock: Mutex::new(()),
        }
    }

    /// Register an enum under `name` with its value names and
    /// representations. Enums must be registered before the root types that
    /// use them.
    pub fn register_enum<K, V>(
        &mut self,
        name: &str,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), SchemaError>
    where
        K: Into<String>,
        V: Into<EnumValue>,
    {
        self.enums.register(name, values)
    }

    /// Reflect the query and mutation root types and take ownership of their
    /// values.
    pub fn register<Q, M>(
        &mut self,
        query_root: Q,
        mutation_root: M,
        options: SchemaOptions,
    ) -> Result<(), SchemaError>
    where
        Q: OutputType + ObjectSource + Send + Sync + 'static,
        M: OutputType + ObjectSource + Send + Sync + 'static,
    {
        let (query_obj, mutation_obj) = {
            let mut registry = Registry::new(&mut self.types, &mut self.in_types, &self.enums);
            (
                Q::reflect_output(&mut registry)?,
                M::reflect_output(&mut registry)?,
            )
        };
        let query_obj = resolve_root_obj(&self.types, query_obj)?;
        let mutation_obj = resolve_root_obj(&self.types, mutation_obj)?;

        self.max_depth = options.max_depth;
        self.roots = Some(Roots {
            query: Root {
                obj: query_obj,
                value: Box::new(query_root),
            },
            mutation: Root {
                obj: mutation_obj,
                value: Box::new(mutation_root),
            },
        });
        tracing::debug!(
            types = self.types.len(),
            input_types = self.in_types.len(),
            max_depth = self.max_depth,
            "schema registered"
        );
        Ok(())
    }

    /// Execute a query document and return the serialised `data` fragment
    /// plus the accumulated errors.
    ///
    /// `operator_target` selects the operation when the document defines more
    /// than one; it may be empty otherwise.
    pub fn resolve(&self, query: &str, operator_target: &str) -> (String, Vec<GraphQLError>) {
        self.resolve_with_ctx(query, operator_target, &RequestCtx::default())
    }

    /// Like [`resolve`][Self::resolve], with per-request values made
    /// available to methods that declare the ambient context parameter.
    pub fn resolve_with_ctx(
        &self,
        query: &str,
        operator_target: &str,
        request: &RequestCtx,
    ) -> (String, Vec<GraphQLError>) {
        let _guard = self.lock.lock();

        let Some(roots) = &self.roots else {
            return (
                String::from("{}"),
                vec![GraphQLError::new("schema has no registered root types")],
            );
        };

        let (fragments, operators, errs) = parse_query_and_check_names(query);
        if !errs.is_empty() {
            return (
                String::from("{}"),
                errs.into_iter().map(GraphQLError::from).collect(),
            );
        }

        let mut ctx = Ctx {
            schema: self,
            roots,
            fragments: &fragments,
            request,
            directives: Vec::new(),
            errors: Vec::new(),
        };

        let operator = match operators.len() {
            0 => return (String::from("{}"), Vec::new()),
            1 => operators.values().next(),
            _ => {
                if operator_target.is_empty() {
                    return (
                        String::from("{}"),
                        vec![GraphQLError::new("multiple operators without target")],
                    );
                }
                match operators.get(operator_target) {
                    Some(operator) => Some(operator),
                    None => {
                        let available: Vec<&str> =
                            operators.keys().map(String::as_str).collect();
                        return (
                            String::from("{}"),
                            vec![GraphQLError::new(format!(
                                "{} is not a valid operator, available operators: {}",
                                operator_target,
                                available.join(", ")
                            ))],
                        );
                    }
                }
            }
        };
        let Some(operator) = operator else {
            return (String::from("{}"), Vec::new());
        };

        tracing::debug!(
            operation = %operator.operation_type,
            name = operator.name.as_deref().unwrap_or(""),
            "resolving"
        );
        let data = ctx.start(operator);
        let data = serde_json::to_string(&data).unwrap_or_else(|_| String::from("{}"));
        (data, ctx.errors)
    }
}

fn resolve_root_obj(
    types: &collections::IndexMap<String, Obj>,
    obj: Obj,
) -> Result<Obj, SchemaError> {
    match obj.kind {
        ObjKind::Object(_) => Ok(obj),
        ObjKind::Ref => types
            .get(&obj.type_name)
            .filter(|target| matches!(target.kind, ObjKind::Object(_)))
            .cloned()
            .ok_or(SchemaError::RootNotObject(obj.type_name)),
        _ => Err(SchemaError::RootNotObject(obj.type_name)),
    }
}
