//! The reflected type universe.
//!
//! Registration walks the Rust types reachable from the query and mutation
//! roots and mirrors them into two descriptor graphs: [`Obj`] for everything
//! that can appear in a response, [`Input`] for everything that can appear in
//! an argument position. The executor only ever consumes these graphs; it
//! does not care how they were built.

mod input;
mod output;
mod registry;

pub use input::InputType;
pub use output::OutputType;
pub use registry::{InputObjectBuilder, MethodBuilder, ObjectBuilder, RecordBuilder, Registry};

use crate::collections::IndexMap;

/// Scalar kinds shared by output `Data` fields and input scalars.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
}

impl ScalarKind {
    /// What an argument of this kind is called in coercion errors.
    pub(crate) fn expected_text(self) -> &'static str {
        match self {
            ScalarKind::Bool => "a boolean",
            ScalarKind::Int8
            | ScalarKind::Int16
            | ScalarKind::Int32
            | ScalarKind::Int64
            | ScalarKind::Uint8
            | ScalarKind::Uint16
            | ScalarKind::Uint32
            | ScalarKind::Uint64 => "a number",
            ScalarKind::Float32 | ScalarKind::Float64 => "a float",
            ScalarKind::String => "a string",
        }
    }
}

/// One reflected output type.
#[derive(Clone, Debug)]
pub struct Obj {
    /// The GraphQL type name; empty for anonymous shapes such as scalars,
    /// pointers and lists.
    pub type_name: String,
    /// The field name handed to the object source during resolution; set on
    /// the entries of an object's field map.
    pub source_name: String,
    pub kind: ObjKind,
}

#[derive(Clone, Debug)]
pub enum ObjKind {
    /// A leaf scalar.
    Data(ScalarKind),
    /// An optional value; `None` serialises as `null`.
    Ptr(Box<Obj>),
    /// An ordered sequence.
    Array(Box<Obj>),
    /// A named object type with its field map.
    Object(IndexMap<String, Obj>),
    /// A back-reference to a named object type, resolved through the schema's
    /// type registry. Breaks cycles in recursive types.
    Ref,
    /// A callable field.
    Method(Box<MethodMeta>),
    /// A registered enum, serialised as its value name.
    Enum { key: String },
}

impl Obj {
    pub(crate) fn data(kind: ScalarKind) -> Self {
        Obj {
            type_name: String::new(),
            source_name: String::new(),
            kind: ObjKind::Data(kind),
        }
    }

    pub(crate) fn reference(type_name: &str) -> Self {
        Obj {
            type_name: type_name.to_string(),
            source_name: String::new(),
            kind: ObjKind::Ref,
        }
    }

    pub(crate) fn anonymous(kind: ObjKind) -> Self {
        Obj {
            type_name: String::new(),
            source_name: String::new(),
            kind,
        }
    }
}

/// One reflected input type.
#[derive(Clone, Debug)]
pub enum Input {
    Scalar(ScalarKind),
    /// An optional argument; a `null` literal leaves it absent.
    Ptr(Box<Input>),
    Array(Box<Input>),
    /// A named input object with its field map.
    Struct {
        name: String,
        fields: IndexMap<String, Input>,
    },
    /// Deferred lookup of a named input object through the schema's input
    /// registry. Breaks cycles in recursive input types.
    StructRef { name: String },
    Enum { key: String },
}

impl Input {
    /// What an argument of this shape is called in coercion errors.
    pub(crate) fn expected_text(&self) -> &'static str {
        match self {
            Input::Scalar(kind) => kind.expected_text(),
            Input::Ptr(inner) => inner.expected_text(),
            Input::Array(_) => "an array",
            Input::Struct { .. } | Input::StructRef { .. } => "an object",
            Input::Enum { .. } => "an enum value",
        }
    }
}

/// The reflected signature of a callable field.
#[derive(Clone, Debug)]
pub struct MethodMeta {
    /// Ordered parameter groups: the ambient context marker and/or argument
    /// records.
    pub ins: Vec<ParamGroup>,
    /// Flat lookup from argument name to its slot across all records.
    pub in_fields: IndexMap<String, InField>,
    /// The value output.
    pub out_type: Obj,
}

impl MethodMeta {
    pub(crate) fn takes_ctx(&self) -> bool {
        self.ins.iter().any(|group| matches!(group, ParamGroup::Ctx))
    }

    pub(crate) fn record_count(&self) -> usize {
        self.ins
            .iter()
            .filter(|group| matches!(group, ParamGroup::Record { .. }))
            .count()
    }
}

#[derive(Clone, Debug)]
pub enum ParamGroup {
    /// The ambient request-context parameter.
    Ctx,
    /// A record of named arguments.
    Record { fields: IndexMap<String, Input> },
}

/// Where a named argument lands: which record it belongs to and its shape.
#[derive(Clone, Debug)]
pub struct InField {
    pub group_index: usize,
    pub input: Input,
}
