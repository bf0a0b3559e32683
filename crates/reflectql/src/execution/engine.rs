//! The selection executor.
//!
//! A [`Ctx`] lives for one `resolve` call: it carries the parsed fragment
//! map, the accumulated error list and the directive stack, and walks
//! selection sets against the reflected descriptors and the registered root
//! values, producing an insertion-ordered JSON tree.

use crate::execution::input_coercion::match_input_value;
use crate::execution::serialize::scalar_to_json;
use crate::reflect::{MethodMeta, Obj, ObjKind};
use crate::resolvers::{Arguments, CoercedRecord, ObjectSource, RequestCtx, SourceValue};
use crate::response::GraphQLError;
use crate::{Roots, Schema};
use indexmap::IndexMap;
use reflectql_parser::ast::{Directive, Field, Fragment, Operation, OperationType, Selection};
use serde_json::{Map as JsonMap, Value as JsonValue};

pub(crate) struct Ctx<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) roots: &'a Roots,
    pub(crate) fragments: &'a IndexMap<String, Fragment>,
    pub(crate) request: &'a RequestCtx,
    pub(crate) directives: Vec<&'a [Directive]>,
    pub(crate) errors: Vec<GraphQLError>,
}

impl<'a> Ctx<'a> {
    fn add_err(&mut self, message: impl Into<String>) {
        let error = GraphQLError::new(message);
        tracing::debug!(message = %error.message, "field error");
        self.errors.push(error);
    }

    /// Execute one operation against the matching root.
    pub(crate) fn start(&mut self, operation: &'a Operation) -> JsonValue {
        if !operation.directives.is_empty() {
            self.directives.push(&operation.directives);
        }
        tracing::trace!(
            operation_type = %operation.operation_type,
            directive_frames = self.directives.len(),
            "executing operation"
        );

        let roots = self.roots;
        match operation.operation_type {
            OperationType::Query => self.resolve_selection(
                &operation.selection_set,
                &*roots.query.value,
                &roots.query.obj,
                0,
            ),
            OperationType::Mutation => self.resolve_selection(
                &operation.selection_set,
                &*roots.mutation.value,
                &roots.mutation.obj,
                0,
            ),
            OperationType::Subscription => {
                self.add_err("subscription is not supported yet");
                JsonValue::Object(JsonMap::new())
            }
        }
    }

    fn resolve_selection(
        &mut self,
        selections: &[Selection],
        source: &dyn ObjectSource,
        obj: &Obj,
        depth: u8,
    ) -> JsonValue {
        if depth >= self.schema.max_depth {
            self.add_err("reached max depth");
            return JsonValue::Null;
        }
        let mut members = JsonMap::new();
        self.resolve_selection_content(selections, source, obj, depth + 1, &mut members);
        JsonValue::Object(members)
    }

    fn resolve_selection_content(
        &mut self,
        selections: &[Selection],
        source: &dyn ObjectSource,
        obj: &Obj,
        depth: u8,
        members: &mut JsonMap<String, JsonValue>,
    ) {
        for selection in selections {
            match selection {
                Selection::Field(field) => {
                    let (value, errored) = self.resolve_field(field, source, obj, depth);
                    if !errored {
                        members.insert(field.response_key().to_string(), value);
                    }
                }
                Selection::FragmentSpread(spread) => {
                    let fragments = self.fragments;
                    let Some(fragment) = fragments.get(&spread.fragment_name) else {
                        self.add_err(format!("unknown fragment {}", spread.fragment_name));
                        continue;
                    };
                    if fragment.type_condition != obj.type_name {
                        continue;
                    }
                    self.resolve_selection_content(
                        &fragment.selection_set,
                        source,
                        obj,
                        depth,
                        members,
                    );
                }
                Selection::InlineFragment(inline) => {
                    if let Some(condition) = &inline.type_condition {
                        if *condition != obj.type_name {
                            continue;
                        }
                    }
                    self.resolve_selection_content(
                        &inline.selection_set,
                        source,
                        obj,
                        depth,
                        members,
                    );
                }
            }
        }
    }

    /// Resolve one field selection. The returned flag reports whether the
    /// field errored in a way that omits its key from the enclosing object.
    fn resolve_field(
        &mut self,
        field: &Field,
        source: &dyn ObjectSource,
        parent: &Obj,
        depth: u8,
    ) -> (JsonValue, bool) {
        let ObjKind::Object(contents) = &parent.kind else {
            self.add_err(format!("field {} has invalid data type", field.name));
            return (JsonValue::Null, true);
        };
        let Some(item) = contents.get(&field.name) else {
            self.add_err(format!(
                "field {} does not exist on {}",
                field.name, parent.type_name
            ));
            return (JsonValue::Null, true);
        };

        if let ObjKind::Method(meta) = &item.kind {
            return self.invoke_method(field, source, item, meta, depth);
        }

        let arguments = Arguments::empty();
        let result = source.resolve_field(&item.source_name, &arguments);
        match result {
            Ok(value) => self.resolve_field_value(field, value, item, depth),
            Err(err) => {
                self.add_err(err.message);
                (JsonValue::Null, true)
            }
        }
    }

    /// Build the argument records, invoke the method, then resolve its value
    /// output. Coercion failures and user errors keep the key with a `null`
    /// value.
    fn invoke_method(
        &mut self,
        field: &Field,
        source: &dyn ObjectSource,
        item: &Obj,
        meta: &MethodMeta,
        depth: u8,
    ) -> (JsonValue, bool) {
        let mut records: Vec<CoercedRecord> = (0..meta.record_count())
            .map(|_| CoercedRecord::default())
            .collect();

        for (arg_name, arg_value) in &field.arguments {
            let Some(in_field) = meta.in_fields.get(arg_name) else {
                self.add_err(format!(
                    "undefined function {} input: {}",
                    field.name, arg_name
                ));
                continue;
            };
            let coerced = match match_input_value(arg_value, &in_field.input, self.schema) {
                Ok(coerced) => coerced,
                Err(err) => {
                    self.add_err(format!(
                        "{}, function: {}, property: {}",
                        err, field.name, arg_name
                    ));
                    return (JsonValue::Null, false);
                }
            };
            let Some(record) = records.get_mut(in_field.group_index) else {
                self.add_err(format!(
                    "field {} has an invalid argument record index",
                    field.name
                ));
                return (JsonValue::Null, true);
            };
            record.insert(arg_name.clone(), coerced);
        }

        let arguments = Arguments {
            records,
            ctx: meta.takes_ctx().then_some(self.request),
        };
        let result = source.resolve_field(&item.source_name, &arguments);
        match result {
            Ok(value) => self.resolve_field_value(field, value, &meta.out_type, depth),
            Err(err) => {
                self.add_err(err.message);
                (JsonValue::Null, false)
            }
        }
    }

    fn resolve_field_value(
        &mut self,
        field: &Field,
        value: SourceValue<'_>,
        obj: &Obj,
        depth: u8,
    ) -> (JsonValue, bool) {
        match &obj.kind {
            ObjKind::Data(_) => {
                if !field.selection_set.is_empty() {
                    self.add_err(format!("field {} cannot have a selection", field.name));
                    return (JsonValue::Null, true);
                }
                match value {
                    SourceValue::Leaf(scalar) => (scalar_to_json(&scalar), false),
                    SourceValue::Null => (JsonValue::Null, false),
                    _ => self.invalid_data(field),
                }
            }
            ObjKind::Ptr(inner) => match value {
                SourceValue::Null => (JsonValue::Null, false),
                other => self.resolve_field_value(field, other, inner, depth),
            },
            ObjKind::Array(inner) => match value {
                SourceValue::Null => (JsonValue::Null, false),
                SourceValue::List(iter) => {
                    let mut list = Vec::new();
                    for item in iter {
                        let (item_value, _) = self.resolve_field_value(field, item, inner, depth);
                        list.push(item_value);
                    }
                    (JsonValue::Array(list), false)
                }
                _ => self.invalid_data(field),
            },
            ObjKind::Object(_) | ObjKind::Ref => {
                if field.selection_set.is_empty() {
                    self.add_err(format!("field {} must have a selection", field.name));
                    return (JsonValue::Null, true);
                }
                let schema = self.schema;
                let resolved = if matches!(obj.kind, ObjKind::Ref) {
                    match schema.types.get(&obj.type_name) {
                        Some(target) => target,
                        None => {
                            self.add_err(format!(
                                "field {} references unknown type {}",
                                field.name, obj.type_name
                            ));
                            return (JsonValue::Null, true);
                        }
                    }
                } else {
                    obj
                };
                match value {
                    SourceValue::Object(source) => (
                        self.resolve_selection(&field.selection_set, &source, resolved, depth),
                        false,
                    ),
                    SourceValue::Null => (JsonValue::Null, false),
                    _ => self.invalid_data(field),
                }
            }
            ObjKind::Enum { key } => match value {
                SourceValue::Enum(representation) => {
                    let schema = self.schema;
                    match schema.enums.name_of(key, &representation) {
                        Some(name) => (JsonValue::String(name.to_string()), false),
                        None => (JsonValue::Null, false),
                    }
                }
                SourceValue::Null => (JsonValue::Null, false),
                _ => self.invalid_data(field),
            },
            ObjKind::Method(_) => self.invalid_data(field),
        }
    }

    fn invalid_data(&mut self, field: &Field) -> (JsonValue, bool) {
        self.add_err(format!("field {} has invalid data type", field.name));
        (JsonValue::Null, true)
    }
}
