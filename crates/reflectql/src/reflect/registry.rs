use crate::collections::{IndexMap, IndexSet};
use crate::enums::EnumRegistry;
use crate::reflect::{InField, Input, InputType, MethodMeta, Obj, ObjKind, OutputType, ParamGroup};
use crate::SchemaError;

/// Collects reflected types during schema registration.
///
/// Named types are memoized: reflecting a name that is already registered, or
/// currently being built further up the stack, yields a reference node
/// instead of recursing forever.
pub struct Registry<'a> {
    types: &'a mut IndexMap<String, Obj>,
    in_types: &'a mut IndexMap<String, Input>,
    enums: &'a EnumRegistry,
    building: IndexSet<String>,
    building_inputs: IndexSet<String>,
}

impl<'a> Registry<'a> {
    pub(crate) fn new(
        types: &'a mut IndexMap<String, Obj>,
        in_types: &'a mut IndexMap<String, Input>,
        enums: &'a EnumRegistry,
    ) -> Self {
        Self {
            types,
            in_types,
            enums,
            building: IndexSet::default(),
            building_inputs: IndexSet::default(),
        }
    }

    /// Register a named object type from its field builder.
    pub fn object(
        &mut self,
        name: &str,
        build: impl FnOnce(&mut ObjectBuilder<'_, 'a>) -> Result<(), SchemaError>,
    ) -> Result<Obj, SchemaError> {
        if !crate::enums::is_valid_name(name) {
            return Err(SchemaError::InvalidName(name.to_string()));
        }
        if self.types.contains_key(name) || self.building.contains(name) {
            return Ok(Obj::reference(name));
        }

        self.building.insert(name.to_string());
        let mut builder = ObjectBuilder {
            type_name: name.to_string(),
            fields: IndexMap::default(),
            registry: &mut *self,
        };
        build(&mut builder)?;
        let ObjectBuilder { fields, .. } = builder;
        self.building.shift_remove(name);

        let obj = Obj {
            type_name: name.to_string(),
            source_name: String::new(),
            kind: ObjKind::Object(fields),
        };
        self.types.insert(name.to_string(), obj.clone());
        Ok(obj)
    }

    /// Reflect a field of a registered enum type.
    pub fn enum_type(&mut self, name: &str) -> Result<Obj, SchemaError> {
        if !self.enums.contains(name) {
            return Err(SchemaError::UnknownEnum(name.to_string()));
        }
        Ok(Obj {
            type_name: name.to_string(),
            source_name: String::new(),
            kind: ObjKind::Enum {
                key: name.to_string(),
            },
        })
    }

    /// Register a named input object type from its field builder.
    pub fn input_object(
        &mut self,
        name: &str,
        build: impl FnOnce(&mut InputObjectBuilder<'_, 'a>) -> Result<(), SchemaError>,
    ) -> Result<Input, SchemaError> {
        if !crate::enums::is_valid_name(name) {
            return Err(SchemaError::InvalidName(name.to_string()));
        }
        if self.in_types.contains_key(name) || self.building_inputs.contains(name) {
            return Ok(Input::StructRef {
                name: name.to_string(),
            });
        }

        self.building_inputs.insert(name.to_string());
        let mut builder = InputObjectBuilder {
            type_name: name.to_string(),
            fields: IndexMap::default(),
            registry: &mut *self,
        };
        build(&mut builder)?;
        let InputObjectBuilder { fields, .. } = builder;
        self.building_inputs.shift_remove(name);

        let input = Input::Struct {
            name: name.to_string(),
            fields,
        };
        self.in_types.insert(name.to_string(), input.clone());
        Ok(input)
    }

    /// Reflect an argument of a registered enum type.
    pub fn enum_input(&mut self, name: &str) -> Result<Input, SchemaError> {
        if !self.enums.contains(name) {
            return Err(SchemaError::UnknownEnum(name.to_string()));
        }
        Ok(Input::Enum {
            key: name.to_string(),
        })
    }
}

/// Builds the field map of one object type.
pub struct ObjectBuilder<'r, 'a> {
    type_name: String,
    fields: IndexMap<String, Obj>,
    registry: &'r mut Registry<'a>,
}

impl ObjectBuilder<'_, '_> {
    /// Add a data field whose source name equals its GraphQL name.
    pub fn field<T: OutputType>(&mut self, name: &str) -> Result<(), SchemaError> {
        self.field_named::<T>(name, name)
    }

    /// Add a data field resolved under a different source name.
    pub fn field_named<T: OutputType>(
        &mut self,
        name: &str,
        source_name: &str,
    ) -> Result<(), SchemaError> {
        if self.fields.contains_key(name) {
            return Err(SchemaError::DuplicateField(
                self.type_name.clone(),
                name.to_string(),
            ));
        }
        let mut obj = T::reflect_output(self.registry)?;
        obj.source_name = source_name.to_string();
        self.fields.insert(name.to_string(), obj);
        Ok(())
    }

    /// Add a callable field returning `Out`, with its parameter groups
    /// described by the builder closure.
    pub fn method<Out: OutputType>(
        &mut self,
        name: &str,
        build: impl FnOnce(&mut MethodBuilder<'_, '_>) -> Result<(), SchemaError>,
    ) -> Result<(), SchemaError> {
        if self.fields.contains_key(name) {
            return Err(SchemaError::DuplicateField(
                self.type_name.clone(),
                name.to_string(),
            ));
        }

        let mut builder = MethodBuilder {
            method_name: name.to_string(),
            ins: Vec::new(),
            in_fields: IndexMap::default(),
            registry: &mut *self.registry,
        };
        build(&mut builder)?;
        let MethodBuilder { ins, in_fields, .. } = builder;

        let out_type = Out::reflect_output(self.registry)?;
        let meta = MethodMeta {
            ins,
            in_fields,
            out_type,
        };
        self.fields.insert(
            name.to_string(),
            Obj {
                type_name: String::new(),
                source_name: name.to_string(),
                kind: ObjKind::Method(Box::new(meta)),
            },
        );
        Ok(())
    }
}

/// Builds the parameter groups of one method.
pub struct MethodBuilder<'r, 'a> {
    method_name: String,
    ins: Vec<ParamGroup>,
    in_fields: IndexMap<String, InField>,
    registry: &'r mut Registry<'a>,
}

impl MethodBuilder<'_, '_> {
    /// Declare the ambient request-context parameter.
    pub fn ambient_ctx(&mut self) {
        self.ins.push(ParamGroup::Ctx);
    }

    /// Declare a record of named arguments.
    pub fn record(
        &mut self,
        build: impl FnOnce(&mut RecordBuilder<'_, '_>) -> Result<(), SchemaError>,
    ) -> Result<(), SchemaError> {
        let group_index = self
            .ins
            .iter()
            .filter(|group| matches!(group, ParamGroup::Record { .. }))
            .count();
        let mut builder = RecordBuilder {
            method_name: &self.method_name,
            group_index,
            fields: IndexMap::default(),
            in_fields: &mut self.in_fields,
            registry: &mut *self.registry,
        };
        build(&mut builder)?;
        let RecordBuilder { fields, .. } = builder;
        self.ins.push(ParamGroup::Record { fields });
        Ok(())
    }
}

/// Builds the named arguments of one parameter record.
pub struct RecordBuilder<'r, 'a> {
    method_name: &'r str,
    group_index: usize,
    fields: IndexMap<String, Input>,
    in_fields: &'r mut IndexMap<String, InField>,
    registry: &'r mut Registry<'a>,
}

impl RecordBuilder<'_, '_> {
    pub fn arg<T: InputType>(&mut self, name: &str) -> Result<(), SchemaError> {
        if self.in_fields.contains_key(name) {
            return Err(SchemaError::DuplicateArgument(
                self.method_name.to_string(),
                name.to_string(),
            ));
        }
        let input = T::reflect_input(self.registry)?;
        self.fields.insert(name.to_string(), input.clone());
        self.in_fields.insert(
            name.to_string(),
            InField {
                group_index: self.group_index,
                input,
            },
        );
        Ok(())
    }
}

/// Builds the field map of one input object type.
pub struct InputObjectBuilder<'r, 'a> {
    type_name: String,
    fields: IndexMap<String, Input>,
    registry: &'r mut Registry<'a>,
}

impl InputObjectBuilder<'_, '_> {
    pub fn field<T: InputType>(&mut self, name: &str) -> Result<(), SchemaError> {
        if self.fields.contains_key(name) {
            return Err(SchemaError::DuplicateField(
                self.type_name.clone(),
                name.to_string(),
            ));
        }
        let input = T::reflect_input(self.registry)?;
        self.fields.insert(name.to_string(), input);
        Ok(())
    }
}
