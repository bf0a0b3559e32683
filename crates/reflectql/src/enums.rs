//! The per-schema enum registry.
//!
//! Enums are registered by name with a map from GraphQL value names to their
//! in-memory representation. Output resolution looks names up by
//! representation; input coercion goes the other way.

use crate::collections::{HashMap, IndexMap};
use crate::SchemaError;

/// The in-memory representation of one enum value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EnumValue {
    Int(i64),
    Str(String),
}

impl EnumValue {
    fn same_kind(&self, other: &EnumValue) -> bool {
        matches!(
            (self, other),
            (EnumValue::Int(_), EnumValue::Int(_)) | (EnumValue::Str(_), EnumValue::Str(_))
        )
    }
}

impl From<i64> for EnumValue {
    fn from(value: i64) -> Self {
        EnumValue::Int(value)
    }
}

impl From<i32> for EnumValue {
    fn from(value: i32) -> Self {
        EnumValue::Int(value.into())
    }
}

impl From<&str> for EnumValue {
    fn from(value: &str) -> Self {
        EnumValue::Str(value.to_string())
    }
}

impl From<String> for EnumValue {
    fn from(value: String) -> Self {
        EnumValue::Str(value)
    }
}

#[derive(Debug, Default)]
pub(crate) struct EnumRegistry {
    sets: IndexMap<String, EnumSet>,
}

/// One registered enum: parallel maps for both lookup directions.
#[derive(Debug, Default)]
struct EnumSet {
    key_value: IndexMap<String, EnumValue>,
    value_key: HashMap<EnumValue, String>,
}

impl EnumRegistry {
    pub(crate) fn register<K, V>(
        &mut self,
        name: &str,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), SchemaError>
    where
        K: Into<String>,
        V: Into<EnumValue>,
    {
        if !is_valid_name(name) {
            return Err(SchemaError::InvalidName(name.to_string()));
        }
        if self.sets.contains_key(name) {
            return Err(SchemaError::DuplicateEnum(name.to_string()));
        }

        let mut set = EnumSet::default();
        for (key, value) in values {
            let key = key.into();
            let value = value.into();
            if !is_valid_name(&key) {
                return Err(SchemaError::InvalidName(key));
            }
            if let Some(first) = set.key_value.values().next() {
                if !first.same_kind(&value) {
                    return Err(SchemaError::MixedEnumRepr(name.to_string()));
                }
            }
            if set.key_value.contains_key(&key) {
                return Err(SchemaError::DuplicateEnumValue(name.to_string(), key));
            }
            if set.value_key.contains_key(&value) {
                return Err(SchemaError::DuplicateEnumRepr(name.to_string(), key));
            }
            set.value_key.insert(value.clone(), key.clone());
            set.key_value.insert(key, value);
        }
        if set.key_value.is_empty() {
            return Err(SchemaError::EmptyEnum(name.to_string()));
        }

        self.sets.insert(name.to_string(), set);
        Ok(())
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// The representation registered for `name` within the enum `key`.
    pub(crate) fn representation_of(&self, key: &str, name: &str) -> Option<&EnumValue> {
        self.sets.get(key)?.key_value.get(name)
    }

    /// The value name registered for `representation` within the enum `key`.
    pub(crate) fn name_of(&self, key: &str, representation: &EnumValue) -> Option<&str> {
        self.sets
            .get(key)?
            .value_key
            .get(representation)
            .map(String::as_str)
    }
}

pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some('a'..='z' | 'A'..='Z' | '_'))
        && chars.all(|c| matches!(c, 'a'..='z' | 'A'..='Z' | '_' | '0'..='9'))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookups_go_both_ways() {
        let mut registry = EnumRegistry::default();
        registry
            .register("Color", [("RED", 0), ("GREEN", 1)])
            .unwrap();

        assert_eq!(
            registry.representation_of("Color", "RED"),
            Some(&EnumValue::Int(0))
        );
        assert_eq!(registry.name_of("Color", &EnumValue::Int(1)), Some("GREEN"));
        assert_eq!(registry.name_of("Color", &EnumValue::Int(7)), None);
        assert_eq!(registry.representation_of("Size", "RED"), None);
    }

    #[test]
    fn rejects_bad_registrations() {
        let mut registry = EnumRegistry::default();
        assert!(matches!(
            registry.register("1Color", [("RED", 0)]),
            Err(SchemaError::InvalidName(_))
        ));
        assert!(matches!(
            registry.register("Color", Vec::<(&str, i64)>::new()),
            Err(SchemaError::EmptyEnum(_))
        ));
        registry.register("Color", [("RED", 0)]).unwrap();
        assert!(matches!(
            registry.register("Color", [("BLUE", 1)]),
            Err(SchemaError::DuplicateEnum(_))
        ));
        assert!(matches!(
            registry.register("Dup", [("A", 0), ("A", 1)]),
            Err(SchemaError::DuplicateEnumValue(_, _))
        ));
        assert!(matches!(
            registry.register("Repr", [("A", 0), ("B", 0)]),
            Err(SchemaError::DuplicateEnumRepr(_, _))
        ));
        assert!(matches!(
            registry.register(
                "Mixed",
                [("A", EnumValue::Int(0)), ("B", EnumValue::Str(String::from("b")))]
            ),
            Err(SchemaError::MixedEnumRepr(_))
        ));
    }
}
