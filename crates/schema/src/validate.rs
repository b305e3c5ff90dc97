//! Validation of configuration and state values against a schema.
//!
//! The provider host hands over a JSON object of configured values; this
//! module checks it field by field before any handler runs. Unknown fields
//! are rejected, required fields must be present, computed-only fields may
//! not be set, and every value must match its declared [`FieldType`].
//!
//! Handler write-backs go through a second rule set that keeps the name
//! and type checks but drops the computed-only and required rules, since
//! computed outputs are exactly what a read produces.

use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::field::{Field, FieldType};
use crate::schema::{Schema, nest_error};

/// Which rule set applies to a value being checked.
///
/// Configuration comes from the user, so computed-only fields may not be
/// set and required fields must be present. State is written by handlers
/// after a backend read, where computed outputs are exactly what lands in
/// nested blocks, so only field names and value types are enforced.
#[derive(Clone, Copy)]
enum Rules {
    Config,
    State,
}

impl Schema {
    /// Check a configuration object against this schema.
    pub fn validate_config(&self, config: &Map<String, Value>) -> Result<()> {
        for name in config.keys() {
            if !self.contains(name) {
                return Err(SchemaError::UnknownField(name.clone()));
            }
        }
        for (name, field) in self.iter() {
            match config.get(name) {
                Some(value) => {
                    if field.is_computed_only() {
                        return Err(SchemaError::ComputedField(name.clone()));
                    }
                    check_value(name, field, value, Rules::Config)?;
                }
                None if field.required => {
                    return Err(SchemaError::MissingRequired(name.clone()));
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Check a handler-written state object against this schema.
    ///
    /// Field names and value types are enforced the same way as for
    /// configuration, but the computed-only and required-presence rules are
    /// not: handlers write computed outputs back, and a backend read may
    /// legitimately omit fields.
    pub fn validate_state(&self, values: &Map<String, Value>) -> Result<()> {
        for (name, value) in values {
            let field = self
                .get(name)
                .ok_or_else(|| SchemaError::UnknownField(name.clone()))?;
            check_value(name, field, value, Rules::State)?;
        }
        Ok(())
    }

    /// Check a single value against the field declared under `name`.
    ///
    /// Used by state containers when handlers write computed outputs back,
    /// so nested blocks are checked with the state rules.
    pub fn validate_value(&self, name: &str, value: &Value) -> Result<()> {
        let field = self
            .get(name)
            .ok_or_else(|| SchemaError::UnknownField(name.to_string()))?;
        check_value(name, field, value, Rules::State)
    }
}

fn check_value(name: &str, field: &Field, value: &Value, rules: Rules) -> Result<()> {
    check_type(name, &field.field_type, value, rules)?;
    if let (Some(max), Value::Array(items)) = (field.max_items, value) {
        if items.len() > max {
            return Err(SchemaError::TooManyItems {
                field: name.to_string(),
                max,
                found: items.len(),
            });
        }
    }
    Ok(())
}

fn check_type(name: &str, field_type: &FieldType, value: &Value, rules: Rules) -> Result<()> {
    let mismatch = || SchemaError::TypeMismatch {
        field: name.to_string(),
        expected: field_type.describe(),
        found: describe_value(value),
    };

    match field_type {
        FieldType::Bool => value.is_boolean().then_some(()).ok_or_else(mismatch),
        FieldType::Int => (value.is_i64() || value.is_u64())
            .then_some(())
            .ok_or_else(mismatch),
        FieldType::Float => value.is_number().then_some(()).ok_or_else(mismatch),
        FieldType::String => value.is_string().then_some(()).ok_or_else(mismatch),
        FieldType::List(elem) | FieldType::Set(elem) => match value {
            Value::Array(items) => {
                for item in items {
                    check_type(name, elem, item, rules)?;
                }
                Ok(())
            }
            _ => Err(mismatch()),
        },
        FieldType::Map(elem) => match value {
            Value::Object(entries) => {
                for item in entries.values() {
                    check_type(name, elem, item, rules)?;
                }
                Ok(())
            }
            _ => Err(mismatch()),
        },
        FieldType::Block(nested) => match value {
            Value::Object(entries) => match rules {
                Rules::Config => nested.validate_config(entries),
                Rules::State => nested.validate_state(entries),
            }
            .map_err(|e| nest_error(name, e)),
            _ => Err(mismatch()),
        },
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
    .to_string()
}
