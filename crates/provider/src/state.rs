//! Schema-aware state container passed to handlers.
//!
//! [`ResourceData`] is what a read handler receives and fills in: the
//! user's configured values plus the computed outputs written back after a
//! successful lookup. Every write is checked against the schema, so a
//! handler can never introduce a field the host did not declare.

use serde_json::{Map, Value};

use nimbus_schema::Schema;

use crate::error::Result;

/// State for one resource or datasource instance.
#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: Schema,
    values: Map<String, Value>,
    id: Option<String>,
}

impl ResourceData {
    /// Build state from validated configuration, applying field defaults
    /// for optional fields the configuration leaves unset.
    ///
    /// The caller is expected to have run
    /// [`Schema::validate_config`] first; the registry does this before
    /// constructing state.
    pub fn new(schema: Schema, config: Map<String, Value>) -> Self {
        let mut values = config;
        for (name, field) in schema.iter() {
            if let Some(default) = &field.default
                && !values.contains_key(name)
            {
                values.insert(name.clone(), default.clone());
            }
        }
        Self {
            schema,
            values,
            id: None,
        }
    }

    /// The schema this state is bound to.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Raw value of a field, if set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// String value of a field, if set and a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// Integer value of a field, if set and an integer.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(Value::as_i64)
    }

    /// Boolean value of a field, if set and a bool.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(Value::as_bool)
    }

    /// Nested block value of a field, if set and an object.
    pub fn get_block(&self, name: &str) -> Option<&Map<String, Value>> {
        self.values.get(name).and_then(Value::as_object)
    }

    /// Write a field value, enforcing that the schema declares the field
    /// and that the value matches its type.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        self.schema.validate_value(name, &value)?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Composite identifier, set by the read handler after a successful
    /// lookup.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// All current values, in field-name order where set via the schema.
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}
