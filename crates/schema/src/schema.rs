//! Schema container and definition-time validation.
//!
//! Responsibilities:
//! - Hold an ordered field map and expose read access to the host.
//! - Enforce definition rules at registration time (`validate_definition`).
//!
//! Does NOT handle:
//! - Validating user configuration values (see `validate.rs`).
//! - Deriving datasource schemas (see `derive.rs`).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, SchemaError};
use crate::field::{Field, FieldType};

/// Ordered mapping from field name to field descriptor.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Schema {
    fields: BTreeMap<String, Field>,
}

impl Schema {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Look up a field descriptor by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Whether the schema declares a field with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Field)> {
        self.fields.iter()
    }

    /// Iterate over field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Structural self-check, run when a resource or datasource is
    /// registered.
    ///
    /// Rules enforced per field:
    /// - at least one of required/optional/computed is set;
    /// - required excludes both optional and computed;
    /// - `default` is only legal on optional fields;
    /// - `max_items` is only legal on list/set fields;
    /// - names are non-empty lowercase snake_case;
    /// - nested block schemas satisfy the same rules.
    pub fn validate_definition(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(SchemaError::EmptySchema);
        }
        for (name, field) in &self.fields {
            validate_field_name(name)?;
            validate_field_flags(name, field)?;
            if let FieldType::Block(nested) = &field.field_type {
                nested.validate_definition().map_err(|e| nest_error(name, e))?;
            }
        }
        Ok(())
    }

    pub(crate) fn from_fields(fields: BTreeMap<String, Field>) -> Self {
        Self { fields }
    }
}

fn validate_field_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_head = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    let valid_tail = name
        .chars()
        .skip(1)
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid_head && valid_tail {
        Ok(())
    } else {
        Err(SchemaError::InvalidFieldName(name.to_string()))
    }
}

fn validate_field_flags(name: &str, field: &Field) -> Result<()> {
    let invalid = |reason: &str| SchemaError::InvalidDefinition {
        field: name.to_string(),
        reason: reason.to_string(),
    };

    if !field.required && !field.optional && !field.computed {
        return Err(invalid("one of required, optional or computed must be set"));
    }
    if field.required && field.optional {
        return Err(invalid("required and optional are mutually exclusive"));
    }
    if field.required && field.computed {
        return Err(invalid("required and computed are mutually exclusive"));
    }
    if field.default.is_some() && !field.optional {
        return Err(invalid("default is only allowed on optional fields"));
    }
    if field.max_items.is_some() && !field.field_type.is_collection() {
        return Err(invalid("max_items is only allowed on list and set fields"));
    }
    Ok(())
}

/// Prefix nested-field errors with the block name so messages read as a
/// path ("grafana_user_config.alerting_enabled").
pub(crate) fn nest_error(block: &str, err: SchemaError) -> SchemaError {
    let prefix = |field: String| format!("{block}.{field}");
    match err {
        SchemaError::UnknownField(f) => SchemaError::UnknownField(prefix(f)),
        SchemaError::MissingRequired(f) => SchemaError::MissingRequired(prefix(f)),
        SchemaError::ComputedField(f) => SchemaError::ComputedField(prefix(f)),
        SchemaError::InvalidFieldName(f) => SchemaError::InvalidFieldName(prefix(f)),
        SchemaError::TypeMismatch {
            field,
            expected,
            found,
        } => SchemaError::TypeMismatch {
            field: prefix(field),
            expected,
            found,
        },
        SchemaError::InvalidDefinition { field, reason } => SchemaError::InvalidDefinition {
            field: prefix(field),
            reason,
        },
        SchemaError::TooManyItems { field, max, found } => SchemaError::TooManyItems {
            field: prefix(field),
            max,
            found,
        },
        SchemaError::EmptySchema => SchemaError::InvalidDefinition {
            field: block.to_string(),
            reason: "nested block schema has no fields".to_string(),
        },
        other => other,
    }
}

/// Builder collecting fields into a [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: BTreeMap<String, Field>,
}

impl SchemaBuilder {
    /// Add a field. A repeated name replaces the earlier definition.
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields,
        }
    }
}
