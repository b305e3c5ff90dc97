//! Field descriptors for provider schemas.
//!
//! A [`Field`] describes one configuration attribute: its type and its
//! behavioral flags (required/optional/computed, sensitivity, replacement
//! semantics). Fields are assembled into a [`Schema`](crate::Schema) which
//! the provider host introspects to validate configuration and drive reads.

use serde::Serialize;
use serde_json::Value;

use crate::schema::Schema;

/// The declared type of a configuration field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Bool,
    Int,
    Float,
    String,
    /// Ordered collection of a single element type.
    List(Box<FieldType>),
    /// Unordered collection of a single element type.
    Set(Box<FieldType>),
    /// String-keyed map of a single element type.
    Map(Box<FieldType>),
    /// Nested block with its own schema.
    Block(Schema),
}

impl FieldType {
    /// Human-readable name used in validation error messages.
    pub fn describe(&self) -> std::string::String {
        match self {
            FieldType::Bool => "bool".to_string(),
            FieldType::Int => "int".to_string(),
            FieldType::Float => "float".to_string(),
            FieldType::String => "string".to_string(),
            FieldType::List(elem) => format!("list({})", elem.describe()),
            FieldType::Set(elem) => format!("set({})", elem.describe()),
            FieldType::Map(elem) => format!("map({})", elem.describe()),
            FieldType::Block(_) => "block".to_string(),
        }
    }

    /// Whether this type carries a per-field element limit (`max_items`).
    pub fn is_collection(&self) -> bool {
        matches!(self, FieldType::List(_) | FieldType::Set(_))
    }
}

/// Declarative descriptor for a single schema field.
///
/// Exactly one of the `required`/`optional` flags may be set; `computed`
/// marks the value as provider-populated. `optional` and `computed` may be
/// combined for fields the user may set but the provider will otherwise
/// fill in. These rules are enforced by
/// [`Schema::validate_definition`](crate::Schema::validate_definition).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub field_type: FieldType,
    /// The user must supply this field.
    pub required: bool,
    /// The user may supply this field.
    pub optional: bool,
    /// The provider populates this field from the remote system.
    pub computed: bool,
    /// Value is redacted from logs and display surfaces.
    pub sensitive: bool,
    /// Changing this field forces replacement of the resource.
    pub force_new: bool,
    /// Default applied when an optional field is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Maximum element count for list/set fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

impl Field {
    fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            force_new: false,
            default: None,
            description: None,
            max_items: None,
        }
    }

    /// A field the user must supply.
    pub fn required(field_type: FieldType) -> Self {
        Self {
            required: true,
            ..Self::new(field_type)
        }
    }

    /// A field the user may supply.
    pub fn optional(field_type: FieldType) -> Self {
        Self {
            optional: true,
            ..Self::new(field_type)
        }
    }

    /// A field populated by the provider from the remote system.
    pub fn computed(field_type: FieldType) -> Self {
        Self {
            computed: true,
            ..Self::new(field_type)
        }
    }

    /// Additionally mark the field computed (for optional+computed fields).
    pub fn also_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    /// Mark the value as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Changing the field forces resource replacement.
    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    /// Default value applied when the field is unset.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Attach a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Limit the element count of a list/set field.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// True when the provider alone populates this field.
    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.required && !self.optional
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors_set_single_flag() {
        let f = Field::required(FieldType::String);
        assert!(f.required && !f.optional && !f.computed);

        let f = Field::optional(FieldType::Int);
        assert!(!f.required && f.optional && !f.computed);

        let f = Field::computed(FieldType::Bool);
        assert!(f.is_computed_only());
    }

    #[test]
    fn test_optional_computed_combination() {
        let f = Field::optional(FieldType::String).also_computed();
        assert!(f.optional && f.computed);
        assert!(!f.is_computed_only());
    }

    #[test]
    fn test_builder_chain() {
        let f = Field::optional(FieldType::List(Box::new(FieldType::String)))
            .with_default(json!([]))
            .with_max_items(16)
            .with_description("allowed CIDR ranges");
        assert_eq!(f.default, Some(json!([])));
        assert_eq!(f.max_items, Some(16));
        assert!(f.field_type.is_collection());
    }

    #[test]
    fn test_describe_nested_types() {
        let t = FieldType::List(Box::new(FieldType::Map(Box::new(FieldType::Int))));
        assert_eq!(t.describe(), "list(map(int))");
    }
}
