//! Derivation of read-only datasource schemas from resource schemas.
//!
//! A datasource is the lookup-only variant of a mutable resource: the user
//! supplies a handful of identifying key fields and the provider fills in
//! everything else from the remote system. Rather than maintaining a second
//! schema by hand, the datasource schema is derived from the resource
//! schema, which keeps the two permanently in sync.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::schema::Schema;

/// Derive a datasource schema from a resource schema.
///
/// Fields named in `keys` keep their original required/optional semantics
/// and act as the lookup keys. Every other field becomes computed-only:
/// its `default` and `force_new` markers are stripped, while the type,
/// sensitivity, description and any nested block schema are preserved.
/// The output covers exactly the fields of the input.
///
/// Returns [`SchemaError::UnknownKey`] when a key names a field the source
/// schema does not declare.
pub fn resource_schema_as_datasource_schema<S: AsRef<str>>(
    schema: &Schema,
    keys: &[S],
) -> Result<Schema> {
    for key in keys {
        if !schema.contains(key.as_ref()) {
            return Err(SchemaError::UnknownKey(key.as_ref().to_string()));
        }
    }

    let mut fields = BTreeMap::new();
    for (name, field) in schema.iter() {
        let is_key = keys.iter().any(|k| k.as_ref() == name);
        let field = if is_key {
            field.clone()
        } else {
            let mut field = field.clone();
            field.required = false;
            field.optional = false;
            field.computed = true;
            field.default = None;
            field.force_new = false;
            field
        };
        fields.insert(name.clone(), field);
    }

    debug!(
        fields = fields.len(),
        keys = keys.len(),
        "derived datasource schema from resource schema"
    );
    Ok(Schema::from_fields(fields))
}
