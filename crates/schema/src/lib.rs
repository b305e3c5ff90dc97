//! Declarative schema model for the Nimbus provider.
//!
//! This crate defines the field and schema descriptors the provider host
//! introspects to validate configuration and drive reads, plus the
//! derivation utility that turns a mutable-resource schema into the
//! read-only schema of its datasource variant.

mod derive;
pub mod error;
mod field;
mod schema;
mod validate;

pub use derive::resource_schema_as_datasource_schema;
pub use error::{Result, SchemaError};
pub use field::{Field, FieldType};
pub use schema::{Schema, SchemaBuilder};
