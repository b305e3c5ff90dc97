//! Hosted PostgreSQL service definition.

use std::sync::Arc;

use nimbus_schema::{Field, FieldType, Schema, resource_schema_as_datasource_schema};

use crate::handlers::ServiceRead;
use crate::registry::{DatasourceSpec, ResourceSpec};
use crate::services::{LOOKUP_KEYS, service_common_schema};

pub const SERVICE_TYPE: &str = "pg";

/// The mutable-resource schema for a hosted PostgreSQL service.
pub fn schema() -> Schema {
    let public_access = Schema::builder()
        .field("pg", Field::optional(FieldType::Bool))
        .field("prometheus", Field::optional(FieldType::Bool))
        .build();

    let user_config = Schema::builder()
        .field(
            "pg_version",
            Field::optional(FieldType::String).also_computed(),
        )
        .field(
            "admin_username",
            Field::optional(FieldType::String).force_new(),
        )
        .field(
            "shared_buffers_percentage",
            Field::optional(FieldType::Float),
        )
        .field(
            "ip_filter",
            Field::optional(FieldType::List(Box::new(FieldType::String))).with_max_items(1024),
        )
        .field("public_access", Field::optional(FieldType::Block(public_access)))
        .build();

    service_common_schema()
        .field(
            format!("{SERVICE_TYPE}_user_config"),
            Field::optional(FieldType::Block(user_config)),
        )
        .build()
}

/// Resource descriptor for `nimbus_pg`.
pub fn resource() -> ResourceSpec {
    ResourceSpec::new(schema(), Arc::new(ServiceRead))
}

/// Datasource descriptor for `nimbus_pg`, sharing the same read handler
/// and derivation as every other service.
pub fn datasource() -> nimbus_schema::Result<DatasourceSpec> {
    Ok(DatasourceSpec::new(
        resource_schema_as_datasource_schema(&schema(), &LOOKUP_KEYS)?,
        Arc::new(ServiceRead),
    ))
}
