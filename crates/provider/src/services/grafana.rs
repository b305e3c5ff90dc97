//! Hosted Grafana service definition.

use std::sync::Arc;

use serde_json::json;

use nimbus_schema::{Field, FieldType, Schema, resource_schema_as_datasource_schema};

use crate::handlers::ServiceRead;
use crate::registry::{DatasourceSpec, ResourceSpec};
use crate::services::{LOOKUP_KEYS, service_common_schema};

pub const SERVICE_TYPE: &str = "grafana";

/// The mutable-resource schema for a hosted Grafana service.
pub fn schema() -> Schema {
    let public_access = Schema::builder()
        .field(
            "grafana",
            Field::optional(FieldType::Bool)
                .with_description("Allow access to Grafana from the public internet"),
        )
        .build();

    let user_config = Schema::builder()
        .field("alerting_enabled", Field::optional(FieldType::Bool))
        .field("custom_domain", Field::optional(FieldType::String))
        .field(
            "ip_filter",
            Field::optional(FieldType::List(Box::new(FieldType::String)))
                .with_default(json!(["0.0.0.0/0"]))
                .with_max_items(1024)
                .with_description("CIDR ranges allowed to connect"),
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

/// Resource descriptor for `nimbus_grafana`.
pub fn resource() -> ResourceSpec {
    ResourceSpec::new(schema(), Arc::new(ServiceRead))
}

/// Datasource descriptor for `nimbus_grafana`: the resource schema
/// narrowed to the lookup keys, paired with the shared read handler.
pub fn datasource() -> nimbus_schema::Result<DatasourceSpec> {
    Ok(DatasourceSpec::new(
        resource_schema_as_datasource_schema(&schema(), &LOOKUP_KEYS)?,
        Arc::new(ServiceRead),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_schema_is_valid() {
        schema().validate_definition().unwrap();
    }

    #[test]
    fn test_datasource_narrows_to_lookup_keys() {
        let spec = datasource().unwrap();
        let derived = spec.schema();

        assert!(derived.get("service_name").unwrap().required);
        assert!(derived.get("project").unwrap().optional);
        for (name, field) in derived.iter() {
            if !LOOKUP_KEYS.contains(&name.as_str()) {
                assert!(field.is_computed_only(), "{name} should be computed-only");
            }
        }
    }

    #[test]
    fn test_datasource_keeps_every_resource_field() {
        let resource_fields: Vec<_> = schema().field_names().map(str::to_string).collect();
        let spec = datasource().unwrap();
        let datasource_fields: Vec<_> =
            spec.schema().field_names().map(str::to_string).collect();
        assert_eq!(resource_fields, datasource_fields);
    }
}
