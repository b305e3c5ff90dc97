//! Built-in service definitions.
//!
//! Each service module contributes a resource schema built on top of
//! [`service_common_schema`] plus its `<service_type>_user_config` block,
//! and exposes `resource()` / `datasource()` constructors wired to the
//! shared [`ServiceRead`](crate::ServiceRead) handler.

pub mod grafana;
pub mod pg;

use serde_json::json;

use nimbus_schema::{Field, FieldType, Schema, SchemaBuilder};

use crate::error::Result;
use crate::registry::Provider;

/// The two fields a datasource lookup is addressed by.
pub const LOOKUP_KEYS: [&str; 2] = ["project", "service_name"];

/// Schema fields common to every hosted service.
///
/// `project` is optional in configuration because reads fall back to the
/// provider's default project; `service_name` must always be given.
/// Everything below the identity pair is either user-tunable service
/// placement or computed connection info.
pub(crate) fn service_common_schema() -> SchemaBuilder {
    Schema::builder()
        .field(
            "project",
            Field::optional(FieldType::String)
                .force_new()
                .with_description("Project the service belongs to"),
        )
        .field(
            "service_name",
            Field::required(FieldType::String)
                .force_new()
                .with_description("Name of the service, unique within its project"),
        )
        .field("cloud_name", Field::optional(FieldType::String))
        .field("plan", Field::optional(FieldType::String))
        .field("maintenance_window_dow", Field::optional(FieldType::String))
        .field("maintenance_window_time", Field::optional(FieldType::String))
        .field(
            "termination_protection",
            Field::optional(FieldType::Bool).with_default(json!(false)),
        )
        .field("service_type", Field::computed(FieldType::String))
        .field("state", Field::computed(FieldType::String))
        .field("service_uri", Field::computed(FieldType::String))
        .field("service_host", Field::computed(FieldType::String))
        .field("service_port", Field::computed(FieldType::Int))
        .field("service_username", Field::computed(FieldType::String))
        .field(
            "service_password",
            Field::computed(FieldType::String).sensitive(),
        )
}

/// Register every built-in service's resource and datasource variants.
pub fn register_builtin(provider: &mut Provider) -> Result<()> {
    provider.register_resource("nimbus_grafana", grafana::resource())?;
    provider.register_datasource("nimbus_grafana", grafana::datasource()?)?;
    provider.register_resource("nimbus_pg", pg::resource())?;
    provider.register_datasource("nimbus_pg", pg::datasource()?)?;
    Ok(())
}
