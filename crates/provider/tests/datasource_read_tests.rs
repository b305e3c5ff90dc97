//! Integration tests for datasource reads against the in-memory catalog.
//!
//! Test coverage:
//! - Built-in registration: both services expose resource + datasource
//! - Datasource schema shape: resource fields preserved, keys keep their
//!   semantics, everything else computed-only
//! - Happy-path read: computed fields and id populated from the catalog
//! - Default-project fallback and the missing-lookup-key failure
//! - Error propagation for unknown services and invalid configuration

use std::sync::Arc;

use serde_json::{Map, Value, json};

use nimbus_config::Settings;
use nimbus_provider::testing::{StaticCatalog, sample_service};
use nimbus_provider::{CatalogError, Provider, ProviderError, ResourceSpec, ServiceRead, services};
use nimbus_schema::{Field, FieldType, Schema, SchemaError};

fn config(value: Value) -> Map<String, Value> {
    value.as_object().expect("test config is an object").clone()
}

/// Capture handler tracing in test output; safe to call from every test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("nimbus_provider=debug")
        .with_test_writer()
        .try_init();
}

fn provider_with(services_list: Vec<nimbus_provider::Service>) -> Provider {
    let catalog = services_list
        .into_iter()
        .fold(StaticCatalog::new(), StaticCatalog::with_service);
    Provider::with_builtin_services(Settings::default(), Arc::new(catalog)).unwrap()
}

#[test]
fn builtin_services_register_both_variants() {
    let provider = provider_with(vec![]);
    let resources: Vec<_> = provider.resource_names().collect();
    let datasources: Vec<_> = provider.datasource_names().collect();
    assert_eq!(resources, vec!["nimbus_grafana", "nimbus_pg"]);
    assert_eq!(datasources, vec!["nimbus_grafana", "nimbus_pg"]);
}

#[test]
fn grafana_datasource_schema_mirrors_resource_schema() {
    let provider = provider_with(vec![]);
    let resource_schema = services::grafana::schema();
    let datasource_schema = provider.datasource("nimbus_grafana").unwrap().schema();

    // Exactly the resource's fields, nothing added, nothing dropped.
    let expected: Vec<_> = resource_schema.field_names().collect();
    let actual: Vec<_> = datasource_schema.field_names().collect();
    assert_eq!(expected, actual);

    // Lookup keys keep their original semantics.
    assert_eq!(
        resource_schema.get("project"),
        datasource_schema.get("project")
    );
    assert_eq!(
        resource_schema.get("service_name"),
        datasource_schema.get("service_name")
    );

    // Every other field is a computed output.
    for (name, field) in datasource_schema.iter() {
        if name != "project" && name != "service_name" {
            assert!(field.is_computed_only(), "{name} should be computed-only");
            assert!(field.default.is_none(), "{name} should have no default");
        }
    }
}

#[tokio::test]
async fn grafana_datasource_read_populates_computed_fields() {
    init_tracing();
    let mut service = sample_service("analytics", "grafana-prod", "grafana");
    service.user_config = config(json!({
        "alerting_enabled": true,
        "public_access": { "grafana": false }
    }));
    let provider = provider_with(vec![service]);

    let data = provider
        .read_datasource(
            "nimbus_grafana",
            config(json!({ "project": "analytics", "service_name": "grafana-prod" })),
        )
        .await
        .unwrap();

    assert_eq!(data.id(), Some("analytics/grafana-prod"));
    assert_eq!(data.get_str("service_type"), Some("grafana"));
    assert_eq!(data.get_str("state"), Some("RUNNING"));
    assert_eq!(
        data.get_str("service_host"),
        Some("grafana-prod.analytics.nimbus.example")
    );
    assert_eq!(data.get_i64("service_port"), Some(443));
    assert_eq!(data.get_str("service_password"), Some("hunter2"));

    let user_config = data.get_block("grafana_user_config").unwrap();
    assert_eq!(user_config.get("alerting_enabled"), Some(&json!(true)));
}

#[tokio::test]
async fn project_falls_back_to_default_project() {
    init_tracing();
    let catalog =
        StaticCatalog::new().with_service(sample_service("home-project", "grafana-prod", "grafana"));
    let settings = Settings {
        default_project: Some("home-project".to_string()),
        ..Settings::default()
    };
    let provider = Provider::with_builtin_services(settings, Arc::new(catalog)).unwrap();

    let data = provider
        .read_datasource(
            "nimbus_grafana",
            config(json!({ "service_name": "grafana-prod" })),
        )
        .await
        .unwrap();
    assert_eq!(data.id(), Some("home-project/grafana-prod"));
    assert_eq!(data.get_str("project"), Some("home-project"));
}

#[tokio::test]
async fn missing_project_without_default_fails() {
    let provider = provider_with(vec![]);
    let err = provider
        .read_datasource(
            "nimbus_grafana",
            config(json!({ "service_name": "grafana-prod" })),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::MissingLookupKey(key) if key == "project"));
}

#[tokio::test]
async fn absent_service_is_an_error_not_empty_state() {
    let provider = provider_with(vec![sample_service("analytics", "other", "grafana")]);
    let err = provider
        .read_datasource(
            "nimbus_grafana",
            config(json!({ "project": "analytics", "service_name": "grafana-prod" })),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ProviderError::Catalog(CatalogError::ServiceNotFound { service_name, .. })
            if service_name == "grafana-prod"
    ));
}

#[tokio::test]
async fn computed_field_in_datasource_config_is_rejected() {
    let provider = provider_with(vec![]);
    let err = provider
        .read_datasource(
            "nimbus_grafana",
            config(json!({
                "project": "analytics",
                "service_name": "grafana-prod",
                "plan": "startup-1"
            })),
        )
        .await
        .unwrap_err();
    // `plan` is user-settable on the resource but computed on the datasource.
    assert!(matches!(
        err,
        ProviderError::Schema(SchemaError::ComputedField(field)) if field == "plan"
    ));
}

#[tokio::test]
async fn unknown_config_field_is_rejected() {
    let provider = provider_with(vec![]);
    let err = provider
        .read_datasource(
            "nimbus_grafana",
            config(json!({
                "project": "analytics",
                "service_name": "grafana-prod",
                "flavor": "large"
            })),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ProviderError::Schema(SchemaError::UnknownField(field)) if field == "flavor"
    ));
}

#[tokio::test]
async fn read_accepts_computed_outputs_nested_in_user_config() {
    init_tracing();
    // Backend-populated outputs inside a user-config block, like pg's
    // effective version, are computed-only in the schema. The read path
    // must still be able to write them into state.
    let user_config = Schema::builder()
        .field("alerting_enabled", Field::optional(FieldType::Bool))
        .field("effective_version", Field::computed(FieldType::String))
        .build();
    let schema = Schema::builder()
        .field("project", Field::required(FieldType::String))
        .field("service_name", Field::required(FieldType::String))
        .field("service_type", Field::computed(FieldType::String))
        .field("state", Field::computed(FieldType::String))
        .field("plan", Field::optional(FieldType::String))
        .field("cloud_name", Field::optional(FieldType::String))
        .field("service_uri", Field::computed(FieldType::String))
        .field("service_host", Field::computed(FieldType::String))
        .field("service_port", Field::computed(FieldType::Int))
        .field("service_username", Field::computed(FieldType::String))
        .field("service_password", Field::computed(FieldType::String).sensitive())
        .field("termination_protection", Field::optional(FieldType::Bool))
        .field(
            "maintenance_window_dow",
            Field::optional(FieldType::String),
        )
        .field(
            "maintenance_window_time",
            Field::optional(FieldType::String),
        )
        .field(
            "beacon_user_config",
            Field::optional(FieldType::Block(user_config)),
        )
        .build();

    let mut service = sample_service("analytics", "beacon-prod", "beacon");
    service.user_config = config(json!({
        "alerting_enabled": true,
        "effective_version": "2.7"
    }));
    let catalog = StaticCatalog::new().with_service(service);
    let mut provider = Provider::new(Settings::default(), Arc::new(catalog));
    provider
        .register_resource(
            "nimbus_beacon",
            ResourceSpec::new(schema, Arc::new(ServiceRead)),
        )
        .unwrap();

    let data = provider
        .read_resource(
            "nimbus_beacon",
            config(json!({ "project": "analytics", "service_name": "beacon-prod" })),
        )
        .await
        .unwrap();

    let user_config = data.get_block("beacon_user_config").unwrap();
    assert_eq!(user_config.get("effective_version"), Some(&json!("2.7")));
    assert_eq!(user_config.get("alerting_enabled"), Some(&json!(true)));
}

#[tokio::test]
async fn resource_read_shares_the_same_handler() {
    let provider = provider_with(vec![sample_service("analytics", "pg-main", "pg")]);
    let data = provider
        .read_resource(
            "nimbus_pg",
            config(json!({ "project": "analytics", "service_name": "pg-main" })),
        )
        .await
        .unwrap();

    assert_eq!(data.id(), Some("analytics/pg-main"));
    assert_eq!(data.get_str("service_type"), Some("pg"));
    // Resource reads apply schema defaults for unset optional fields.
    assert_eq!(data.get_bool("termination_protection"), Some(false));
}
