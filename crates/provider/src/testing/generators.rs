//! Proptest strategies for catalog fixtures.
//!
//! Produces [`Service`] values shaped like real backend responses: names
//! stay within provider naming rules, ports in the user range, and the
//! derived uri/host fields stay consistent with the generated names.

use proptest::option;
use proptest::prelude::*;

use crate::catalog::{Service, ServiceStatus};

/// Project names: lowercase, digits, inner hyphens.
pub fn project_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{2,19}"
}

/// Service names follow the same rules as project names.
pub fn service_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{2,19}"
}

pub fn status_strategy() -> impl Strategy<Value = ServiceStatus> {
    prop_oneof![
        Just(ServiceStatus::Running),
        Just(ServiceStatus::Rebuilding),
        Just(ServiceStatus::Rebalancing),
        Just(ServiceStatus::Poweroff),
    ]
}

/// A full [`Service`] of the given type with an empty user config.
pub fn service_strategy(service_type: impl Into<String>) -> impl Strategy<Value = Service> {
    let service_type = service_type.into();
    (
        project_name_strategy(),
        service_name_strategy(),
        status_strategy(),
        1024u16..=49151,
        prop_oneof![Just("startup-1"), Just("business-4"), Just("premium-8")],
        prop_oneof![
            Just("aws-eu-west-1"),
            Just("gcp-us-east1"),
            Just("azure-westeurope"),
        ],
        option::of(prop_oneof![
            Just("monday"),
            Just("saturday"),
            Just("sunday"),
        ]),
    )
        .prop_map(
            move |(project, service_name, state, port, plan, cloud, dow)| Service {
                service_type: service_type.clone(),
                state,
                cloud_name: cloud.to_string(),
                plan: plan.to_string(),
                service_uri: format!("https://{service_name}.{project}.nimbus.example:{port}"),
                service_host: format!("{service_name}.{project}.nimbus.example"),
                service_port: port,
                service_username: "nimbus".to_string(),
                service_password: "hunter2".to_string(),
                maintenance_window_time: dow.map(|_| "03:00:00".to_string()),
                maintenance_window_dow: dow.map(str::to_string),
                termination_protection: false,
                user_config: serde_json::Map::new(),
                project,
                service_name,
            },
        )
}
