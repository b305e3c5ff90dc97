//! Testing utilities for provider tests.
//!
//! Provides the in-memory [`StaticCatalog`] backend, service fixtures, and
//! proptest strategies in [`generators`]. Available when running tests or
//! when the `test-utils` feature is enabled.

pub mod generators;

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use crate::catalog::{Service, ServiceCatalog, ServiceStatus};
use crate::error::CatalogError;

/// In-memory service inventory.
///
/// Projects are known iff at least one service was added under them, so a
/// lookup in an unknown project reports `ProjectNotFound` while a missing
/// service in a known project reports `ServiceNotFound`.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    services: BTreeMap<(String, String), Service>,
    projects: BTreeSet<String>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a service, keyed by its own `(project, service_name)`.
    pub fn with_service(mut self, service: Service) -> Self {
        self.projects.insert(service.project.clone());
        self.services.insert(
            (service.project.clone(), service.service_name.clone()),
            service,
        );
        self
    }
}

#[async_trait]
impl ServiceCatalog for StaticCatalog {
    async fn get_service(
        &self,
        project: &str,
        service_name: &str,
    ) -> std::result::Result<Service, CatalogError> {
        if !self.projects.contains(project) {
            return Err(CatalogError::ProjectNotFound(project.to_string()));
        }
        self.services
            .get(&(project.to_string(), service_name.to_string()))
            .cloned()
            .ok_or_else(|| CatalogError::ServiceNotFound {
                project: project.to_string(),
                service_name: service_name.to_string(),
            })
    }
}

/// A plausible running service for tests.
pub fn sample_service(project: &str, service_name: &str, service_type: &str) -> Service {
    Service {
        project: project.to_string(),
        service_name: service_name.to_string(),
        service_type: service_type.to_string(),
        state: ServiceStatus::Running,
        cloud_name: "aws-eu-west-1".to_string(),
        plan: "startup-1".to_string(),
        service_uri: format!("https://{service_name}.{project}.nimbus.example:443"),
        service_host: format!("{service_name}.{project}.nimbus.example"),
        service_port: 443,
        service_username: "nimbus".to_string(),
        service_password: "hunter2".to_string(),
        maintenance_window_dow: Some("sunday".to_string()),
        maintenance_window_time: Some("03:00:00".to_string()),
        termination_protection: false,
        user_config: serde_json::Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_project_vs_unknown_service() {
        let catalog =
            StaticCatalog::new().with_service(sample_service("analytics", "grafana-prod", "grafana"));

        let err = catalog.get_service("nope", "grafana-prod").await.unwrap_err();
        assert_eq!(err, CatalogError::ProjectNotFound("nope".to_string()));

        let err = catalog.get_service("analytics", "missing").await.unwrap_err();
        assert_eq!(
            err,
            CatalogError::ServiceNotFound {
                project: "analytics".to_string(),
                service_name: "missing".to_string(),
            }
        );
    }
}
