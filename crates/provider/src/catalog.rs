//! Backend seam and the hosted-service model.
//!
//! The provider never talks to the platform API directly; every read goes
//! through the [`ServiceCatalog`] trait. The in-memory
//! [`StaticCatalog`](crate::testing::StaticCatalog) implementation backs
//! the test suite, and an API-backed implementation lives outside this
//! crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CatalogError;

/// Running state of a hosted service as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Running,
    Rebuilding,
    Rebalancing,
    Poweroff,
}

impl ServiceStatus {
    /// Wire-format name, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Running => "RUNNING",
            ServiceStatus::Rebuilding => "REBUILDING",
            ServiceStatus::Rebalancing => "REBALANCING",
            ServiceStatus::Poweroff => "POWEROFF",
        }
    }
}

/// Description of one hosted service, as returned by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub project: String,
    pub service_name: String,
    /// Service kind, e.g. "grafana" or "pg".
    pub service_type: String,
    pub state: ServiceStatus,
    pub cloud_name: String,
    pub plan: String,
    pub service_uri: String,
    pub service_host: String,
    pub service_port: u16,
    pub service_username: String,
    pub service_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_window_dow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_window_time: Option<String>,
    #[serde(default)]
    pub termination_protection: bool,
    /// Service-type specific configuration, keyed as in the
    /// `<service_type>_user_config` schema block.
    #[serde(default)]
    pub user_config: Map<String, Value>,
}

/// Read access to the platform's service inventory.
///
/// HTTP transport, credentials and retries live behind implementations of
/// this trait; the provider core only depends on the lookup contract.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    /// Fetch one service by its `(project, service_name)` identity.
    async fn get_service(
        &self,
        project: &str,
        service_name: &str,
    ) -> std::result::Result<Service, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_status_wire_format() {
        let status: ServiceStatus = serde_json::from_str("\"POWEROFF\"").unwrap();
        assert_eq!(status, ServiceStatus::Poweroff);
        assert_eq!(status.as_str(), "POWEROFF");
        assert_eq!(
            serde_json::to_string(&ServiceStatus::Running).unwrap(),
            "\"RUNNING\""
        );
    }

    #[test]
    fn test_service_tolerates_sparse_payload() {
        let service: Service = serde_json::from_str(
            r#"{
                "project": "analytics",
                "service_name": "grafana-prod",
                "service_type": "grafana",
                "state": "RUNNING",
                "cloud_name": "aws-eu-west-1",
                "plan": "startup-1",
                "service_uri": "https://grafana-prod.example:443",
                "service_host": "grafana-prod.example",
                "service_port": 443,
                "service_username": "nimbus",
                "service_password": "secret"
            }"#,
        )
        .unwrap();
        assert_eq!(service.maintenance_window_dow, None);
        assert!(!service.termination_protection);
        assert!(service.user_config.is_empty());
    }
}
