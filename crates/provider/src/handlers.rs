//! Read handlers shared between resources and their datasource variants.
//!
//! # What this module handles:
//! - The [`ReadHandler`] seam the registry dispatches through
//! - [`ServiceRead`], the shared lookup handler for every hosted service
//! - Flattening a platform [`Service`] into schema-declared state
//!
//! # What this module does NOT handle:
//! - Schema derivation (in `nimbus-schema`)
//! - Backend transport (behind [`ServiceCatalog`](crate::ServiceCatalog))

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use nimbus_schema::{FieldType, Schema};

use crate::catalog::Service;
use crate::context::ReadContext;
use crate::error::{CatalogError, ProviderError, Result};
use crate::state::ResourceData;

/// A read operation: resolve the remote object the state identifies and
/// fill in the computed fields.
#[async_trait]
pub trait ReadHandler: Send + Sync {
    async fn read(&self, ctx: &ReadContext, data: &mut ResourceData) -> Result<()>;
}

/// Shared read handler for hosted services.
///
/// Resolves the `(project, service_name)` lookup keys from state (with
/// `project` falling back to the configured default project), fetches the
/// service from the catalog, and writes every schema-declared field back
/// into state. Used unchanged by all service resources and datasources.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceRead;

#[async_trait]
impl ReadHandler for ServiceRead {
    #[instrument(name = "service_read", skip_all)]
    async fn read(&self, ctx: &ReadContext, data: &mut ResourceData) -> Result<()> {
        let project = data
            .get_str("project")
            .map(str::to_string)
            .or_else(|| ctx.settings().default_project.clone())
            .ok_or_else(|| ProviderError::MissingLookupKey("project".to_string()))?;
        let service_name = data
            .get_str("service_name")
            .map(str::to_string)
            .ok_or_else(|| ProviderError::MissingLookupKey("service_name".to_string()))?;

        debug!(%project, %service_name, "resolving service");
        let service = ctx.catalog().get_service(&project, &service_name).await?;

        flatten_service(&service, data)?;
        data.set_id(format!("{project}/{service_name}"));
        debug!(id = data.id(), state = service.state.as_str(), "service read complete");
        Ok(())
    }
}

/// Write a service description into state, field by field.
///
/// Only fields the schema declares are written; everything else the
/// backend returns is dropped. The service's `user_config` lands under the
/// `<service_type>_user_config` block when the schema declares one,
/// filtered to the block's declared fields.
fn flatten_service(service: &Service, data: &mut ResourceData) -> Result<()> {
    let fields = match serde_json::to_value(service) {
        Ok(Value::Object(fields)) => fields,
        _ => {
            return Err(ProviderError::Catalog(CatalogError::Backend(
                "service description did not serialize to an object".to_string(),
            )));
        }
    };

    for (name, value) in fields {
        if name == "user_config" {
            continue;
        }
        if data.schema().contains(&name) {
            data.set(&name, value)?;
        }
    }

    let block_name = format!("{}_user_config", service.service_type);
    let nested = match data.schema().get(&block_name).map(|f| &f.field_type) {
        Some(FieldType::Block(nested)) => Some(nested.clone()),
        _ => None,
    };
    if let Some(nested) = nested {
        let filtered = filter_to_schema(&nested, &service.user_config);
        data.set(&block_name, Value::Object(filtered))?;
    }
    Ok(())
}

/// Keep only the keys a schema declares, recursing into nested blocks.
fn filter_to_schema(schema: &Schema, values: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (name, field) in schema.iter() {
        let Some(value) = values.get(name) else {
            continue;
        };
        match (&field.field_type, value) {
            (FieldType::Block(nested), Value::Object(inner)) => {
                out.insert(name.clone(), Value::Object(filter_to_schema(nested, inner)));
            }
            _ => {
                out.insert(name.clone(), value.clone());
            }
        }
    }
    out
}
