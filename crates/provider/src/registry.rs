//! Provider registry mapping names to schema/handler descriptors.
//!
//! The host introspects the registry to learn which resources and
//! datasources exist and what configuration each accepts, then drives
//! reads through it. Registration validates every schema up front so a
//! malformed definition fails at provider construction, not at read time.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use nimbus_config::Settings;
use nimbus_schema::Schema;

use crate::catalog::ServiceCatalog;
use crate::context::ReadContext;
use crate::error::{ProviderError, Result};
use crate::handlers::ReadHandler;
use crate::state::ResourceData;

/// A mutable resource definition: its schema and the read handler shared
/// with the datasource variant.
#[derive(Clone)]
pub struct ResourceSpec {
    schema: Schema,
    read: Arc<dyn ReadHandler>,
}

impl ResourceSpec {
    pub fn new(schema: Schema, read: Arc<dyn ReadHandler>) -> Self {
        Self { schema, read }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// A read-only lookup definition: a derived schema paired with a read
/// handler.
#[derive(Clone)]
pub struct DatasourceSpec {
    schema: Schema,
    read: Arc<dyn ReadHandler>,
}

impl DatasourceSpec {
    pub fn new(schema: Schema, read: Arc<dyn ReadHandler>) -> Self {
        Self { schema, read }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// The provider: registered resources and datasources plus the settings
/// and backend every read runs against.
///
/// Registration is the only mutation; all reads take `&self`.
pub struct Provider {
    settings: Settings,
    catalog: Arc<dyn ServiceCatalog>,
    resources: BTreeMap<String, ResourceSpec>,
    datasources: BTreeMap<String, DatasourceSpec>,
}

impl Provider {
    /// An empty provider bound to settings and a backend.
    pub fn new(settings: Settings, catalog: Arc<dyn ServiceCatalog>) -> Self {
        Self {
            settings,
            catalog,
            resources: BTreeMap::new(),
            datasources: BTreeMap::new(),
        }
    }

    /// A provider with every built-in service registered, both resource
    /// and datasource variants.
    pub fn with_builtin_services(
        settings: Settings,
        catalog: Arc<dyn ServiceCatalog>,
    ) -> Result<Self> {
        let mut provider = Self::new(settings, catalog);
        crate::services::register_builtin(&mut provider)?;
        Ok(provider)
    }

    /// Register a resource. The spec's schema is validated structurally;
    /// duplicate names are rejected.
    pub fn register_resource(&mut self, name: impl Into<String>, spec: ResourceSpec) -> Result<()> {
        let name = name.into();
        spec.schema.validate_definition()?;
        if self.resources.contains_key(&name) {
            return Err(ProviderError::DuplicateResource(name));
        }
        debug!(resource = %name, fields = spec.schema.len(), "registered resource");
        self.resources.insert(name, spec);
        Ok(())
    }

    /// Register a datasource. Same rules as [`register_resource`].
    ///
    /// [`register_resource`]: Provider::register_resource
    pub fn register_datasource(
        &mut self,
        name: impl Into<String>,
        spec: DatasourceSpec,
    ) -> Result<()> {
        let name = name.into();
        spec.schema.validate_definition()?;
        if self.datasources.contains_key(&name) {
            return Err(ProviderError::DuplicateDatasource(name));
        }
        debug!(datasource = %name, fields = spec.schema.len(), "registered datasource");
        self.datasources.insert(name, spec);
        Ok(())
    }

    /// Look up a registered resource.
    pub fn resource(&self, name: &str) -> Option<&ResourceSpec> {
        self.resources.get(name)
    }

    /// Look up a registered datasource.
    pub fn datasource(&self, name: &str) -> Option<&DatasourceSpec> {
        self.datasources.get(name)
    }

    /// Names of all registered resources, sorted.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Names of all registered datasources, sorted.
    pub fn datasource_names(&self) -> impl Iterator<Item = &str> {
        self.datasources.keys().map(String::as_str)
    }

    /// Run a datasource read: validate the configuration against the
    /// datasource's schema, build state, and dispatch to its read handler.
    #[instrument(skip(self, config))]
    pub async fn read_datasource(
        &self,
        name: &str,
        config: Map<String, Value>,
    ) -> Result<ResourceData> {
        let spec = self
            .datasources
            .get(name)
            .ok_or_else(|| ProviderError::UnknownDatasource(name.to_string()))?;
        self.run_read(&spec.schema, &spec.read, config).await
    }

    /// Run a resource refresh through the same shared read path.
    #[instrument(skip(self, config))]
    pub async fn read_resource(
        &self,
        name: &str,
        config: Map<String, Value>,
    ) -> Result<ResourceData> {
        let spec = self
            .resources
            .get(name)
            .ok_or_else(|| ProviderError::UnknownResource(name.to_string()))?;
        self.run_read(&spec.schema, &spec.read, config).await
    }

    async fn run_read(
        &self,
        schema: &Schema,
        handler: &Arc<dyn ReadHandler>,
        config: Map<String, Value>,
    ) -> Result<ResourceData> {
        schema.validate_config(&config)?;
        let mut data = ResourceData::new(schema.clone(), config);
        let ctx = ReadContext::new(self.settings.clone(), Arc::clone(&self.catalog));
        handler.read(&ctx, &mut data).await?;
        Ok(data)
    }
}
