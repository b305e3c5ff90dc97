//! Error types for registry and handler operations.

use thiserror::Error;

use nimbus_schema::SchemaError;

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors that can occur while registering or running provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// A resource with this name is already registered.
    #[error("Resource '{0}' is already registered")]
    DuplicateResource(String),

    /// A datasource with this name is already registered.
    #[error("Datasource '{0}' is already registered")]
    DuplicateDatasource(String),

    /// No resource is registered under this name.
    #[error("Unknown resource '{0}'")]
    UnknownResource(String),

    /// No datasource is registered under this name.
    #[error("Unknown datasource '{0}'")]
    UnknownDatasource(String),

    /// A registered schema failed validation, or a configuration did not
    /// match its schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The backend could not complete the lookup.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A lookup key was neither configured nor resolvable from settings.
    #[error("Lookup key '{0}' is not set and no default is configured")]
    MissingLookupKey(String),
}

/// Errors reported by a [`ServiceCatalog`](crate::ServiceCatalog) backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The project exists but has no service with this name.
    #[error("Service '{service_name}' not found in project '{project}'")]
    ServiceNotFound {
        project: String,
        service_name: String,
    },

    /// The project itself is unknown to the platform.
    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    /// Opaque backend failure.
    #[error("Backend error: {0}")]
    Backend(String),
}
