//! Provider core for the Nimbus hosted-services platform.
//!
//! This crate wires the declarative schemas from `nimbus-schema` to a
//! registry of resources and read-only datasources, and runs reads
//! through handlers shared between the two variants. The platform API
//! itself sits behind the [`ServiceCatalog`] trait; this crate never
//! performs I/O of its own.

pub mod catalog;
mod context;
pub mod error;
mod handlers;
mod registry;
pub mod services;
mod state;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use catalog::{Service, ServiceCatalog, ServiceStatus};
pub use context::ReadContext;
pub use error::{CatalogError, ProviderError, Result};
pub use handlers::{ReadHandler, ServiceRead};
pub use registry::{DatasourceSpec, Provider, ResourceSpec};
pub use state::ResourceData;
