//! Execution context handed to read handlers.

use std::sync::Arc;

use nimbus_config::Settings;

use crate::catalog::ServiceCatalog;

/// Everything a read handler needs: resolved provider settings and the
/// backend handle.
#[derive(Clone)]
pub struct ReadContext {
    settings: Settings,
    catalog: Arc<dyn ServiceCatalog>,
}

impl ReadContext {
    pub fn new(settings: Settings, catalog: Arc<dyn ServiceCatalog>) -> Self {
        Self { settings, catalog }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &dyn ServiceCatalog {
        self.catalog.as_ref()
    }
}

impl std::fmt::Debug for ReadContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
