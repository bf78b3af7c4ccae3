//! Shared operation context.
//!
//! Groups the handles every catalog-backed operation needs, so commands pass
//! one value around instead of three.

use std::fmt;
use std::sync::Arc;

use crate::Reporter;
use crate::catalog::{CatalogConfig, GithubCatalog, ReleaseSource};

#[derive(Clone)]
pub struct Context {
    /// HTTP client for archive downloads.
    pub client: reqwest::Client,
    pub catalog: Arc<dyn ReleaseSource>,
    pub reporter: Arc<dyn Reporter>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl Context {
    pub fn new(
        client: reqwest::Client,
        catalog: Arc<dyn ReleaseSource>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            client,
            catalog,
            reporter,
        }
    }

    /// Context backed by the GitHub catalog described by `config`.
    pub fn github(config: CatalogConfig, reporter: Arc<dyn Reporter>) -> Self {
        let client = reqwest::Client::new();
        let catalog = Arc::new(GithubCatalog::new(client.clone(), config));
        Self::new(client, catalog, reporter)
    }
}
