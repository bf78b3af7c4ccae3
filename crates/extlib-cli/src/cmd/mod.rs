//! Command implementations

pub mod check;
pub mod completions;
pub mod install;
pub mod uninstall;
pub mod versions;

use std::sync::Arc;

use extlib_core::Context;
use extlib_core::catalog::CatalogConfig;

use crate::ui::Output;

/// Build the catalog-backed context from global flags.
pub fn context(api_url: &str, token: Option<String>, output: Output) -> Context {
    let config = CatalogConfig::default()
        .with_api_url(api_url)
        .with_token(token);
    tracing::debug!(url = %config.releases_url(), auth = config.token.is_some(), "catalog");
    Context::github(config, Arc::new(output))
}
