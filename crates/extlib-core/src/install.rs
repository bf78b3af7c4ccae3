//! Library installation.
//!
//! The pipeline is strictly sequential:
//!
//! 1. compute the asset prefix for the target platform
//! 2. resolve the version token against the catalog
//! 3. pick the first matching `.tar.gz` asset
//! 4. stream, decompress and unpack it into the install layout
//!
//! Nothing is retried and nothing already written is rolled back on failure.

use std::path::PathBuf;

use extlib_schema::{Asset, InstallLayout, PlatformError, PlatformTriplet, Release};
use thiserror::Error;

use crate::catalog::{self, CatalogError, GIT_VERSION};
use crate::context::Context;
use crate::io::download::{self, DownloadError};
use crate::io::extract::{self, ExtractError};
use crate::select::{self, AssetNotFound};

#[derive(Error, Debug)]
pub enum InstallError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    AssetNotFound(#[from] AssetNotFound),

    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("Install failed: {0}")]
    Extract(#[from] ExtractError),
}

/// What to install and where.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Version token: empty for the newest release, a tag prefix, `latest` or `git`.
    pub version: String,
    pub target: PlatformTriplet,
    pub layout: InstallLayout,
    /// Resolve and select only; download nothing.
    pub dry_run: bool,
}

/// Result of a successful install.
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    pub release: Release,
    pub asset: Asset,
    /// Files written, in archive order. Empty for a dry run.
    pub files: Vec<PathBuf>,
}

/// Resolve, download and unpack the library described by `request`.
pub async fn install(ctx: &Context, request: &InstallRequest) -> Result<InstallOutcome, InstallError> {
    let reporter = ctx.reporter.as_ref();

    reporter.debug(&format!(
        "Searching for release matching {:?}",
        request.version
    ));
    if request.version == GIT_VERSION {
        reporter.debug("Converting version from `git` to `latest`");
    }

    let prefix = request.target.asset_prefix()?;
    let release = catalog::resolve_version(ctx.catalog.as_ref(), &request.version, reporter).await?;
    let asset = select::select_asset(&release, &prefix, reporter)?.clone();

    reporter.info(&format!(
        "Installing {} to {}",
        release.tag,
        request.layout.prefix().display()
    ));
    reporter.info(&format!("Fetching {}", asset.download_url));

    if request.dry_run {
        reporter.info("Dry run, not downloading.");
        return Ok(InstallOutcome {
            release,
            asset,
            files: Vec::new(),
        });
    }

    let body = download::open_archive_stream(&ctx.client, &asset.download_url).await?;
    let files = extract::unpack_archive(body, &request.layout, &request.target, reporter).await?;

    tracing::info!(tag = %release.tag, asset = %asset.name, files = files.len(), "installed");
    Ok(InstallOutcome {
        release,
        asset,
        files,
    })
}
