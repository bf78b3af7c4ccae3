//! Install command

use anyhow::{Context as _, Result};
use crossterm::style::Stylize;
use extlib_core::Context;
use extlib_core::install::{InstallRequest, install as run_install};
use extlib_schema::PlatformTriplet;

use crate::InstallArgs;

/// Install the requested release into the layout prefix.
pub async fn install(ctx: &Context, args: &InstallArgs, dry_run: bool) -> Result<()> {
    let target = PlatformTriplet::from_parts(
        args.triplet.as_deref(),
        &args.arch,
        &args.os,
        &args.libc,
    )?;
    tracing::debug!(%target, "install target");

    let request = InstallRequest {
        version: args.version.clone(),
        target,
        layout: args.layout.layout(),
        dry_run,
    };

    let outcome = run_install(ctx, &request)
        .await
        .with_context(|| format!("Failed to install libextism for {}", request.target))?;

    if dry_run {
        ctx.reporter.info(&format!(
            "Would install {} from {}",
            outcome.release.tag.as_str().cyan(),
            outcome.asset.name
        ));
        return Ok(());
    }

    for file in &outcome.files {
        ctx.reporter.debug(&format!("Installed {}", file.display()));
    }
    ctx.reporter.success(&format!(
        "Installed libextism {} ({} files)",
        outcome.release.tag.as_str().cyan(),
        outcome.files.len()
    ));
    Ok(())
}
