//! Uninstall command

use extlib_core::Reporter;
use extlib_core::uninstall::{installed_files, uninstall as run_uninstall};
use extlib_schema::InstallLayout;

/// Remove an installation. Failures to remove individual files are warnings,
/// never errors.
pub async fn uninstall(layout: &InstallLayout, os: &str, dry_run: bool, reporter: &dyn Reporter) {
    if dry_run {
        for path in installed_files(layout, os) {
            reporter.info(&format!("Would remove {}", path.display()));
        }
        return;
    }

    let removed = run_uninstall(layout, os, reporter).await;
    if removed.is_empty() {
        reporter.info("Nothing removed");
    } else {
        reporter.success(&format!("Removed {} files", removed.len()));
    }
}
