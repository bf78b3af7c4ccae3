//! Best-effort removal of an installed library.

use std::path::PathBuf;

use extlib_schema::{HEADER_NAME, InstallLayout, PKGCONFIG_NAMES, platform};

use crate::Reporter;

/// Every file an install into `layout` for `os` can produce.
pub fn installed_files(layout: &InstallLayout, os: &str) -> Vec<PathBuf> {
    let lib = layout.lib_path();
    let pkgconfig = layout.pkgconfig_path();

    let mut files = vec![
        lib.join(platform::shared_library_name(os)),
        lib.join(platform::static_library_name(os)),
        layout.include_path().join(HEADER_NAME),
    ];
    files.extend(PKGCONFIG_NAMES.iter().map(|name| pkgconfig.join(name)));
    files
}

/// Remove the installed files, continuing past any that fail.
///
/// Never fails: a missing file or a permission error is reported as a warning
/// and the remaining removals still run. Returns the paths actually removed.
pub async fn uninstall(layout: &InstallLayout, os: &str, reporter: &dyn Reporter) -> Vec<PathBuf> {
    reporter.debug(&format!(
        "Uninstalling files from prefix: {}",
        layout.prefix().display()
    ));

    let mut removed = Vec::new();
    for path in installed_files(layout, os) {
        reporter.info(&format!("Removing {}", path.display()));
        match tokio::fs::remove_file(&path).await {
            Ok(()) => removed.push(path),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "remove failed");
                reporter.warning(&format!("{}: {e}", path.display()));
            }
        }
    }
    removed
}
