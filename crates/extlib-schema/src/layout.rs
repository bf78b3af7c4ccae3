//! Install prefix layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where an install puts its files.
///
/// ```text
/// <prefix>/
/// ├── <lib_dir>/              # shared + static library
/// │   └── pkgconfig/          # extism.pc, extism-static.pc
/// └── <include_dir>/          # extism.h
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallLayout {
    /// Installation root.
    pub prefix: PathBuf,
    /// Library directory, relative to `prefix`.
    pub lib_dir: PathBuf,
    /// Header directory, relative to `prefix`.
    pub include_dir: PathBuf,
}

impl InstallLayout {
    /// Create a layout from a prefix and its two relative subdirectories.
    pub fn new(
        prefix: impl Into<PathBuf>,
        lib_dir: impl Into<PathBuf>,
        include_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            lib_dir: lib_dir.into(),
            include_dir: include_dir.into(),
        }
    }

    /// `lib` and `include` under `prefix`.
    pub fn with_prefix(prefix: impl Into<PathBuf>) -> Self {
        Self::new(prefix, "lib", "include")
    }

    /// Destination for shared and static libraries: `prefix/lib_dir`.
    pub fn lib_path(&self) -> PathBuf {
        self.prefix.join(&self.lib_dir)
    }

    /// Destination for headers: `prefix/include_dir`.
    pub fn include_path(&self) -> PathBuf {
        self.prefix.join(&self.include_dir)
    }

    /// Destination for pkg-config files: `prefix/lib_dir/pkgconfig`.
    pub fn pkgconfig_path(&self) -> PathBuf {
        self.lib_path().join("pkgconfig")
    }

    /// Installation root.
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }
}
