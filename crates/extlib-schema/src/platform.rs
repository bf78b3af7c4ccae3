//! Target platform triplets and the asset names they map to.
//!
//! Release archives are named after Rust target triples
//! (`libextism-x86_64-unknown-linux-gnu-v1.2.3.tar.gz`). A [`PlatformTriplet`]
//! holds the user-facing `arch`, `os` and `libc` values (Go-style names such as
//! `amd64` are accepted) and [`PlatformTriplet::asset_prefix`] turns them into
//! the canonical archive name prefix.
//!
//! # Example
//!
//! ```
//! use extlib_schema::PlatformTriplet;
//!
//! let target = PlatformTriplet::new("amd64", "linux", "");
//! assert_eq!(
//!     target.asset_prefix().unwrap(),
//!     "libextism-x86_64-unknown-linux-gnu"
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while interpreting a platform.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The combination maps to no published asset naming scheme.
    #[error("unsupported platform: {triplet}")]
    UnsupportedPlatform {
        /// The offending `arch-os-libc` combination.
        triplet: String,
    },

    /// A triplet string did not have 3 or 4 dash-separated segments.
    #[error("malformed triplet '{triplet}': expected 3 or 4 parts, found {segments}")]
    MalformedTriplet {
        /// The string as supplied.
        triplet: String,
        /// Number of segments found.
        segments: usize,
    },
}

/// An (arch, os, libc) target description.
///
/// Values are kept as given; normalization happens only when an asset name is
/// computed, so an unknown architecture passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PlatformTriplet {
    /// CPU architecture (`amd64`, `x86_64`, `arm64`, `aarch64`, ...).
    pub arch: String,
    /// Operating system (`linux`, `windows`, `darwin`/`macos`).
    pub os: String,
    /// C runtime flavour (`gnu`, `musl`, `msvc`); empty means platform default.
    pub libc: String,
}

impl PlatformTriplet {
    /// Create a triplet from explicit fields.
    pub fn new(arch: impl Into<String>, os: impl Into<String>, libc: impl Into<String>) -> Self {
        Self {
            arch: arch.into(),
            os: os.into(),
            libc: libc.into(),
        }
    }

    /// The platform this binary is running on, with the default libc.
    pub fn host() -> Self {
        Self::new(host_arch(), host_os(), "")
    }

    /// Parse an `arch-vendor-os[-libc]` string.
    ///
    /// The vendor segment is ignored. Any segment count other than 3 or 4 is
    /// rejected rather than truncated.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::MalformedTriplet`] on a wrong segment count.
    pub fn parse(triplet: &str) -> Result<Self, PlatformError> {
        let parts: Vec<&str> = triplet.split('-').collect();
        match parts.as_slice() {
            [arch, _vendor, os] => Ok(Self::new(*arch, *os, "")),
            [arch, _vendor, os, libc] => Ok(Self::new(*arch, *os, *libc)),
            _ => Err(PlatformError::MalformedTriplet {
                triplet: triplet.to_string(),
                segments: parts.len(),
            }),
        }
    }

    /// Build the target from either a combined triplet string or separate fields.
    ///
    /// A non-empty `triplet` wins over `arch`, `os` and `libc`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::MalformedTriplet`] if `triplet` cannot be parsed.
    pub fn from_parts(
        triplet: Option<&str>,
        arch: &str,
        os: &str,
        libc: &str,
    ) -> Result<Self, PlatformError> {
        match triplet {
            Some(t) if !t.is_empty() => Self::parse(t),
            _ => Ok(Self::new(arch, os, libc)),
        }
    }

    /// Architecture in Rust target naming (`amd64` -> `x86_64`, `arm64` -> `aarch64`).
    pub fn rust_arch(&self) -> &str {
        match self.arch.as_str() {
            "amd64" => "x86_64",
            "arm64" => "aarch64",
            other => other,
        }
    }

    /// Whether the target is macOS, under either of its names.
    pub fn is_darwin(&self) -> bool {
        is_darwin_os(&self.os)
    }

    /// Whether the target is Windows. Substring match, so `windows-gnu`-style
    /// values count too.
    pub fn is_windows(&self) -> bool {
        is_windows_os(&self.os)
    }

    /// Canonical asset-name prefix, e.g. `libextism-aarch64-apple-darwin`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::UnsupportedPlatform`] when the os/libc pair has
    /// no published archive, including darwin with a non-empty libc.
    pub fn asset_prefix(&self) -> Result<String, PlatformError> {
        let arch = self.rust_arch();
        let base = crate::ASSET_NAME_PREFIX;
        let libc = self.libc.as_str();

        match self.os.as_str() {
            "linux" => {
                let libc = if libc.is_empty() { "gnu" } else { libc };
                Ok(format!("{base}{arch}-unknown-linux-{libc}"))
            }
            "windows" => {
                let libc = if libc.is_empty() { "msvc" } else { libc };
                Ok(format!("{base}{arch}-pc-windows-{libc}"))
            }
            "darwin" | "macos" if libc.is_empty() => Ok(format!("{base}{arch}-apple-darwin")),
            _ => Err(PlatformError::UnsupportedPlatform {
                triplet: self.to_string(),
            }),
        }
    }

    /// Extension of the shared object for this target.
    pub fn shared_object_ext(&self) -> &'static str {
        if self.is_darwin() {
            ".dylib"
        } else if self.is_windows() {
            ".dll"
        } else {
            ".so"
        }
    }

    /// File name of the shared library for this target.
    pub fn shared_library_name(&self) -> &'static str {
        shared_library_name(&self.os)
    }

    /// File name of the static library for this target.
    pub fn static_library_name(&self) -> &'static str {
        static_library_name(&self.os)
    }
}

impl fmt::Display for PlatformTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.arch, self.os, self.libc)
    }
}

impl FromStr for PlatformTriplet {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `darwin` or `macos`.
pub fn is_darwin_os(os: &str) -> bool {
    matches!(os, "darwin" | "macos")
}

/// Any os value containing `windows`.
pub fn is_windows_os(os: &str) -> bool {
    os.contains("windows")
}

/// Shared library file name for `os`, as the dynamic loader expects it.
pub fn shared_library_name(os: &str) -> &'static str {
    if is_darwin_os(os) {
        "libextism.dylib"
    } else if is_windows_os(os) {
        "extism.dll"
    } else {
        "libextism.so"
    }
}

/// Static library file name for `os`.
pub fn static_library_name(os: &str) -> &'static str {
    if is_windows_os(os) {
        "extism.lib"
    } else {
        "libextism.a"
    }
}

/// Operating system of the running host, in catalog vocabulary.
///
/// Rust reports macOS as `macos`; release assets and the `--os` flag use
/// `darwin`, so that is what this returns.
pub fn host_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

/// Architecture of the running host (`x86_64`, `aarch64`, ...).
pub fn host_arch() -> &'static str {
    std::env::consts::ARCH
}

/// Default install prefix for a host OS.
pub fn default_prefix(os: &str) -> &'static str {
    match os {
        "windows" => ".",
        _ => "/usr/local",
    }
}
