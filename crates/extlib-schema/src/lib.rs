//! Shared types for extlib.
//!
//! Everything in this crate is free of I/O: release snapshots as returned by
//! the catalog, platform triplets and the asset names they map to, the install
//! prefix layout, and the classification of archive entries.

pub mod entry;
pub mod layout;
pub mod platform;
pub mod types;

// Re-exports
pub use entry::EntryKind;
pub use layout::InstallLayout;
pub use platform::{PlatformError, PlatformTriplet};
pub use types::{Asset, Release};

/// Name prefix shared by every published library archive.
pub const ASSET_NAME_PREFIX: &str = "libextism-";

/// Suffix of the only archive format the installer understands.
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// Header file shipped in every archive.
pub const HEADER_NAME: &str = "extism.h";

/// Pkg-config files an install may produce, in removal order.
pub const PKGCONFIG_NAMES: [&str; 2] = ["extism.pc", "extism-static.pc"];

/// Tag of the rolling release that tracks the tip of the main branch.
pub const LATEST_TAG: &str = "latest";
