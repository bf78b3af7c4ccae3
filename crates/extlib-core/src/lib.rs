//! Core library for extlib.
//!
//! Resolves a version against the release catalog, selects the archive for a
//! target platform, unpacks it into an install prefix, removes an install,
//! and probes an installed library.

pub mod catalog;
pub mod context;
pub mod install;
pub mod io;
pub mod probe;
pub mod reporter;
pub mod select;
pub mod uninstall;

pub use context::Context;
pub use reporter::{NullReporter, Reporter};

/// User Agent string for core operations
pub const USER_AGENT: &str = concat!("extlib-core/", env!("CARGO_PKG_VERSION"));
