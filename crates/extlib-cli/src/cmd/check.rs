//! Check command

use anyhow::Result;
use crossterm::style::Stylize;
use extlib_core::Reporter;
use extlib_core::probe::{NativeLoader, VERSION_SYMBOL, probe};
use extlib_schema::PlatformTriplet;

/// Load the host's libextism through the dynamic loader and print its version.
pub fn check(reporter: &dyn Reporter) -> Result<()> {
    let name = PlatformTriplet::host().shared_library_name();
    let version = probe(&NativeLoader, name, VERSION_SYMBOL, reporter)?;

    reporter.success(&format!("{name} loaded"));
    println!("{}", version.as_str().cyan());
    Ok(())
}
