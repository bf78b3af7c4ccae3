//! Installation smoke test.
//!
//! Loads the shared library through the platform loader and calls its
//! version function. This only proves that the library loads and exports the
//! symbol; it does not validate anything else about the install.

use std::ffi::{CStr, c_char};

use libloading::{Library, Symbol};
use thiserror::Error;

use crate::Reporter;

/// Exported no-argument function returning the library version string.
pub const VERSION_SYMBOL: &str = "extism_version";

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("unable to open {name}, no installation detected")]
    LibraryNotFound { name: String },

    #[error("{name} does not export {symbol}: {reason}")]
    SymbolNotFound {
        name: String,
        symbol: String,
        reason: String,
    },
}

/// Version function as resolved from a loaded library.
pub type VersionFn<'lib> = Box<dyn Fn() -> String + 'lib>;

/// Loads libraries and resolves symbols. The rest of the crate only talks to
/// the loader through this trait.
pub trait LibraryLoader {
    type Library;

    fn load(&self, name: &str) -> Result<Self::Library, ProbeError>;

    /// Resolve a `const char *(void)` function by name.
    fn resolve<'lib>(
        &self,
        library: &'lib Self::Library,
        symbol: &str,
    ) -> Result<VersionFn<'lib>, ProbeError>;
}

/// The platform dynamic loader (`dlopen` / `LoadLibrary`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeLoader;

/// A library opened by [`NativeLoader`], remembering its name for errors.
#[derive(Debug)]
pub struct NativeLibrary {
    name: String,
    library: Library,
}

type RawVersionFn = unsafe extern "C" fn() -> *const c_char;

impl LibraryLoader for NativeLoader {
    type Library = NativeLibrary;

    fn load(&self, name: &str) -> Result<NativeLibrary, ProbeError> {
        // SAFETY: loading runs the library's initializers. The caller asked
        // for this library by name; nothing else is assumed about it.
        let library = unsafe { Library::new(name) }.map_err(|e| {
            tracing::debug!(%name, error = %e, "dlopen failed");
            ProbeError::LibraryNotFound {
                name: name.to_string(),
            }
        })?;

        Ok(NativeLibrary {
            name: name.to_string(),
            library,
        })
    }

    fn resolve<'lib>(
        &self,
        library: &'lib NativeLibrary,
        symbol: &str,
    ) -> Result<VersionFn<'lib>, ProbeError> {
        // SAFETY: the symbol is declared as `const char *extism_version(void)`.
        let func: Symbol<'lib, RawVersionFn> = unsafe { library.library.get(symbol.as_bytes()) }
            .map_err(|e| ProbeError::SymbolNotFound {
                name: library.name.clone(),
                symbol: symbol.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Box::new(move || {
            // SAFETY: `func` is valid while `library` is borrowed, which the
            // returned closure's lifetime guarantees. The pointer is a static
            // NUL-terminated string owned by the library.
            unsafe {
                let ptr = func();
                if ptr.is_null() {
                    String::new()
                } else {
                    CStr::from_ptr(ptr).to_string_lossy().into_owned()
                }
            }
        }))
    }
}

/// Load `name` and return what its version function reports.
pub fn probe<L: LibraryLoader>(
    loader: &L,
    name: &str,
    symbol: &str,
    reporter: &dyn Reporter,
) -> Result<String, ProbeError> {
    reporter.debug(&format!("dlopen {name}"));
    let library = loader.load(name)?;

    reporter.debug(&format!("Registering {symbol} func"));
    let version = loader.resolve(&library, symbol)?;
    Ok(version())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullReporter;
    use std::collections::HashMap;

    /// In-memory loader: library name -> exported symbols.
    struct FakeLoader {
        libraries: HashMap<&'static str, HashMap<&'static str, &'static str>>,
    }

    impl LibraryLoader for FakeLoader {
        type Library = HashMap<&'static str, &'static str>;

        fn load(&self, name: &str) -> Result<Self::Library, ProbeError> {
            self.libraries
                .get(name)
                .cloned()
                .ok_or_else(|| ProbeError::LibraryNotFound {
                    name: name.to_string(),
                })
        }

        fn resolve<'lib>(
            &self,
            library: &'lib Self::Library,
            symbol: &str,
        ) -> Result<VersionFn<'lib>, ProbeError> {
            let value = library
                .get(symbol)
                .ok_or_else(|| ProbeError::SymbolNotFound {
                    name: "fake".to_string(),
                    symbol: symbol.to_string(),
                    reason: "missing".to_string(),
                })?;
            Ok(Box::new(move || (*value).to_string()))
        }
    }

    fn loader() -> FakeLoader {
        let mut symbols = HashMap::new();
        symbols.insert(VERSION_SYMBOL, "1.2.3");
        let mut libraries = HashMap::new();
        libraries.insert("libextism.so", symbols);
        FakeLoader { libraries }
    }

    #[test]
    fn test_probe_reports_version() {
        let version = probe(&loader(), "libextism.so", VERSION_SYMBOL, &NullReporter).unwrap();
        assert_eq!(version, "1.2.3");
    }

    #[test]
    fn test_probe_missing_library() {
        let err = probe(&loader(), "extism.dll", VERSION_SYMBOL, &NullReporter).unwrap_err();
        assert!(matches!(err, ProbeError::LibraryNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "unable to open extism.dll, no installation detected"
        );
    }

    #[test]
    fn test_probe_missing_symbol() {
        let err = probe(&loader(), "libextism.so", "extism_nope", &NullReporter).unwrap_err();
        assert!(matches!(err, ProbeError::SymbolNotFound { .. }));
    }

    #[test]
    fn test_native_loader_missing_library() {
        let err = NativeLoader
            .load("libdefinitely-not-installed-extlib.so")
            .unwrap_err();
        assert!(matches!(err, ProbeError::LibraryNotFound { .. }));
    }
}
