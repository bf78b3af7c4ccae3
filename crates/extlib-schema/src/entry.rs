//! Classification of archive entries by file name.

use crate::PlatformTriplet;

/// Suffix of C headers.
pub const HEADER_EXT: &str = ".h";

/// Suffix of pkg-config templates shipped in archives.
pub const PKGCONFIG_TEMPLATE_EXT: &str = ".pc.in";

/// What an archive entry is, and therefore where it goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Platform shared object (`.so`, `.dylib`, `.dll`).
    SharedObject,
    /// Platform static library (`libextism.a`, `extism.lib`).
    StaticLib,
    /// C header.
    Header,
    /// `*.pc.in` template, rewritten on install.
    PkgConfigTemplate,
    /// Anything else; ignored.
    Other,
}

impl EntryKind {
    /// Classify an entry name for `target`.
    ///
    /// Surrounding whitespace is ignored. The checks run in a fixed order, so
    /// a name matching several suffixes gets the first kind that applies.
    pub fn classify(name: &str, target: &PlatformTriplet) -> Self {
        let name = name.trim();
        if name.ends_with(target.shared_object_ext()) {
            Self::SharedObject
        } else if name.ends_with(HEADER_EXT) {
            Self::Header
        } else if name.ends_with(target.static_library_name()) {
            Self::StaticLib
        } else if name.ends_with(PKGCONFIG_TEMPLATE_EXT) {
            Self::PkgConfigTemplate
        } else {
            Self::Other
        }
    }

    /// Name the entry is installed under.
    ///
    /// Templates lose their trailing `.in`; every other kind keeps its name.
    pub fn installed_name(self, name: &str) -> &str {
        let name = name.trim();
        match self {
            Self::PkgConfigTemplate => name.strip_suffix(".in").unwrap_or(name),
            _ => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_linux() {
        let linux = PlatformTriplet::new("amd64", "linux", "");
        assert_eq!(
            EntryKind::classify("libextism.so", &linux),
            EntryKind::SharedObject
        );
        assert_eq!(EntryKind::classify("libextism.a", &linux), EntryKind::StaticLib);
        assert_eq!(EntryKind::classify("extism.h", &linux), EntryKind::Header);
        assert_eq!(
            EntryKind::classify("extism.pc.in", &linux),
            EntryKind::PkgConfigTemplate
        );
        assert_eq!(EntryKind::classify("LICENSE", &linux), EntryKind::Other);
        // A dylib is not a shared object on linux
        assert_eq!(EntryKind::classify("libextism.dylib", &linux), EntryKind::Other);
    }

    #[test]
    fn test_classify_trims_whitespace() {
        let linux = PlatformTriplet::new("amd64", "linux", "");
        assert_eq!(EntryKind::classify("  extism.h ", &linux), EntryKind::Header);
    }

    #[test]
    fn test_classify_per_os() {
        let mac = PlatformTriplet::new("arm64", "darwin", "");
        assert_eq!(
            EntryKind::classify("libextism.dylib", &mac),
            EntryKind::SharedObject
        );

        let win = PlatformTriplet::new("amd64", "windows", "");
        assert_eq!(EntryKind::classify("extism.dll", &win), EntryKind::SharedObject);
        assert_eq!(EntryKind::classify("extism.lib", &win), EntryKind::StaticLib);
        assert_eq!(EntryKind::classify("libextism.a", &win), EntryKind::Other);
    }

    #[test]
    fn test_installed_name() {
        assert_eq!(
            EntryKind::PkgConfigTemplate.installed_name("extism-static.pc.in"),
            "extism-static.pc"
        );
        assert_eq!(EntryKind::Header.installed_name(" extism.h"), "extism.h");
    }
}
