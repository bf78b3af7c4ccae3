//! Asset selection within a resolved release.

use extlib_schema::{ARCHIVE_SUFFIX, ASSET_NAME_PREFIX, Asset, Release};
use thiserror::Error;

use crate::Reporter;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no release asset found matching {prefix}")]
pub struct AssetNotFound {
    pub prefix: String,
}

/// Return the first asset named `<prefix>...tar.gz`, in catalog order.
///
/// This is first-match, not best-match: if two archives share the prefix the
/// one listed earlier wins.
pub fn select_asset<'a>(
    release: &'a Release,
    prefix: &str,
    reporter: &dyn Reporter,
) -> Result<&'a Asset, AssetNotFound> {
    reporter.debug(&format!("Searching for asset matching: {prefix}"));

    for asset in &release.assets {
        if asset.name.starts_with(prefix) && asset.name.ends_with(ARCHIVE_SUFFIX) {
            return Ok(asset);
        }
        reporter.debug(&format!("Invalid asset: {}", asset.name));
    }

    Err(AssetNotFound {
        prefix: prefix.to_string(),
    })
}

/// Platform triples a release ships archives for.
///
/// `libextism-aarch64-apple-darwin-v1.2.3.tar.gz` in release `v1.2.3`
/// becomes `aarch64-apple-darwin`. Non-archive assets are skipped.
pub fn release_triples(release: &Release) -> Vec<String> {
    let tag_suffix = format!("-{}{ARCHIVE_SUFFIX}", release.tag);
    let main_suffix = format!("-main{ARCHIVE_SUFFIX}");

    release
        .assets
        .iter()
        .filter(|a| a.name.ends_with(ARCHIVE_SUFFIX))
        .map(|a| {
            let name = a.name.strip_prefix(ASSET_NAME_PREFIX).unwrap_or(&a.name);
            let name = name.strip_suffix(&tag_suffix).unwrap_or(name);
            let name = name.strip_suffix(&main_suffix).unwrap_or(name);
            name.to_string()
        })
        .collect()
}

/// Releases to list for the given tag filters, keeping catalog order.
///
/// No filters keeps everything. Otherwise a release is kept only when its tag
/// equals one of `tags`; prefixes do not match.
pub fn filter_releases<'a>(releases: &'a [Release], tags: &[String]) -> Vec<&'a Release> {
    releases
        .iter()
        .filter(|r| tags.is_empty() || tags.iter().any(|t| *t == r.tag))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullReporter;
    use chrono::Utc;

    fn release(tag: &str, assets: &[&str]) -> Release {
        Release {
            tag: tag.to_string(),
            created_at: Utc::now(),
            published_at: None,
            html_url: String::new(),
            assets: assets
                .iter()
                .map(|name| Asset::new(*name, format!("https://example.com/{name}")))
                .collect(),
        }
    }

    #[test]
    fn test_selects_matching_archive() {
        let rel = release(
            "v1.2.3",
            &[
                "libextism-x86_64-unknown-linux-gnu-v1.2.3.sha256",
                "libextism-aarch64-apple-darwin-v1.2.3.tar.gz",
                "libextism-x86_64-unknown-linux-gnu-v1.2.3.tar.gz",
            ],
        );

        let asset =
            select_asset(&rel, "libextism-x86_64-unknown-linux-gnu", &NullReporter).unwrap();
        assert_eq!(
            asset.name,
            "libextism-x86_64-unknown-linux-gnu-v1.2.3.tar.gz"
        );
    }

    #[test]
    fn test_first_match_wins() {
        let rel = release(
            "v1.2.3",
            &[
                "libextism-x86_64-unknown-linux-gnu-debug-v1.2.3.tar.gz",
                "libextism-x86_64-unknown-linux-gnu-v1.2.3.tar.gz",
            ],
        );

        let asset =
            select_asset(&rel, "libextism-x86_64-unknown-linux-gnu", &NullReporter).unwrap();
        assert_eq!(
            asset.name,
            "libextism-x86_64-unknown-linux-gnu-debug-v1.2.3.tar.gz"
        );
    }

    #[test]
    fn test_no_match_names_prefix() {
        let rel = release("v1.2.3", &["libextism-aarch64-apple-darwin-v1.2.3.tar.gz"]);

        let err = select_asset(&rel, "libextism-x86_64-pc-windows-msvc", &NullReporter)
            .unwrap_err();
        assert_eq!(err.prefix, "libextism-x86_64-pc-windows-msvc");
        assert_eq!(
            err.to_string(),
            "no release asset found matching libextism-x86_64-pc-windows-msvc"
        );
    }

    #[test]
    fn test_release_triples() {
        let rel = release(
            "v1.2.3",
            &[
                "libextism-aarch64-apple-darwin-v1.2.3.tar.gz",
                "libextism-x86_64-unknown-linux-musl-v1.2.3.tar.gz",
                "checksums.txt",
            ],
        );
        assert_eq!(
            release_triples(&rel),
            ["aarch64-apple-darwin", "x86_64-unknown-linux-musl"]
        );

        let rolling = release("latest", &["libextism-x86_64-pc-windows-gnu-main.tar.gz"]);
        assert_eq!(release_triples(&rolling), ["x86_64-pc-windows-gnu"]);
    }

    #[test]
    fn test_filter_releases_exact_tags() {
        let releases = vec![
            release("v1.2.3", &[]),
            release("v1.2", &[]),
            release("v1.1.0", &[]),
        ];

        let tags = vec!["v1.2".to_string(), "v1.1.0".to_string()];
        let kept: Vec<&str> = filter_releases(&releases, &tags)
            .iter()
            .map(|r| r.tag.as_str())
            .collect();
        assert_eq!(kept, ["v1.2", "v1.1.0"]);

        let none = filter_releases(&releases, &["v1".to_string()]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_filter_releases_without_tags_keeps_all() {
        let releases = vec![release("latest", &[]), release("v1.2.3", &[])];
        assert_eq!(filter_releases(&releases, &[]).len(), 2);
    }
}
