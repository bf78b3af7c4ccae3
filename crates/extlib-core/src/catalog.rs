//! Release catalog client.
//!
//! Releases are listed from a [`ReleaseSource`] (GitHub in production), ordered
//! newest first, and a version token is resolved against that ordering. There
//! is no caching and no retry: every call goes to the source and a failure is
//! returned as-is.

use async_trait::async_trait;
use extlib_schema::{LATEST_TAG, Release};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::Reporter;

/// Default GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Version token that selects the rolling release built from git.
pub const GIT_VERSION: &str = "git";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog request to {url} failed: HTTP {status}")]
    Status { status: StatusCode, url: String },

    #[error("unable to find release {0}")]
    ReleaseNotFound(String),

    #[error("no published release found")]
    NoReleases,
}

/// Where releases are listed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL of the GitHub REST API.
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    /// Optional bearer token, raises the anonymous rate limit.
    pub token: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            owner: "extism".to_string(),
            repo: "extism".to_string(),
            token: None,
        }
    }
}

impl CatalogConfig {
    /// Use a different API endpoint (mirrors, tests).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Authenticate catalog requests; empty tokens are ignored.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Release listing endpoint.
    pub fn releases_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.api_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

/// A remote source that can list available releases.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch the releases in whatever order the source returns them.
    async fn fetch_releases(&self) -> Result<Vec<Release>, CatalogError>;
}

/// Lists releases through the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubCatalog {
    client: Client,
    config: CatalogConfig,
}

impl GithubCatalog {
    pub fn new(client: Client, config: CatalogConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

#[async_trait]
impl ReleaseSource for GithubCatalog {
    async fn fetch_releases(&self) -> Result<Vec<Release>, CatalogError> {
        let url = self.config.releases_url();
        tracing::debug!(%url, "listing releases");

        let mut request = self
            .client
            .get(&url)
            .query(&[("per_page", "100")])
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status { status, url });
        }

        Ok(response.json().await?)
    }
}

/// A fixed listing, e.g. a snapshot fetched earlier.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    releases: Vec<Release>,
}

impl StaticCatalog {
    pub fn new(releases: Vec<Release>) -> Self {
        Self { releases }
    }
}

#[async_trait]
impl ReleaseSource for StaticCatalog {
    async fn fetch_releases(&self) -> Result<Vec<Release>, CatalogError> {
        Ok(self.releases.clone())
    }
}

/// Fetch all releases, most recently created first.
pub async fn list_releases<S: ReleaseSource + ?Sized>(
    source: &S,
    reporter: &dyn Reporter,
) -> Result<Vec<Release>, CatalogError> {
    reporter.debug("Fetching releases from GitHub");
    let mut releases = source.fetch_releases().await?;
    reporter.debug(&format!("Found {} releases", releases.len()));

    releases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(releases)
}

/// Translate user-facing aliases to catalog tags (`git` -> `latest`).
pub fn normalize_version(token: &str) -> &str {
    if token == GIT_VERSION {
        LATEST_TAG
    } else {
        token
    }
}

/// Resolve a version token to one release.
///
/// An empty token picks the newest release, skipping the rolling `latest`
/// release if it is the newest. Otherwise the newest release whose tag starts
/// with the token wins.
pub async fn resolve_version<S: ReleaseSource + ?Sized>(
    source: &S,
    token: &str,
    reporter: &dyn Reporter,
) -> Result<Release, CatalogError> {
    let token = normalize_version(token);
    let releases = list_releases(source, reporter).await?;

    if token.is_empty() {
        reporter.debug("Getting most recent release");
    } else {
        reporter.debug(&format!("Searching for releases tagged with version: {token}"));
    }

    let release = find_release(releases, token)?;
    match release.published_at {
        Some(at) => reporter.debug(&format!("Found {} published at {at}", release.html_url)),
        None => reporter.debug(&format!("Found {} (unpublished)", release.html_url)),
    }
    Ok(release)
}

/// Pick a release from a newest-first listing.
pub fn find_release(releases: Vec<Release>, token: &str) -> Result<Release, CatalogError> {
    let mut releases = releases.into_iter();

    if token.is_empty() {
        let newest = releases.next().ok_or(CatalogError::NoReleases)?;
        if !newest.is_rolling() {
            return Ok(newest);
        }
        return releases.next().ok_or(CatalogError::NoReleases);
    }

    releases
        .find(|r| r.tag.starts_with(token))
        .ok_or_else(|| CatalogError::ReleaseNotFound(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullReporter;
    use chrono::{TimeZone, Utc};
    use mockito::Server;

    fn release(tag: &str, day: u32) -> Release {
        Release {
            tag: tag.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            published_at: None,
            html_url: format!("https://github.com/extism/extism/releases/tag/{tag}"),
            assets: Vec::new(),
        }
    }

    fn tags(releases: &[Release]) -> Vec<&str> {
        releases.iter().map(|r| r.tag.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_releases_sorted_newest_first() {
        let source = StaticCatalog::new(vec![
            release("v1.0.0", 1),
            release("v1.2.0", 20),
            release("latest", 25),
            release("v1.1.0", 10),
        ]);

        let releases = list_releases(&source, &NullReporter).await.unwrap();
        assert_eq!(tags(&releases), ["latest", "v1.2.0", "v1.1.0", "v1.0.0"]);
        assert!(
            releases
                .windows(2)
                .all(|w| w[0].created_at > w[1].created_at)
        );
    }

    #[tokio::test]
    async fn test_empty_token_skips_rolling_release() {
        let source = StaticCatalog::new(vec![
            release("v1.1.0", 10),
            release("latest", 25),
            release("v1.2.0", 20),
        ]);

        let rel = resolve_version(&source, "", &NullReporter).await.unwrap();
        assert_eq!(rel.tag, "v1.2.0");
    }

    #[tokio::test]
    async fn test_empty_token_takes_newest_tagged_release() {
        let source = StaticCatalog::new(vec![release("latest", 1), release("v1.2.0", 20)]);

        let rel = resolve_version(&source, "", &NullReporter).await.unwrap();
        assert_eq!(rel.tag, "v1.2.0");
    }

    #[tokio::test]
    async fn test_git_is_an_alias_for_latest() {
        let source = StaticCatalog::new(vec![
            release("v1.2.0", 20),
            release("latest", 25),
        ]);

        let git = resolve_version(&source, "git", &NullReporter).await.unwrap();
        let latest = resolve_version(&source, "latest", &NullReporter)
            .await
            .unwrap();
        assert_eq!(git, latest);
        assert_eq!(git.tag, "latest");
    }

    #[tokio::test]
    async fn test_prefix_match_prefers_newest() {
        let source = StaticCatalog::new(vec![
            release("v1.2.0", 20),
            release("v1.2.1", 21),
            release("v1.3.0", 22),
        ]);

        let rel = resolve_version(&source, "v1.2", &NullReporter).await.unwrap();
        assert_eq!(rel.tag, "v1.2.1");
    }

    #[tokio::test]
    async fn test_unknown_tag_is_not_found() {
        let source = StaticCatalog::new(vec![release("v1.2.0", 20)]);

        let err = resolve_version(&source, "v9", &NullReporter)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ReleaseNotFound(ref t) if t == "v9"));
        assert_eq!(err.to_string(), "unable to find release v9");
    }

    #[test]
    fn test_empty_catalog() {
        assert!(matches!(
            find_release(Vec::new(), ""),
            Err(CatalogError::NoReleases)
        ));
        assert!(matches!(
            find_release(vec![release("latest", 1)], ""),
            Err(CatalogError::NoReleases)
        ));
    }

    #[test]
    fn test_normalize_version() {
        assert_eq!(normalize_version("git"), "latest");
        assert_eq!(normalize_version("v1.0.0"), "v1.0.0");
        assert_eq!(normalize_version(""), "");
    }

    #[test]
    fn test_releases_url() {
        let config = CatalogConfig::default().with_api_url("http://localhost:1234/");
        assert_eq!(
            config.releases_url(),
            "http://localhost:1234/repos/extism/extism/releases"
        );
        assert_eq!(CatalogConfig::default().with_token(Some(String::new())).token, None);
    }

    #[tokio::test]
    async fn test_github_catalog_fetch() {
        let mut server = Server::new_async().await;

        let body = r#"[
            {
                "tag_name": "v1.0.0",
                "created_at": "2024-01-01T00:00:00Z",
                "assets": []
            },
            {
                "tag_name": "v1.1.0",
                "created_at": "2024-02-01T00:00:00Z",
                "published_at": "2024-02-01T01:00:00Z",
                "html_url": "https://github.com/extism/extism/releases/tag/v1.1.0",
                "assets": [
                    {
                        "name": "libextism-x86_64-unknown-linux-gnu-v1.1.0.tar.gz",
                        "browser_download_url": "https://example.com/linux.tar.gz"
                    }
                ]
            }
        ]"#;

        let _m = server
            .mock("GET", "/repos/extism/extism/releases")
            .match_query(mockito::Matcher::UrlEncoded(
                "per_page".into(),
                "100".into(),
            ))
            .match_header("authorization", "Bearer s3cret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let config = CatalogConfig::default()
            .with_api_url(server.url())
            .with_token(Some("s3cret".to_string()));
        let catalog = GithubCatalog::new(Client::new(), config);

        let releases = list_releases(&catalog, &NullReporter).await.unwrap();
        assert_eq!(tags(&releases), ["v1.1.0", "v1.0.0"]);
        assert_eq!(releases[0].assets.len(), 1);
    }

    #[tokio::test]
    async fn test_github_catalog_auth_failure() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/repos/extism/extism/releases")
            .match_query(mockito::Matcher::Any)
            .with_status(401)
            .with_body(r#"{"message": "Bad credentials"}"#)
            .create_async()
            .await;

        let catalog = GithubCatalog::new(
            Client::new(),
            CatalogConfig::default().with_api_url(server.url()),
        );

        let err = catalog.fetch_releases().await.unwrap_err();
        assert!(
            matches!(err, CatalogError::Status { status, .. } if status == StatusCode::UNAUTHORIZED)
        );
    }
}
