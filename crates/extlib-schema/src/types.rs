//! Release catalog snapshot types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published release and the archives attached to it.
///
/// Field names follow the GitHub releases API so a listing response can be
/// deserialized directly. A `Release` is never modified after it is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Tag the release was cut from (e.g. `v1.2.3`, or the rolling `latest`).
    #[serde(rename = "tag_name")]
    pub tag: String,
    /// Creation time, used to order the catalog.
    pub created_at: DateTime<Utc>,
    /// Publication time, if the release has been published.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Web page of the release.
    #[serde(default)]
    pub html_url: String,
    /// Downloadable files, in catalog order.
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A downloadable file attached to a [`Release`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// File name of the asset.
    pub name: String,
    /// Direct download URL.
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

impl Release {
    /// Whether this is the rolling release that tracks the main branch.
    pub fn is_rolling(&self) -> bool {
        self.tag == crate::LATEST_TAG
    }
}

impl Asset {
    /// Create an asset from its name and download URL.
    pub fn new(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            download_url: download_url.into(),
        }
    }
}
