//! Request and response types for the forge REST surface.
use serde::{Deserialize, Deserializer, Serialize};

/// The API returns JSON null for release names and bodies that were
/// never filled in; map those to the type's default instead of failing.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A published release as returned by the API.
///
/// Only the fields this tool reads are deserialized.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Release {
    pub tag_name: String,
    /// Branch or commit the release tag points at.
    pub target_commitish: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub body: String,
    /// Web URL of the release page, used to derive the source-archive
    /// download endpoint.
    pub html_url: String,
    /// Templated asset upload endpoint (`.../assets{?name,label}`).
    pub upload_url: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
}

/// Payload for `POST /repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateReleaseRequest {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

/// One commit from a compare response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ComparisonCommit {
    pub sha: String,
    pub html_url: String,
    pub commit: CommitDetail,
}

/// Nested commit detail inside a compare response entry.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CommitDetail {
    pub message: String,
}

/// Result of comparing a release tag against the branch tip.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Comparison {
    /// Number of commits the head is ahead of the base.
    pub total_commits: u64,
    #[serde(default)]
    pub commits: Vec<ComparisonCommit>,
}

/// An uploaded release asset.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Asset {
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub browser_download_url: String,
}
