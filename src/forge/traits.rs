//! Traits related to the remote git forge.
use async_trait::async_trait;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::{
    forge::types::{Asset, Comparison, CreateReleaseRequest, Release},
    result::Result,
};

/// Operations the release workflow needs from the hosting service.
///
/// One implementation talks to the GitHub REST API; tests substitute a
/// generated mock so the orchestrator can run without network access.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    /// Fetch the latest published release, or `None` when the
    /// repository has never had a release.
    async fn get_latest_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<Release>>;

    /// Fetch the repository's default branch name.
    async fn get_default_branch(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<String>;

    /// Compare `base...head` and report how far head is ahead.
    async fn compare(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Comparison>;

    /// Publish a new release.
    async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        req: CreateReleaseRequest,
    ) -> Result<Release>;

    /// Stream a source archive to `dest` on the local filesystem.
    async fn download_archive(&self, url: &str, dest: &Path) -> Result<()>;

    /// Upload a local file as a binary asset on a release.
    async fn upload_asset(
        &self,
        upload_url: &str,
        name: &str,
        file: &Path,
    ) -> Result<Asset>;
}
