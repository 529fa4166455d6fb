//! Downloads member release tarballs and re-uploads them as framework
//! release assets.
use log::*;
use regex::Regex;
use std::{path::Path, sync::LazyLock};

use crate::{
    error::RoundupError,
    forge::{traits::Forge, types::Release},
    result::Result,
};

/// Web host of the public hosting service. Archive endpoints differ in
/// shape between it and enterprise-hosted mirrors.
pub const PUBLIC_HOST: &str = "https://github.com";

/// Extracts `{scheme}://{host}`, owner, and repo from a release web URL.
static HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?://[^/]+)/([^/]+)/([^/]+)/.*$").unwrap()
});

/// Strips the URI-template suffix from a templated upload endpoint
/// (`.../assets{?name,label}`).
static UPLOAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+/assets)\{?.*$").unwrap());

/// Local artifact name for a repository's tarball snapshot.
pub fn asset_filename(repo: &str, tag: &str) -> String {
    format!("{repo}-{tag}.tar.gz")
}

/// Derive the source-archive download endpoint from a release web URL.
///
/// Uses the codeload endpoint rather than the API `tarball_url` so the
/// top-level directory inside the archive is named `{repo}-{tag}`
/// instead of carrying a commit-hash suffix.
pub fn derive_archive_url(html_url: &str, tag: &str) -> Result<String> {
    let caps = HOST_RE.captures(html_url).ok_or_else(|| {
        RoundupError::UnexpectedUrlShape(html_url.to_string())
    })?;

    let (base, owner, repo) = (&caps[1], &caps[2], &caps[3]);

    if base == PUBLIC_HOST {
        Ok(format!(
            "https://codeload.github.com/{owner}/{repo}/tar.gz/{tag}"
        ))
    } else {
        Ok(format!("{base}/_codeload/{owner}/{repo}/tar.gz/{tag}"))
    }
}

/// Extract the usable asset endpoint from a release's templated
/// `upload_url`.
pub fn trim_upload_url(upload_url: &str) -> Result<String> {
    let caps = UPLOAD_RE.captures(upload_url).ok_or_else(|| {
        RoundupError::UnexpectedUploadUrl(upload_url.to_string())
    })?;

    Ok(caps[1].to_string())
}

/// Download one member repository's tagged tarball and attach it to the
/// framework release, removing the local copy afterwards.
pub async fn attach_repo_asset(
    forge: &dyn Forge,
    workdir: &Path,
    framework_release: &Release,
    repo: &str,
    repo_release: &Release,
) -> Result<()> {
    let upload_url = trim_upload_url(&framework_release.upload_url)?;

    let archive_url =
        derive_archive_url(&repo_release.html_url, &repo_release.tag_name)?;

    let fname = asset_filename(repo, &repo_release.tag_name);
    let dest = workdir.join(&fname);

    forge.download_archive(&archive_url, &dest).await?;
    info!("downloaded {fname}");

    forge.upload_asset(&upload_url, &fname, &dest).await?;
    info!("uploaded {fname}");

    tokio::fs::remove_file(&dest).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_codeload_url_for_public_host() {
        let url = derive_archive_url(
            "https://github.com/hysds/grq2/releases/tag/v1.0.3",
            "v1.0.3",
        )
        .unwrap();

        assert_eq!(
            url,
            "https://codeload.github.com/hysds/grq2/tar.gz/v1.0.3"
        );
    }

    #[test]
    fn derives_mirror_url_for_enterprise_host() {
        let url = derive_archive_url(
            "https://github.example.gov/hysds/mozart/releases/tag/v2.1.0",
            "v2.1.0",
        )
        .unwrap();

        assert_eq!(
            url,
            "https://github.example.gov/_codeload/hysds/mozart/tar.gz/v2.1.0"
        );
    }

    #[test]
    fn rejects_release_url_without_repo_path() {
        let result = derive_archive_url("https://github.com/", "v1.0.0");
        assert!(result.is_err());
    }

    #[test]
    fn trims_templated_upload_url() {
        let url = trim_upload_url(
            "https://uploads.github.com/repos/hysds/hysds-framework/releases/1/assets{?name,label}",
        )
        .unwrap();

        assert_eq!(
            url,
            "https://uploads.github.com/repos/hysds/hysds-framework/releases/1/assets"
        );
    }

    #[test]
    fn rejects_upload_url_without_assets_segment() {
        let result =
            trim_upload_url("https://uploads.github.com/some/other/path");
        assert!(result.is_err());
    }

    #[test]
    fn names_asset_after_repo_and_tag() {
        assert_eq!(
            asset_filename("sciflo", "v1.2.3"),
            "sciflo-v1.2.3.tar.gz"
        );
    }
}
