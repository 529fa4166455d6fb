//! Implements the Forge trait for the GitHub REST API.
//!
//! Works against both the public service (`https://api.github.com`) and
//! enterprise-hosted instances (`https://{host}/api/v3`); the endpoints
//! used here have the same shape on both.
use async_trait::async_trait;
use log::*;
use reqwest::{StatusCode, header};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use crate::{
    error::RoundupError,
    forge::{
        config::RemoteConfig,
        traits::Forge,
        types::{Asset, Comparison, CreateReleaseRequest, Release},
    },
    result::Result,
};

const USER_AGENT: &str =
    concat!("release-roundup/", env!("CARGO_PKG_VERSION"));

/// Minimal repository metadata, read for the default branch only.
#[derive(Debug, serde::Deserialize)]
struct RepoInfo {
    default_branch: String,
}

/// GitHub forge implementation using reqwest with token authentication.
pub struct Github {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl Github {
    /// Create a GitHub client for the configured API base URL.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { config, client })
    }

    fn auth_header(&self) -> String {
        format!("token {}", self.config.token.expose_secret())
    }

    /// Fail on any non-2xx status, logging the response body first.
    async fn error_for_status(
        url: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!("error response from {url}: {body}");

        Err(RoundupError::Api {
            status,
            url: url.to_string(),
            body,
        }
        .into())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        let response = Self::error_for_status(url, response).await?;

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl Forge for Github {
    async fn get_latest_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<Release>> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.config.api_url, owner, repo
        );

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        // a repo with no releases yet is not an error: the orchestrator
        // treats it as needing a first release
        if response.status() == StatusCode::NOT_FOUND {
            info!("no releases found for {owner}/{repo}");
            return Ok(None);
        }

        let response = Self::error_for_status(&url, response).await?;

        Ok(Some(response.json::<Release>().await?))
    }

    async fn get_default_branch(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<String> {
        let url =
            format!("{}/repos/{}/{}", self.config.api_url, owner, repo);

        let repo_info: RepoInfo = self.get_json(&url).await?;

        Ok(repo_info.default_branch)
    }

    async fn compare(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Comparison> {
        let url = format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.config.api_url, owner, repo, base, head
        );

        self.get_json(&url).await
    }

    async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        req: CreateReleaseRequest,
    ) -> Result<Release> {
        let url = format!(
            "{}/repos/{}/{}/releases",
            self.config.api_url, owner, repo
        );

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.auth_header())
            .json(&req)
            .send()
            .await?;

        let response = Self::error_for_status(&url, response).await?;

        Ok(response.json::<Release>().await?)
    }

    async fn download_archive(&self, url: &str, dest: &Path) -> Result<()> {
        info!("downloading {url}");

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        let mut response = Self::error_for_status(url, response).await?;

        let mut file = tokio::fs::File::create(dest).await?;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }

        file.flush().await?;

        Ok(())
    }

    async fn upload_asset(
        &self,
        upload_url: &str,
        name: &str,
        file: &Path,
    ) -> Result<Asset> {
        let url = format!("{upload_url}?name={name}");

        let contents = tokio::fs::read(file).await?;

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.auth_header())
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(contents)
            .send()
            .await?;

        let response = Self::error_for_status(&url, response).await?;

        Ok(response.json::<Asset>().await?)
    }
}
