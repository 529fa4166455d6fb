//! CLI argument parsing and credential resolution.
use clap::{Parser, Subcommand};
use regex::Regex;
use secrecy::SecretString;
use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};
use url::Url;

use crate::{
    error::RoundupError, forge::config::RemoteConfig, result::Result,
};

/// Per-user dotfile holding the fallback OAuth token.
pub const TOKEN_FILE: &str = ".git_oauth_token";

/// Matches the token line in the dotfile: `GIT_OAUTH_TOKEN=<value>`.
static TOKEN_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^GIT_OAUTH_TOKEN\s*=\s*(\S+)\s*$").unwrap()
});

/// Matches URLs carrying embedded `token@host` credentials.
static URL_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+://)[^@/]+@(.+)$").unwrap());

/// Global CLI arguments for registry selection and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, global = true)]
    /// Path to an alternate repository registry (TOML). Defaults to the
    /// built-in framework registry.
    pub registry: Option<PathBuf>,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Release operation subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report which tracked repositories have commits beyond their
    /// latest release, without creating anything.
    Check {
        /// GitHub API base URL, e.g. https://api.github.com or
        /// https://github.example.com/api/v3. May embed a token as
        /// https://TOKEN@host/api/v3.
        api_url: String,
    },

    /// Create new releases for outdated repositories and bundle their
    /// tarballs into a new framework release.
    Release {
        /// GitHub API base URL, e.g. https://api.github.com or
        /// https://github.example.com/api/v3. May embed a token as
        /// https://TOKEN@host/api/v3.
        api_url: String,

        #[arg(short, long, default_value_t = false)]
        /// Force creation of a new framework release even when no
        /// member repository changed.
        force: bool,
    },
}

impl Args {
    /// The API base URL given on the command line, credentials and all.
    pub fn raw_api_url(&self) -> &str {
        match &self.command {
            Command::Check { api_url } => api_url,
            Command::Release { api_url, .. } => api_url,
        }
    }

    /// Resolve the remote API connection from the URL and, when the URL
    /// carries no credentials, the per-user token dotfile.
    pub fn remote_config(&self) -> Result<RemoteConfig> {
        let dotfile = dirs::home_dir()
            .ok_or_else(|| {
                RoundupError::InvalidConfig(
                    "unable to determine home directory".into(),
                )
            })?
            .join(TOKEN_FILE);

        resolve_remote(self.raw_api_url(), &dotfile)
    }
}

/// Replace any embedded URL credentials with a fixed mask for logging.
pub fn mask_token(url: &str) -> String {
    URL_TOKEN_RE.replace(url, "${1}xxxxxxxx@${2}").to_string()
}

/// Split an API URL into its token (if embedded) and credential-free
/// base URL, falling back to `dotfile` for the token.
fn resolve_remote(raw_url: &str, dotfile: &Path) -> Result<RemoteConfig> {
    let parsed = Url::parse(raw_url)?;
    let userinfo = parsed.username().to_string();

    let mut stripped = parsed;

    stripped.set_username("").map_err(|_| {
        RoundupError::InvalidConfig(format!(
            "cannot strip credentials from url: {}",
            mask_token(raw_url)
        ))
    })?;

    stripped.set_password(None).map_err(|_| {
        RoundupError::InvalidConfig(format!(
            "cannot strip credentials from url: {}",
            mask_token(raw_url)
        ))
    })?;

    // Url renders bare hosts with a trailing slash; endpoints are
    // joined with explicit slashes downstream
    let api_url = stripped.to_string().trim_end_matches('/').to_string();

    let token = if userinfo.is_empty() {
        token_from_dotfile(dotfile)?
    } else {
        SecretString::from(userinfo)
    };

    Ok(RemoteConfig { api_url, token })
}

/// Read the `GIT_OAUTH_TOKEN=<value>` line from the dotfile.
fn token_from_dotfile(path: &Path) -> Result<SecretString> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(RoundupError::MissingToken(display).into());
    }

    let content = std::fs::read_to_string(path)?;

    let caps = TOKEN_LINE_RE
        .captures(&content)
        .ok_or(RoundupError::MissingToken(display))?;

    Ok(SecretString::from(caps[1].to_string()))
}
