//! Typed error variants for release-roundup.

use thiserror::Error;

/// Main error type for release-roundup operations.
#[derive(Error, Debug)]
pub enum RoundupError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "GitHub token not specified in URL or in {0}. Embed it in the API \
         URL (https://TOKEN@host/...) or add a GIT_OAUTH_TOKEN=<token> line \
         to the file"
    )]
    MissingToken(String),

    // API errors: any non-2xx response aborts the run
    #[error("API request failed ({status}) for {url}: {body}")]
    Api {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    // Parse errors
    #[error("Failed to detect host and repo path from url: {0}")]
    UnexpectedUrlShape(String),

    #[error("Failed to detect asset endpoint from upload_url: {0}")]
    UnexpectedUploadUrl(String),

    // Input validation
    #[error("Operator abandoned {0} entry")]
    InputAbandoned(String),

    #[error("Editor exited with non-zero status: {0}")]
    EditorFailed(String),
}
