//! Configuration for the forge API connection.
use secrecy::SecretString;

/// Remote API connection configuration.
///
/// `api_url` is the REST base URL, e.g. `https://api.github.com` for
/// the public service or `https://github.example.com/api/v3` for an
/// enterprise-hosted instance. Any embedded credentials have already
/// been stripped by the CLI layer.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// REST API base URL without trailing slash.
    pub api_url: String,
    /// OAuth token used for every API call.
    pub token: SecretString,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: "".to_string(),
            token: SecretString::from("".to_string()),
        }
    }
}
