//! The repository registry: the fixed set of repositories tracked for
//! framework releases, plus the umbrella framework repository itself.
//!
//! The registry is loaded once at startup and never mutated. Member
//! repositories iterate in sorted name order so runs are deterministic
//! regardless of how the registry file was written.

use serde::Deserialize;
use std::{collections::BTreeMap, path::Path};

use crate::result::Result;

/// Registry shipped in the binary, used when no `--registry` file is
/// given. Mirrors the tracked repository set of the framework
/// distribution this tool was built for.
const DEFAULT_REGISTRY: &str = r#"
[framework]
name = "hysds-framework"
owner = "hysds"

[repos.container-builder]
owner = "hysds"

[repos.figaro]
owner = "hysds"

[repos.grq2]
owner = "hysds"

[repos.hysds]
owner = "hysds"

[repos.hysds-cloud-functions]
owner = "hysds"

[repos.hysds-dockerfiles]
owner = "hysds"

[repos.hysds_commons]
owner = "hysds"

[repos.lightweight-jobs]
owner = "hysds"

[repos.mozart]
owner = "hysds"

[repos.osaka]
owner = "hysds"

[repos.prov_es]
owner = "hysds"

[repos.s3-bucket-listing]
owner = "hysds"

[repos.sciflo]
owner = "hysds"

[repos.sdscli]
owner = "sdskit"

[repos.spyddder-man]
owner = "hysds"

[repos.tosca]
owner = "hysds"
"#;

/// A tracked member repository.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RepoConfig {
    /// Owning organization or user.
    pub owner: String,
}

/// The umbrella framework repository that aggregates member tarballs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FrameworkConfig {
    /// Repository name.
    pub name: String,
    /// Owning organization or user.
    pub owner: String,
}

/// Immutable table of tracked repositories keyed by name.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Registry {
    /// Umbrella framework repository.
    pub framework: FrameworkConfig,
    /// Member repositories. BTreeMap keeps iteration sorted by name.
    pub repos: BTreeMap<String, RepoConfig>,
}

impl Registry {
    /// Parse a registry from TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let registry: Registry = toml::from_str(content)?;
        Ok(registry)
    }

    /// Load a registry from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

impl Default for Registry {
    fn default() -> Self {
        // the embedded registry is known-valid TOML
        toml::from_str(DEFAULT_REGISTRY).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_parses() {
        let registry = Registry::default();
        assert_eq!(registry.framework.name, "hysds-framework");
        assert_eq!(registry.framework.owner, "hysds");
        assert_eq!(registry.repos.len(), 16);
        assert_eq!(registry.repos["sdscli"].owner, "sdskit");
    }

    #[test]
    fn repos_iterate_in_sorted_name_order() {
        let registry = Registry::from_toml(
            r#"
            [framework]
            name = "fw"
            owner = "org"

            [repos.zeta]
            owner = "org"

            [repos.alpha]
            owner = "org"

            [repos.mid]
            owner = "other"
            "#,
        )
        .unwrap();

        let names: Vec<&str> =
            registry.repos.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn missing_framework_section_is_an_error() {
        let result = Registry::from_toml("[repos.a]\nowner = \"org\"\n");
        assert!(result.is_err());
    }
}
