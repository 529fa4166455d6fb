//! Drives the framework release workflow: per-repository comparison,
//! conditional release creation, and asset aggregation.
use log::*;
use std::{collections::BTreeMap, path::PathBuf};

use crate::{
    forge::{traits::Forge, types::Release},
    orchestrator::comparator::ComparisonOutcome,
    prompt::Prompt,
    registry::{Registry, RepoConfig},
    result::Result,
};

pub mod assets;
pub mod comparator;
pub mod creator;

#[cfg(test)]
mod tests;

/// One tracked repository's current release, plus whether it was
/// freshly created during this run and therefore motivates a new
/// framework release.
#[derive(Debug)]
pub struct TrackedRelease {
    pub release: Release,
    pub updates_framework: bool,
}

/// Single-pass workflow over the repository registry.
///
/// Repositories are processed sequentially in sorted name order. A
/// failure partway leaves already-created member releases intact; the
/// comparator treats them as up to date on re-run.
pub struct Orchestrator {
    registry: Registry,
    forge: Box<dyn Forge>,
    prompt: Box<dyn Prompt>,
    workdir: PathBuf,
}

impl Orchestrator {
    /// Create an orchestrator staging tarballs in the current working
    /// directory.
    pub fn new(
        registry: Registry,
        forge: Box<dyn Forge>,
        prompt: Box<dyn Prompt>,
    ) -> Self {
        Self::with_workdir(registry, forge, prompt, PathBuf::from("."))
    }

    /// Create an orchestrator staging tarballs in `workdir`.
    pub fn with_workdir(
        registry: Registry,
        forge: Box<dyn Forge>,
        prompt: Box<dyn Prompt>,
        workdir: PathBuf,
    ) -> Self {
        Self {
            registry,
            forge,
            prompt,
            workdir,
        }
    }

    /// Report each tracked repository's release status without creating
    /// anything.
    pub async fn check(&self) -> Result<()> {
        for (name, repo_cfg) in &self.registry.repos {
            info!("repo: {}/{}", repo_cfg.owner, name);

            let outcome = comparator::compare_repo(
                self.forge.as_ref(),
                &repo_cfg.owner,
                name,
            )
            .await?;

            self.log_outcome(name, &outcome);
        }

        Ok(())
    }

    /// Run the full release workflow: cut member releases where needed,
    /// then create the framework release and attach every member's
    /// tarball.
    pub async fn release(&self, force: bool) -> Result<()> {
        let mut tracked: BTreeMap<String, TrackedRelease> = BTreeMap::new();
        let mut framework_outdated = force;

        for (name, repo_cfg) in &self.registry.repos {
            info!("repo: {}/{}", repo_cfg.owner, name);

            let outcome = comparator::compare_repo(
                self.forge.as_ref(),
                &repo_cfg.owner,
                name,
            )
            .await?;

            self.log_outcome(name, &outcome);

            if !outcome.needs_release() {
                // needs_release() == false guarantees a latest release
                if let Some(latest) = outcome.latest {
                    tracked.insert(
                        name.clone(),
                        TrackedRelease {
                            release: latest,
                            updates_framework: false,
                        },
                    );
                }
                continue;
            }

            let release =
                self.create_repo_release(name, repo_cfg, &outcome).await?;

            tracked.insert(
                name.clone(),
                TrackedRelease {
                    release,
                    updates_framework: true,
                },
            );

            framework_outdated = true;
        }

        self.finish_framework_release(framework_outdated, &tracked).await
    }

    fn log_outcome(&self, name: &str, outcome: &ComparisonOutcome) {
        if let Some(latest) = &outcome.latest {
            info!(
                "commits since {}: {}",
                latest.tag_name, outcome.ahead_count
            );

            if outcome.ahead_count > 0 {
                info!(
                    "latest release of {}, {}, is outdated",
                    name, latest.tag_name
                );
            } else {
                info!(
                    "latest release of {}, {}, is up-to-date",
                    name, latest.tag_name
                );
            }
        }
    }

    /// Interactively create a release for one member repository.
    async fn create_repo_release(
        &self,
        name: &str,
        repo_cfg: &RepoConfig,
        outcome: &ComparisonOutcome,
    ) -> Result<Release> {
        // a first release has no previous metadata to carry over and
        // targets the default branch instead
        let (target, previous_name, previous_body) = match &outcome.latest {
            Some(latest) => (
                latest.target_commitish.clone(),
                latest.name.clone(),
                latest.body.clone(),
            ),
            None => (
                self.forge
                    .get_default_branch(&repo_cfg.owner, name)
                    .await?,
                String::new(),
                String::new(),
            ),
        };

        let seed = creator::repo_body_seed(&previous_body, &outcome.commits);

        creator::create_release(
            self.forge.as_ref(),
            self.prompt.as_ref(),
            &repo_cfg.owner,
            name,
            &target,
            &previous_name,
            &seed,
        )
        .await
    }

    /// Decide whether a framework release is warranted; if so, create
    /// it and attach one tarball per tracked repository.
    async fn finish_framework_release(
        &self,
        framework_outdated: bool,
        tracked: &BTreeMap<String, TrackedRelease>,
    ) -> Result<()> {
        let framework = &self.registry.framework;

        info!("repo: {}/{}", framework.owner, framework.name);

        let latest = self
            .forge
            .get_latest_release(&framework.owner, &framework.name)
            .await?;

        if !framework_outdated {
            info!(
                "not creating a new {} release: use --force to force one",
                framework.name
            );
            return Ok(());
        }

        info!("creating a new {} release", framework.name);

        let (target, previous_name) = match &latest {
            Some(latest) => {
                (latest.target_commitish.clone(), latest.name.clone())
            }
            None => (
                self.forge
                    .get_default_branch(&framework.owner, &framework.name)
                    .await?,
                String::new(),
            ),
        };

        let seed = creator::framework_body_seed(tracked);

        let framework_release = creator::create_release(
            self.forge.as_ref(),
            self.prompt.as_ref(),
            &framework.owner,
            &framework.name,
            &target,
            &previous_name,
            &seed,
        )
        .await?;

        for (name, record) in tracked {
            assets::attach_repo_asset(
                self.forge.as_ref(),
                &self.workdir,
                &framework_release,
                name,
                &record.release,
            )
            .await?;
        }

        Ok(())
    }
}
