//! Compares a repository's latest release against its branch tip.
use log::*;

use crate::{
    forge::{
        traits::Forge,
        types::{ComparisonCommit, Release},
    },
    result::Result,
};

/// Result of comparing one repository's latest release against the tip
/// of its target branch. Ephemeral, consumed by the orchestrator.
#[derive(Debug)]
pub struct ComparisonOutcome {
    /// Latest published release, or `None` when the repository has
    /// never been released.
    pub latest: Option<Release>,
    /// Commits on the branch tip not included in the latest release.
    pub ahead_count: u64,
    /// The intervening commits, newest first as returned by the API.
    pub commits: Vec<ComparisonCommit>,
}

impl ComparisonOutcome {
    /// A repository needs a release when its branch has moved past the
    /// latest tag, or when it has never been released at all.
    pub fn needs_release(&self) -> bool {
        self.latest.is_none() || self.ahead_count > 0
    }
}

/// Fetch the latest release and diff its tag against the branch tip.
pub async fn compare_repo(
    forge: &dyn Forge,
    owner: &str,
    repo: &str,
) -> Result<ComparisonOutcome> {
    let latest = forge.get_latest_release(owner, repo).await?;

    let Some(latest) = latest else {
        info!("{owner}/{repo} has never been released: needs a first release");
        return Ok(ComparisonOutcome {
            latest: None,
            ahead_count: 0,
            commits: vec![],
        });
    };

    debug!("tag_name: {}", latest.tag_name);
    debug!("target_commitish: {}", latest.target_commitish);

    let comparison = forge
        .compare(owner, repo, &latest.tag_name, &latest.target_commitish)
        .await?;

    Ok(ComparisonOutcome {
        ahead_count: comparison.total_commits,
        commits: comparison.commits,
        latest: Some(latest),
    })
}
