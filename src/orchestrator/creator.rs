//! Interactive release creation: gathers tag, title, and body from the
//! operator and posts the new release.
use log::*;
use regex::Regex;
use std::{collections::BTreeMap, sync::LazyLock};

use crate::{
    forge::{
        traits::Forge,
        types::{ComparisonCommit, CreateReleaseRequest, Release},
    },
    orchestrator::TrackedRelease,
    prompt::Prompt,
    result::Result,
};

/// Release tags must look like `vMAJOR.MINOR.PATCH` with an optional
/// suffix, e.g. `v1.2.3` or `v1.2.3-rc1`.
pub static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+\.\d+\.\d+(-.+)?$").unwrap());

/// Seed text for a member repository's release body: the previous body
/// followed by one changelog entry per intervening commit.
pub fn repo_body_seed(
    previous_body: &str,
    commits: &[ComparisonCommit],
) -> String {
    let mut seed = format!(
        "Specify body of new release. Previous release's body below:\n\n\
         {previous_body}\n\n\n"
    );

    seed.push_str(
        "To help you formulate the release body, the list of behind \
         commit messages are provided below:\n\n",
    );

    for commit in commits {
        seed.push_str(&format!("sha: {}\n", commit.sha));
        seed.push_str(&format!("html_url: {}\n", commit.html_url));
        seed.push_str(&format!("message:\n\n  {}\n\n", commit.commit.message));
    }

    seed
}

/// Seed text for the framework release body: a heading and body for
/// every member record flagged as updating the framework.
pub fn framework_body_seed(
    tracked: &BTreeMap<String, TrackedRelease>,
) -> String {
    let mut seed = String::from(
        "To help you formulate the release body, links to updated repo \
         releases are listed below:\n\nBug fixes and enhancement:\n\n",
    );

    for (name, record) in tracked {
        if !record.updates_framework {
            continue;
        }

        seed.push_str(&format!(
            "# {}[{}] ({}):\n",
            name, record.release.tag_name, record.release.html_url
        ));
        seed.push_str(&format!("{}\n", record.release.body));
    }

    seed
}

/// Prompt the operator for tag, title, and body, then post the release.
///
/// The new release is non-draft, non-prerelease, and targets the same
/// branch reference as the previous release (or the default branch for
/// a first release).
pub async fn create_release(
    forge: &dyn Forge,
    prompt: &dyn Prompt,
    owner: &str,
    repo: &str,
    target_commitish: &str,
    previous_name: &str,
    body_seed: &str,
) -> Result<Release> {
    let tag_prompt =
        format!("Enter the tag_name for the new {repo} release: ");
    let tag_name = prompt.input(&tag_prompt, "tag_name", Some(&*TAG_RE))?;
    info!("tag_name: {tag_name}");

    let name_prompt = format!(
        "Name of previous release was \"{previous_name}\".\n\
         Enter the name for the new release: "
    );
    let name = prompt.input(&name_prompt, "release name", None)?;
    info!("name: {name}");

    let body = prompt.edit(body_seed, "release body")?;

    let req = CreateReleaseRequest {
        tag_name,
        target_commitish: target_commitish.to_string(),
        name,
        body,
        draft: false,
        prerelease: false,
    };

    let release = forge.create_release(owner, repo, req).await?;

    info!(
        "created release {} for {}/{}",
        release.tag_name, owner, repo
    );

    Ok(release)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::types::CommitDetail;

    fn commit(sha: &str, message: &str) -> ComparisonCommit {
        ComparisonCommit {
            sha: sha.into(),
            html_url: format!("https://github.com/org/repo/commit/{sha}"),
            commit: CommitDetail {
                message: message.into(),
            },
        }
    }

    #[test]
    fn tag_pattern_accepts_semver_style_tags() {
        assert!(TAG_RE.is_match("v1.2.3"));
        assert!(TAG_RE.is_match("v1.2.3-rc1"));
        assert!(TAG_RE.is_match("v10.0.22"));
    }

    #[test]
    fn tag_pattern_rejects_malformed_tags() {
        assert!(!TAG_RE.is_match("1.2.3"));
        assert!(!TAG_RE.is_match("v1.2"));
        assert!(!TAG_RE.is_match("release-1.2.3"));
        assert!(!TAG_RE.is_match("va.b.c"));
    }

    #[test]
    fn repo_seed_lists_every_commit() {
        let commits = vec![
            commit("abc123", "fix: leak in worker"),
            commit("def456", "feat: add queue drain"),
        ];

        let seed = repo_body_seed("previous body text", &commits);

        assert!(seed.contains("previous body text"));
        assert!(seed.contains("sha: abc123"));
        assert!(seed.contains("fix: leak in worker"));
        assert!(seed.contains("sha: def456"));
        assert!(
            seed.contains("https://github.com/org/repo/commit/def456")
        );
    }

    #[test]
    fn framework_seed_includes_only_flagged_records() {
        let release = |tag: &str, body: &str| Release {
            tag_name: tag.into(),
            target_commitish: "main".into(),
            name: tag.into(),
            body: body.into(),
            html_url: format!(
                "https://github.com/org/repo/releases/tag/{tag}"
            ),
            upload_url: "".into(),
            draft: false,
            prerelease: false,
        };

        let mut tracked = BTreeMap::new();
        tracked.insert(
            "updated-repo".to_string(),
            TrackedRelease {
                release: release("v2.0.0", "new things"),
                updates_framework: true,
            },
        );
        tracked.insert(
            "stale-repo".to_string(),
            TrackedRelease {
                release: release("v1.0.0", "old things"),
                updates_framework: false,
            },
        );

        let seed = framework_body_seed(&tracked);

        assert!(seed.contains("# updated-repo[v2.0.0]"));
        assert!(seed.contains("new things"));
        assert!(!seed.contains("stale-repo"));
        assert!(!seed.contains("old things"));
    }
}
