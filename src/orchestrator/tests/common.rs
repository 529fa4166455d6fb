//! Common test utilities for orchestrator tests.
use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use crate::{
    forge::{
        traits::MockForge,
        types::{CommitDetail, Comparison, ComparisonCommit, Release},
    },
    orchestrator::Orchestrator,
    prompt::MockPrompt,
    registry::Registry,
};

/// Build a registry with the given framework repo and member repos,
/// all owned by `org`.
pub fn registry(framework: &str, repos: &[&str]) -> Registry {
    let mut toml = format!(
        "[framework]\nname = \"{framework}\"\nowner = \"org\"\n\n"
    );

    for repo in repos {
        toml.push_str(&format!("[repos.{repo}]\nowner = \"org\"\n\n"));
    }

    Registry::from_toml(&toml).unwrap()
}

/// A published release with realistic web and upload URLs.
pub fn release(owner: &str, repo: &str, tag: &str) -> Release {
    Release {
        tag_name: tag.into(),
        target_commitish: "main".into(),
        name: format!("{repo} {tag}"),
        body: format!("notes for {repo} {tag}"),
        html_url: format!(
            "https://github.com/{owner}/{repo}/releases/tag/{tag}"
        ),
        upload_url: format!(
            "https://uploads.github.com/repos/{owner}/{repo}/releases/1/assets{{?name,label}}"
        ),
        draft: false,
        prerelease: false,
    }
}

/// A compare response with `ahead` synthetic commits.
pub fn comparison(ahead: u64) -> Comparison {
    let commits = (0..ahead)
        .map(|i| ComparisonCommit {
            sha: format!("sha{i}"),
            html_url: format!(
                "https://github.com/org/repo/commit/sha{i}"
            ),
            commit: CommitDetail {
                message: format!("commit {i}"),
            },
        })
        .collect();

    Comparison {
        total_commits: ahead,
        commits,
    }
}

/// A prompt double that replays `inputs` in order for line prompts and
/// accepts every editor session unchanged.
pub fn scripted_prompt(inputs: &[&str]) -> MockPrompt {
    let queue: VecDeque<String> =
        inputs.iter().map(|s| s.to_string()).collect();
    let queue = Arc::new(Mutex::new(queue));

    let mut prompt = MockPrompt::new();

    prompt.expect_input().returning(move |_, _, _| {
        Ok(queue.lock().unwrap().pop_front().unwrap())
    });

    prompt.expect_edit().returning(|seed, _| Ok(seed.to_string()));

    prompt
}

/// An orchestrator over mocks, staging tarballs in a temp directory.
/// The returned TempDir must outlive the orchestrator run.
pub fn orchestrator(
    registry: Registry,
    forge: MockForge,
    prompt: MockPrompt,
) -> (Orchestrator, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();

    let orchestrator = Orchestrator::with_workdir(
        registry,
        Box::new(forge),
        Box::new(prompt),
        PathBuf::from(tmp.path()),
    );

    (orchestrator, tmp)
}
