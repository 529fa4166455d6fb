use super::common;
use crate::{forge::traits::MockForge, prompt::MockPrompt};

#[test_log::test(tokio::test)]
async fn check_reports_status_without_creating_anything() {
    let registry = common::registry("fw", &["outdated", "stale"]);

    let mut forge = MockForge::new();

    forge.expect_get_latest_release().times(2).returning(
        |owner, repo| Ok(Some(common::release(owner, repo, "v1.0.0"))),
    );

    forge.expect_compare().times(2).returning(|_, repo, _, _| {
        if repo == "outdated" {
            Ok(common::comparison(5))
        } else {
            Ok(common::comparison(0))
        }
    });

    // no create/download/upload expectations: any such call panics
    let (orchestrator, _tmp) =
        common::orchestrator(registry, forge, MockPrompt::new());

    orchestrator.check().await.unwrap();
}

#[test_log::test(tokio::test)]
async fn check_tolerates_never_released_repos() {
    let registry = common::registry("fw", &["fresh"]);

    let mut forge = MockForge::new();

    forge
        .expect_get_latest_release()
        .times(1)
        .returning(|_, _| Ok(None));

    // no compare call: there is no tag to compare against
    let (orchestrator, _tmp) =
        common::orchestrator(registry, forge, MockPrompt::new());

    orchestrator.check().await.unwrap();
}
