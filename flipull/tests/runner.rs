mod common;

use common::{FakeHost, Operation};
use flipull::{
    Edit, ProcessingResult, ReplaceJob, RunOutcome, Runner, RunnerConfig, RunnerError,
    DEFAULT_DESCRIPTION_FORMAT,
};
use std::time::Duration;

fn version_bump(title: &str) -> Edit {
    Edit {
        path: "VERSION".to_string(),
        find: "1.2.3".to_string(),
        replace: "1.2.4".to_string(),
        limit: -1,
        title: title.to_string(),
        description: DEFAULT_DESCRIPTION_FORMAT.to_string(),
    }
}

fn config(repositories: &[&str]) -> RunnerConfig {
    RunnerConfig::new(
        "token".to_string(),
        repositories.iter().map(ToString::to_string).collect(),
        version_bump("Bump version"),
    )
}

#[tokio::test]
async fn processes_each_repository_independently() {
    let host = FakeHost::new()
        .with_file("acme/widgets", "VERSION", "1.2.3")
        .with_file("acme/gadgets", "VERSION", "2.0.0");
    let config = config(&["acme/widgets", "acme/gadgets", "not-a-descriptor"]);

    let summary = Runner::with_host(config, host.clone()).run().await.unwrap();

    assert_eq!(summary.repositories_processed, 3);
    assert_eq!(summary.prs_created, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.failed, 1);
    assert!(summary.has_failures());

    let repositories: Vec<&str> = summary.results.iter().map(|r| r.repository()).collect();
    assert_eq!(
        repositories,
        vec!["acme/widgets", "acme/gadgets", "not-a-descriptor"]
    );
    assert!(matches!(
        &summary.results[2],
        ProcessingResult::Failed { error, .. } if error.contains("not-a-descriptor")
    ));

    assert!(host.calls_for("acme/gadgets").iter().all(|c| !c.is_mutation()));
}

#[tokio::test]
async fn repositories_get_distinct_target_branches() {
    let host = FakeHost::new()
        .with_file("acme/widgets", "VERSION", "1.2.3")
        .with_file("acme/gadgets", "VERSION", "1.2.3");
    let config = config(&["acme/widgets", "acme/gadgets"]).with_concurrency(1);

    let summary = Runner::with_host(config, host).run().await.unwrap();

    let branches: Vec<&str> = summary
        .results
        .iter()
        .filter_map(|result| match result {
            ProcessingResult::Completed {
                outcome: RunOutcome::Published(change),
                ..
            } => Some(change.branch.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(branches.len(), 2);
    assert_ne!(branches[0], branches[1]);
}

#[tokio::test]
async fn dry_run_previews_without_mutating() {
    let host = FakeHost::new().with_file("acme/widgets", "VERSION", "version = 1.2.3");
    let config = config(&["acme/widgets"]).with_dry_run(true);

    let summary = Runner::with_host(config, host.clone()).run().await.unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.previews, 1);
    assert!(matches!(
        &summary.results[0],
        ProcessingResult::Completed {
            outcome: RunOutcome::Preview { content },
            ..
        } if content == "version = 1.2.4"
    ));
    assert!(host.mutations().is_empty());
}

#[tokio::test]
async fn renders_title_per_repository() {
    let host = FakeHost::new()
        .with_file("acme/widgets", "VERSION", "1.2.3")
        .with_file("acme/gadgets", "VERSION", "1.2.3");
    let config = RunnerConfig::new(
        "token".to_string(),
        vec!["acme/widgets".to_string(), "acme/gadgets@develop".to_string()],
        version_bump("Bump {{repo}} on {{base_branch}}"),
    );

    Runner::with_host(config, host.clone()).run().await.unwrap();

    let titles: Vec<String> = host
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            common::Call::CreatePullRequest { title, .. } => Some(title),
            _ => None,
        })
        .collect();
    assert!(titles.contains(&"Bump widgets on main".to_string()));
    assert!(titles.contains(&"Bump gadgets on develop".to_string()));
}

#[tokio::test]
async fn unknown_template_variable_fails_repository() {
    let host = FakeHost::new().with_file("acme/widgets", "VERSION", "1.2.3");
    let config = RunnerConfig::new(
        "token".to_string(),
        vec!["acme/widgets".to_string()],
        version_bump("Bump {{nonexistent}}"),
    );

    let summary = Runner::with_host(config, host.clone()).run().await.unwrap();

    assert_eq!(summary.failed, 1);
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn deadline_fails_slow_repository() {
    let host = FakeHost::new()
        .with_file("acme/widgets", "VERSION", "1.2.3")
        .with_delay(Duration::from_millis(200));
    let config = config(&["acme/widgets"]).with_timeout(Some(Duration::from_millis(20)));

    let summary = Runner::with_host(config, host.clone()).run().await.unwrap();

    assert_eq!(summary.failed, 1);
    assert!(matches!(
        &summary.results[0],
        ProcessingResult::Failed { error, .. } if error.contains("deadline")
    ));
    assert!(host.mutations().is_empty());
}

#[tokio::test]
async fn all_unchanged_is_reported() {
    let host = FakeHost::new().with_file("acme/widgets", "VERSION", "9.9.9");
    let config = config(&["acme/widgets"]);

    let summary = Runner::with_host(config, host).run().await.unwrap();

    assert!(summary.all_unchanged());
    assert!(!summary.has_failures());
}

#[tokio::test]
async fn empty_repository_list_is_rejected() {
    let config = config(&[]);

    let result = Runner::with_host(config, FakeHost::new()).run().await;

    assert!(matches!(result, Err(RunnerError::NoRepositories)));
}

#[tokio::test]
async fn job_can_skip_pull_requests() {
    let job: ReplaceJob = toml::from_str(
        r#"
            repositories = ["acme/widgets"]
            path = "VERSION"
            find = "1.2.3"
            replace = "1.2.4"
            skip-pull-request = true
        "#,
    )
    .unwrap();
    let host = FakeHost::new().with_file("acme/widgets", "VERSION", "1.2.3");
    let config = RunnerConfig::from_job("token".to_string(), &job);

    let summary = Runner::with_host(config, host.clone()).run().await.unwrap();

    assert_eq!(summary.published_without_pr, 1);
    assert!(!host.operations().contains(&Operation::CreatePullRequest));
}
