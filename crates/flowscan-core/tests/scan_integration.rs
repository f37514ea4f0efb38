//! End-to-end scan tests over a local mock HTTP server

use std::borrow::Cow;

use assert_matches::assert_matches;
use flowscan_core::output::render_text;
use flowscan_core::{
    scan_org, DiagnosticCategory, DiagnosticSeverity, Error, ErrorKind, ScanConfig,
};

const ACCEPT: &str = "application/vnd.github.v3+json";

fn config_for<'a>(server: &mockito::ServerGuard, org: &'a str) -> ScanConfig<'a> {
    ScanConfig {
        org: Cow::Borrowed(org),
        token: Cow::Borrowed("t0k3n"),
        api_url: Some(Cow::Owned(server.url())),
        omit_pattern: None,
    }
}

fn repos_body(org: &str, names: &[&str]) -> String {
    let repos: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            format!(
                r#"{{"id": {}, "name": "{}", "full_name": "{}/{}", "owner": {{"login": "{}", "id": 1}}, "private": false}}"#,
                i + 1,
                name,
                org,
                name,
                org
            )
        })
        .collect();
    format!("[{}]", repos.join(","))
}

fn workflows_body(total_count: u32, names: &[&str]) -> String {
    let workflows: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            format!(
                r#"{{"id": {}, "name": "{}", "path": ".github/workflows/{}.yml", "state": "active"}}"#,
                i + 100,
                name,
                i
            )
        })
        .collect();
    format!(
        r#"{{"total_count": {}, "workflows": [{}]}}"#,
        total_count,
        workflows.join(",")
    )
}

#[tokio::test]
async fn test_scan_end_to_end_with_filter() {
    let mut server = mockito::Server::new_async().await;

    let repos = server
        .mock("GET", "/orgs/acme/repos")
        .match_header("authorization", "token t0k3n")
        .match_header("accept", ACCEPT)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(repos_body("acme", &["a", "b"]))
        .expect(1)
        .create_async()
        .await;

    let workflows_a = server
        .mock("GET", "/repos/acme/a/actions/workflows")
        .match_header("authorization", "token t0k3n")
        .match_header("accept", ACCEPT)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(workflows_body(2, &["CI", "Deploy-internal"]))
        .expect(1)
        .create_async()
        .await;

    let workflows_b = server
        .mock("GET", "/repos/acme/b/actions/workflows")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(workflows_body(0, &[]))
        .expect(1)
        .create_async()
        .await;

    let config = ScanConfig {
        omit_pattern: Some(Cow::Borrowed("Deploy.*")),
        ..config_for(&server, "acme")
    };

    let report = scan_org(&config).await.unwrap();

    repos.assert_async().await;
    workflows_a.assert_async().await;
    workflows_b.assert_async().await;

    assert_eq!(
        render_text(&report),
        "Repo: a has the following workflows:\n  - CI\nRepo: b has no workflows.\n"
    );
    assert!(report.diagnostics.is_empty());
    assert!(!report.has_soft_errors());
}

#[tokio::test]
async fn test_repo_list_failure_aborts_scan() {
    let mut server = mockito::Server::new_async().await;

    let repos = server
        .mock("GET", "/orgs/acme/repos")
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;

    // No workflow endpoint is ever hit.
    let workflows = server
        .mock(
            "GET",
            mockito::Matcher::Regex("/repos/.*/actions/workflows".to_string()),
        )
        .expect(0)
        .create_async()
        .await;

    let config = config_for(&server, "acme");
    let err = scan_org(&config).await.unwrap_err();

    repos.assert_async().await;
    workflows.assert_async().await;

    assert_matches!(err, Error::Status(_));
    assert!(err.message().contains("repos for org acme"));
    assert!(err.message().contains("500"));
}

#[tokio::test]
async fn test_workflow_failure_skips_repo_and_continues() {
    let mut server = mockito::Server::new_async().await;

    let _repos = server
        .mock("GET", "/orgs/acme/repos")
        .with_status(200)
        .with_body(repos_body("acme", &["alpha", "beta"]))
        .create_async()
        .await;

    let _workflows_alpha = server
        .mock("GET", "/repos/acme/alpha/actions/workflows")
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;

    let workflows_beta = server
        .mock("GET", "/repos/acme/beta/actions/workflows")
        .with_status(200)
        .with_body(workflows_body(1, &["CI"]))
        .expect(1)
        .create_async()
        .await;

    let config = config_for(&server, "acme");
    let report = scan_org(&config).await.unwrap();

    workflows_beta.assert_async().await;

    // The failed repository contributes no section, the next one does.
    assert_eq!(report.sections.len(), 1);
    assert_eq!(report.sections[0].repo, "beta");
    assert_eq!(report.sections[0].workflows, vec!["CI"]);

    assert_eq!(report.diagnostics.len(), 1);
    let diag = &report.diagnostics[0];
    assert_eq!(diag.severity, DiagnosticSeverity::SoftError);
    assert_eq!(diag.category, DiagnosticCategory::WorkflowFetch);
    assert!(diag.message.contains("alpha"));
    assert!(diag.message.contains("500"));

    assert!(report.has_soft_errors());
}

#[tokio::test]
async fn test_one_workflow_call_per_repo_in_order() {
    let mut server = mockito::Server::new_async().await;

    let _repos = server
        .mock("GET", "/orgs/acme/repos")
        .with_status(200)
        .with_body(repos_body("acme", &["r1", "r2", "r3"]))
        .create_async()
        .await;

    let mut workflow_mocks = Vec::new();
    for repo in ["r1", "r2", "r3"] {
        let mock = server
            .mock(
                "GET",
                format!("/repos/acme/{}/actions/workflows", repo).as_str(),
            )
            .with_status(200)
            .with_body(workflows_body(0, &[]))
            .expect(1)
            .create_async()
            .await;
        workflow_mocks.push(mock);
    }

    let config = config_for(&server, "acme");
    let report = scan_org(&config).await.unwrap();

    for mock in &workflow_mocks {
        mock.assert_async().await;
    }

    let order: Vec<&str> = report.sections.iter().map(|s| s.repo.as_str()).collect();
    assert_eq!(order, vec!["r1", "r2", "r3"]);
}

#[tokio::test]
async fn test_filter_applies_to_workflow_names_not_repos() {
    let mut server = mockito::Server::new_async().await;

    let _repos = server
        .mock("GET", "/orgs/acme/repos")
        .with_status(200)
        .with_body(repos_body("acme", &["Deploy-tools"]))
        .create_async()
        .await;

    let _workflows = server
        .mock("GET", "/repos/acme/Deploy-tools/actions/workflows")
        .with_status(200)
        .with_body(workflows_body(2, &["CI", "Deploy-prod"]))
        .create_async()
        .await;

    let config = ScanConfig {
        omit_pattern: Some(Cow::Borrowed("Deploy.*")),
        ..config_for(&server, "acme")
    };

    let report = scan_org(&config).await.unwrap();

    // The repository whose name matches the pattern is still reported,
    // only its matching workflow name is dropped.
    assert_eq!(report.sections.len(), 1);
    assert_eq!(report.sections[0].repo, "Deploy-tools");
    assert_eq!(report.sections[0].workflows, vec!["CI"]);
}

#[tokio::test]
async fn test_truncated_workflow_list_warns() {
    let mut server = mockito::Server::new_async().await;

    let _repos = server
        .mock("GET", "/orgs/acme/repos")
        .with_status(200)
        .with_body(repos_body("acme", &["big"]))
        .create_async()
        .await;

    let _workflows = server
        .mock("GET", "/repos/acme/big/actions/workflows")
        .with_status(200)
        .with_body(workflows_body(5, &["CI", "Release"]))
        .create_async()
        .await;

    let config = config_for(&server, "acme");
    let report = scan_org(&config).await.unwrap();

    assert_eq!(report.sections.len(), 1);
    assert_eq!(report.sections[0].total_count, 5);
    assert_eq!(report.sections[0].workflows.len(), 2);

    assert_eq!(report.diagnostics.len(), 1);
    let diag = &report.diagnostics[0];
    assert_eq!(diag.severity, DiagnosticSeverity::Warning);
    assert_eq!(diag.category, DiagnosticCategory::TruncatedList);
    assert!(diag.message.contains("big"));

    // A truncation warning alone is not a soft error.
    assert!(!report.has_soft_errors());
}

#[tokio::test]
async fn test_repo_list_decode_failure_is_fatal() {
    let mut server = mockito::Server::new_async().await;

    let _repos = server
        .mock("GET", "/orgs/acme/repos")
        .with_status(200)
        .with_body("{not json")
        .create_async()
        .await;

    let config = config_for(&server, "acme");
    let err = scan_org(&config).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_workflow_decode_failure_is_soft() {
    let mut server = mockito::Server::new_async().await;

    let _repos = server
        .mock("GET", "/orgs/acme/repos")
        .with_status(200)
        .with_body(repos_body("acme", &["broken", "fine"]))
        .create_async()
        .await;

    let _workflows_broken = server
        .mock("GET", "/repos/acme/broken/actions/workflows")
        .with_status(200)
        .with_body("<html>surprise</html>")
        .create_async()
        .await;

    let _workflows_fine = server
        .mock("GET", "/repos/acme/fine/actions/workflows")
        .with_status(200)
        .with_body(workflows_body(0, &[]))
        .create_async()
        .await;

    let config = config_for(&server, "acme");
    let report = scan_org(&config).await.unwrap();

    assert_eq!(report.sections.len(), 1);
    assert_eq!(report.sections[0].repo, "fine");
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(
        report.diagnostics[0].category,
        DiagnosticCategory::WorkflowFetch
    );
    assert!(report.has_soft_errors());
}

#[tokio::test]
async fn test_empty_token_fails_before_any_request() {
    let mut server = mockito::Server::new_async().await;

    let nothing = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = ScanConfig {
        token: Cow::Borrowed(""),
        ..config_for(&server, "acme")
    };
    let err = scan_org(&config).await.unwrap_err();

    nothing.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[tokio::test]
async fn test_invalid_org_fails_before_any_request() {
    let mut server = mockito::Server::new_async().await;

    let nothing = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = config_for(&server, "not a valid org");
    let err = scan_org(&config).await.unwrap_err();

    nothing.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[tokio::test]
async fn test_invalid_pattern_fails_before_any_request() {
    let mut server = mockito::Server::new_async().await;

    let nothing = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = ScanConfig {
        omit_pattern: Some(Cow::Borrowed("[unterminated")),
        ..config_for(&server, "acme")
    };
    let err = scan_org(&config).await.unwrap_err();

    nothing.assert_async().await;
    assert_eq!(err.kind(), ErrorKind::Pattern);
}
