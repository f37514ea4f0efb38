//! Organization scan orchestrator

use crate::error::{Error, Result};
use crate::filter::NameFilter;
use crate::http::GitHubApiClient;
use crate::types::{
    Diagnostic, DiagnosticCategory, DiagnosticSeverity, RepoSection, ScanConfig, ScanReport,
    WorkflowList,
};

/// Scanner that walks an organization's repositories and collects their
/// workflows into a report.
///
/// Fetching is strictly sequential and follows the provider's listing
/// order. A repository-list failure aborts the run; a per-repository
/// workflow failure is recorded as a diagnostic and the scan moves on.
#[derive(Debug)]
pub struct OrgScanner<'a> {
    client: &'a GitHubApiClient,
    config: &'a ScanConfig<'a>,
    filter: Option<NameFilter>,
}

impl<'a> OrgScanner<'a> {
    /// Create a new scanner, validating the configuration up front.
    ///
    /// Rejects an invalid organization identifier and a non-compiling
    /// exclusion pattern before any request is issued.
    pub fn new(client: &'a GitHubApiClient, config: &'a ScanConfig<'a>) -> Result<Self> {
        if !valid_org_name(&config.org) {
            return Err(Error::Config(format!(
                "invalid organization name: {:?}",
                config.org
            )));
        }

        let filter = match &config.omit_pattern {
            Some(pattern) => Some(NameFilter::new(pattern)?),
            None => None,
        };

        Ok(Self {
            client,
            config,
            filter,
        })
    }

    /// Run the scan and build the report.
    pub async fn scan(&self) -> Result<ScanReport> {
        let mut report = ScanReport {
            org: self.config.org.to_string(),
            ..Default::default()
        };

        // Step 1: list the organization's repositories. Nothing to
        // iterate on failure, so the error aborts the run.
        let repos = self.client.list_org_repos(&self.config.org).await?;

        // Step 2: list workflows per repository, in provider order.
        // Failures here are soft: record and keep going.
        for repo in &repos {
            let list = match self
                .client
                .list_repo_workflows(&repo.owner.login, &repo.name)
                .await
            {
                Ok(list) => list,
                Err(e) => {
                    report.diagnostics.push(Diagnostic {
                        severity: DiagnosticSeverity::SoftError,
                        category: DiagnosticCategory::WorkflowFetch,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            // The count can exceed the page the API returned. Flag it,
            // the missing names are not fetched.
            if (list.total_count as usize) > list.workflows.len() {
                report.diagnostics.push(Diagnostic {
                    severity: DiagnosticSeverity::Warning,
                    category: DiagnosticCategory::TruncatedList,
                    message: format!(
                        "repo {} reports {} workflows but only {} were returned; the rest are not shown",
                        repo.name,
                        list.total_count,
                        list.workflows.len()
                    ),
                });
            }

            report
                .sections
                .push(build_section(&repo.name, list, self.filter.as_ref()));
        }

        Ok(report)
    }
}

/// Check an organization identifier against GitHub naming rules:
/// ASCII alphanumerics and single interior hyphens.
fn valid_org_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
}

/// Build a report section from one workflow listing, dropping the names
/// the filter omits while keeping `total_count` verbatim.
fn build_section(repo: &str, list: WorkflowList, filter: Option<&NameFilter>) -> RepoSection {
    let workflows = list
        .workflows
        .into_iter()
        .map(|w| w.name)
        .filter(|name| !filter.is_some_and(|f| f.omits(name)))
        .collect();

    RepoSection {
        repo: repo.to_string(),
        total_count: list.total_count,
        workflows,
    }
}
