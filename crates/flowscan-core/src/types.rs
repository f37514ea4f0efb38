//! Core data types for flowscan

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Owner of a repository, as returned by the GitHub API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoOwner {
    /// Account login of the owner
    pub login: String,
}

/// A repository belonging to the surveyed organization.
///
/// Only the fields the scan consumes are decoded, the API returns far more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name without the owner prefix
    pub name: String,
    /// Owning account
    pub owner: RepoOwner,
}

/// A single Actions workflow definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Human-readable workflow name from the workflow file
    pub name: String,
}

/// Response shape of the workflow listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowList {
    /// Total number of workflows the repository has
    pub total_count: u32,
    /// Workflows returned in this page
    pub workflows: Vec<Workflow>,
}

/// Configuration for a scan run.
///
/// Uses `Cow` so callers can pass borrowed strings without cloning,
/// while owned values (e.g. from environment lookups) work too.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig<'a> {
    /// Organization whose repositories are surveyed
    pub org: Cow<'a, str>,
    /// API credential sent as `Authorization: token <value>`
    pub token: Cow<'a, str>,
    /// Override for the API base URL, defaults to the public endpoint
    pub api_url: Option<Cow<'a, str>>,
    /// Regex for workflow names to omit from the report
    pub omit_pattern: Option<Cow<'a, str>>,
}

impl Default for ScanConfig<'_> {
    fn default() -> Self {
        ScanConfig {
            org: Cow::Borrowed(""),
            token: Cow::Borrowed(""),
            api_url: None,
            omit_pattern: None,
        }
    }
}

/// Severity of a diagnostic raised during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// Informational, the report is still complete
    Warning,
    /// Part of the report is missing
    SoftError,
}

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    /// A repository's workflow listing failed
    WorkflowFetch,
    /// The API reported more workflows than it returned
    TruncatedList,
}

/// A problem encountered mid-scan that did not abort the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// How serious the problem is
    pub severity: DiagnosticSeverity,
    /// What the problem concerns
    pub category: DiagnosticCategory,
    /// Human-readable description
    pub message: String,
}

/// Per-repository slice of the final report.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoSection {
    /// Repository name
    pub repo: String,
    /// Workflow count the API reported for the repository
    pub total_count: u32,
    /// Workflow names that survived the omit filter, in API order
    pub workflows: Vec<String>,
}

/// Complete result of one scan run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanReport {
    /// Organization that was surveyed
    pub org: String,
    /// One section per repository, in listing order
    pub sections: Vec<RepoSection>,
    /// Problems encountered along the way
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanReport {
    /// True when any diagnostic is a soft error, meaning the report is
    /// incomplete and the caller should exit non-zero.
    pub fn has_soft_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::SoftError)
    }
}
