//! Machine-readable JSON rendering of a scan report

use serde_json::{json, Value};

use crate::types::{DiagnosticCategory, DiagnosticSeverity, ScanReport};

/// Render the report as a JSON value.
///
/// Unlike the text form this includes the diagnostics, so a JSON
/// consumer sees the whole outcome in one document.
pub fn report_to_json(report: &ScanReport) -> Value {
    let repos: Vec<Value> = report
        .sections
        .iter()
        .map(|s| {
            json!({
                "name": s.repo,
                "total_count": s.total_count,
                "workflows": s.workflows,
            })
        })
        .collect();

    let diagnostics: Vec<Value> = report
        .diagnostics
        .iter()
        .map(|d| {
            json!({
                "severity": severity_str(d.severity),
                "category": category_str(d.category),
                "message": d.message,
            })
        })
        .collect();

    json!({
        "org": report.org,
        "repos": repos,
        "diagnostics": diagnostics,
    })
}

fn severity_str(severity: DiagnosticSeverity) -> &'static str {
    match severity {
        DiagnosticSeverity::Warning => "warning",
        DiagnosticSeverity::SoftError => "soft_error",
    }
}

fn category_str(category: DiagnosticCategory) -> &'static str {
    match category {
        DiagnosticCategory::WorkflowFetch => "workflow_fetch",
        DiagnosticCategory::TruncatedList => "truncated_list",
    }
}
