//! Line-oriented text rendering of a scan report

use std::fmt::Write;

use crate::types::ScanReport;

/// Render the report in its line-oriented text form.
///
/// Repositories with a non-zero workflow count print a header followed
/// by one indented line per retained workflow name; repositories with a
/// zero count print a single "no workflows" line. Diagnostics are not
/// part of the text form, they go to stderr.
pub fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();

    for section in &report.sections {
        if section.total_count > 0 {
            let _ = writeln!(out, "Repo: {} has the following workflows:", section.repo);
            for name in &section.workflows {
                let _ = writeln!(out, "  - {}", name);
            }
        } else {
            let _ = writeln!(out, "Repo: {} has no workflows.", section.repo);
        }
    }

    out
}
