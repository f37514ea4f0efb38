//! # Flowscan Core
//!
//! Workflow inventory library for GitHub organizations.
//!
//! Fetches an organization's repository list, lists the Actions
//! workflows configured in each repository, drops workflow names that
//! match an exclusion regex, and builds a report:
//! - **Reqwest** (rustls) for API access
//! - **Serde** for wire decoding
//! - **Regex** for the exclusion filter
//! - **Tokio** for async I/O
//!
//! Requests carry no paging parameters, so only the first page of each
//! listing is consumed. A workflow list the API reports as larger than
//! what it returned is flagged on the report as a warning diagnostic.
//!
//! ## Example
//!
//! ```no_run
//! use flowscan_core::{scan_org, ScanConfig};
//! use std::borrow::Cow;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScanConfig {
//!     org: Cow::Borrowed("acme"),
//!     token: Cow::Borrowed("ghp_example"),
//!     omit_pattern: Some(Cow::Borrowed("Deploy.*")),
//!     ..Default::default()
//! };
//!
//! let report = scan_org(&config).await?;
//! print!("{}", flowscan_core::output::render_text(&report));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod error;
pub mod filter;
pub mod http;
pub mod output;
pub mod scan;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use filter::NameFilter;
pub use http::GitHubApiClient;
pub use scan::OrgScanner;
pub use types::{
    Diagnostic, DiagnosticCategory, DiagnosticSeverity, RepoOwner, RepoSection, Repository,
    ScanConfig, ScanReport, Workflow, WorkflowList,
};

/// Scan an organization and report its workflows.
///
/// This is the main entry point for the library. It builds the API
/// client from the configuration, validates the organization name and
/// exclusion pattern, then walks the repositories sequentially.
///
/// A failure to list the repositories aborts the scan; a failure to
/// list one repository's workflows is recorded on the report as a
/// diagnostic and the scan continues.
///
/// # Example
///
/// ```no_run
/// use flowscan_core::{scan_org, ScanConfig};
/// use std::borrow::Cow;
///
/// # async fn example() -> flowscan_core::Result<()> {
/// let config = ScanConfig {
///     org: Cow::Borrowed("acme"),
///     token: Cow::Borrowed("ghp_example"),
///     ..Default::default()
/// };
///
/// let report = scan_org(&config).await?;
/// println!("Repositories scanned: {}", report.sections.len());
/// # Ok(())
/// # }
/// ```
pub async fn scan_org(config: &ScanConfig<'_>) -> Result<ScanReport> {
    let client = http::GitHubApiClient::from_config(config)?;
    let scanner = scan::OrgScanner::new(&client, config)?;
    scanner.scan().await
}

/// Synchronous variant of `scan_org`
///
/// This creates a new Tokio runtime and blocks on the async version.
/// Prefer the async version if you're already in an async context.
pub fn scan_org_sync(config: &ScanConfig<'_>) -> Result<ScanReport> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Runtime(e.to_string()))?
        .block_on(scan_org(config))
}
