//! GitHub REST API client for repository and workflow listing

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{Repository, ScanConfig, WorkflowList};

/// Versioned media type GitHub expects on REST calls.
pub const ACCEPT_GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// Base URL of the public GitHub API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub API client for listing org repositories and their workflows.
///
/// All requests go through one authenticated JSON GET helper, so every
/// call carries the same `Authorization` and `Accept` headers and maps
/// failures onto the same error taxonomy. Requests never set paging
/// parameters: only the provider's first page of results is consumed.
pub struct GitHubApiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for GitHubApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(base_url: String, token: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("flowscan/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url,
            token,
        }
    }

    /// Create a client from scan configuration.
    ///
    /// The base URL falls back to the `GITHUB_API_URL` environment
    /// variable and then to the public endpoint. An empty credential is
    /// rejected before any request is issued.
    pub fn from_config(config: &ScanConfig<'_>) -> Result<Self> {
        if config.token.is_empty() {
            return Err(Error::Config(
                "token must not be empty; set GITHUB_TOKEN or pass a credential".to_string(),
            ));
        }

        let base_url = match &config.api_url {
            Some(url) => url.to_string(),
            None => std::env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        };

        Ok(Self::new(base_url, config.token.to_string()))
    }

    /// List the repositories of an organization.
    ///
    /// `GET {base_url}/orgs/{org}/repos`, first page only.
    pub async fn list_org_repos(&self, org: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/orgs/{}/repos", self.base_url, org);
        let what = format!("repos for org {}", org);
        self.get_json(&url, &what).await
    }

    /// List the Actions workflows of a repository.
    ///
    /// `GET {base_url}/repos/{owner}/{repo}/actions/workflows`, first
    /// page only.
    pub async fn list_repo_workflows(&self, owner: &str, repo: &str) -> Result<WorkflowList> {
        let url = format!(
            "{}/repos/{}/{}/actions/workflows",
            self.base_url, owner, repo
        );
        let what = format!("workflows for repo {}", repo);
        self.get_json(&url, &what).await
    }

    /// Authenticated JSON GET against the API.
    ///
    /// `what` names the resource for error messages. Transport failures,
    /// non-200 statuses, and undecodable bodies map to distinct error
    /// kinds so callers can tell them apart.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", ACCEPT_GITHUB_JSON)
            .send()
            .await
            .map_err(|e| Error::Http(format!("failed to fetch {}: {}", what, e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("GET {} returned {}", url, status);
            return Err(Error::Status(format!(
                "failed to get {}: {}",
                what, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Http(format!("failed to read {}: {}", what, e)))?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!("GET {} returned an undecodable body: {}", url, e);
            Error::Decode(format!("failed to decode {}: {}", what, e))
        })
    }
}
