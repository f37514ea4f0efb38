//! HTTP layer: GitHub REST API access

pub mod client;

pub use client::GitHubApiClient;
