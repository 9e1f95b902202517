//! Access to the GitHub API.

mod client;
mod fetcher;
mod queries;

pub use client::{DEFAULT_API_URL, GitHubFetcher};
pub use fetcher::{Fetcher, RepoRef};
