use crate::activity::CommitRecord;
use crate::card::CardError;
use serde::{Deserialize, Serialize};

/// A repository owned by the user being profiled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl core::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Queries against the remote API that the aggregator depends on.
///
/// Implementations own authentication, transport and timeouts for a single call. They
/// report an unknown login or repository as [`CardError::NotFound`] and transport problems
/// as [`CardError::TransientUpstreamFailure`].
pub trait Fetcher: Send + Sync {
    /// Resolve a login to the opaque identity used to filter commit authorship.
    fn user_id(&self, login: &str) -> impl Future<Output = Result<String, CardError>> + Send;

    /// Repositories owned by `login`, most recently updated first, at most `limit` of them.
    fn recent_repositories(&self, login: &str, limit: usize) -> impl Future<Output = Result<Vec<RepoRef>, CardError>> + Send;

    /// Up to `limit` most recent commits by `author_id` on the repository's default branch.
    fn commit_timestamps(
        &self,
        repo: &RepoRef,
        author_id: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<CommitRecord>, CardError>> + Send;
}
