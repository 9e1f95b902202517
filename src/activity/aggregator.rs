use super::{AggregationResult, CommitRecord, FailedRepository};
use crate::card::CardError;
use crate::github::{Fetcher, RepoRef};
use core::time::Duration;
use futures_util::future::join_all;
use ohno::app_err;

const LOG_TARGET: &str = "  activity";

/// Upper bound on the number of repositories queried per request.
///
/// Users with hundreds of repositories would otherwise make a single card take minutes,
/// so only the most recently updated ones are sampled.
pub const MAX_REPOSITORIES: usize = 10;

/// Upper bound on the number of commits fetched from each repository.
pub const MAX_COMMITS_PER_REPOSITORY: usize = 100;

const DEFAULT_REPOSITORY_TIMEOUT: Duration = Duration::from_secs(10);

/// Knobs for [`Aggregator`].
#[derive(Debug, Clone)]
pub struct AggregatorOptions {
    /// Clamped to [`MAX_REPOSITORIES`].
    pub max_repositories: usize,
    /// Clamped to [`MAX_COMMITS_PER_REPOSITORY`].
    pub commits_per_repository: usize,
    /// Time allowed for each repository's commit query.
    pub repository_timeout: Duration,
    /// Fail the whole request if any single repository fails.
    pub fail_on_partial_failure: bool,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self {
            max_repositories: MAX_REPOSITORIES,
            commits_per_repository: MAX_COMMITS_PER_REPOSITORY,
            repository_timeout: DEFAULT_REPOSITORY_TIMEOUT,
            fail_on_partial_failure: false,
        }
    }
}

/// Gathers a user's recent commits and turns them into an [`AggregationResult`].
#[derive(Debug)]
pub struct Aggregator<F> {
    fetcher: F,
    options: AggregatorOptions,
}

impl<F: Fetcher> Aggregator<F> {
    #[must_use]
    pub fn new(fetcher: F, options: AggregatorOptions) -> Self {
        Self { fetcher, options }
    }

    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn repository_limit(&self) -> usize {
        self.options.max_repositories.min(MAX_REPOSITORIES)
    }

    fn commit_limit(&self) -> usize {
        self.options.commits_per_repository.min(MAX_COMMITS_PER_REPOSITORY)
    }

    /// Resolve `username`, fetch commits from its recent repositories concurrently, and classify them.
    ///
    /// All repository queries are awaited before classification starts. Repositories that fail
    /// are reported in [`AggregationResult::failed_repositories`]; the request itself fails if
    /// every repository failed or if partial failures are configured to be fatal.
    pub async fn aggregate(&self, username: &str) -> Result<AggregationResult, CardError> {
        let user_id = self.resolve_identity(username).await?;
        let repos = self.list_recent_repositories(username).await?;

        log::info!(target: LOG_TARGET, "Fetching commits by '{username}' from {} repositories", repos.len());

        let outcomes = join_all(repos.iter().map(|repo| self.fetch_commit_timestamps(repo, &user_id))).await;

        let mut commits: Vec<CommitRecord> = Vec::new();
        let mut failed_repositories = Vec::new();
        let mut first_error = None;

        for (repo, outcome) in repos.iter().zip(outcomes) {
            match outcome {
                Ok(mut repo_commits) => {
                    log::debug!(target: LOG_TARGET, "Repository '{repo}' contributed {} commits", repo_commits.len());
                    commits.append(&mut repo_commits);
                }
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Skipping repository '{repo}': {e}");
                    failed_repositories.push(FailedRepository {
                        name: repo.to_string(),
                        reason: e.to_string(),
                    });
                    let _ = first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error
            && (self.options.fail_on_partial_failure || failed_repositories.len() == repos.len())
        {
            return Err(e);
        }

        let mut result = AggregationResult::from_commits(&commits)?;
        result.failed_repositories = failed_repositories;

        log::debug!(target: LOG_TARGET, "Classified {} commits by '{username}' as {:?}", result.total, result.label);

        Ok(result)
    }

    /// Resolve a login to the identity used for author filtering.
    pub async fn resolve_identity(&self, username: &str) -> Result<String, CardError> {
        self.fetcher.user_id(username).await
    }

    /// The user's most recently updated owned repositories, never more than [`MAX_REPOSITORIES`].
    pub async fn list_recent_repositories(&self, username: &str) -> Result<Vec<RepoRef>, CardError> {
        let limit = self.repository_limit();
        let mut repos = self.fetcher.recent_repositories(username, limit).await?;
        repos.truncate(limit);
        Ok(repos)
    }

    /// Commits by `user_id` on one repository's default branch, bounded by the per-repository timeout.
    pub async fn fetch_commit_timestamps(&self, repo: &RepoRef, user_id: &str) -> Result<Vec<CommitRecord>, CardError> {
        let limit = self.commit_limit();
        let timeout = self.options.repository_timeout;

        let mut commits = tokio::time::timeout(timeout, self.fetcher.commit_timestamps(repo, user_id, limit))
            .await
            .map_err(|_elapsed| {
                CardError::upstream(app_err!("timed out after {}s fetching commits for '{repo}'", timeout.as_secs()))
            })??;

        commits.truncate(limit);
        Ok(commits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{Bucket, TypeLabel};
    use chrono::{TimeZone, Utc};
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::collections::HashMap;

    /// In-memory fetcher. Repositories mapped to `None` fail.
    #[derive(Debug, Default)]
    struct FakeFetcher {
        users: HashMap<String, String>,
        repos: Vec<RepoRef>,
        commits: HashMap<String, Option<Vec<u32>>>,
        hang: Vec<String>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        commit_calls: AtomicUsize,
    }

    impl FakeFetcher {
        fn with_user(login: &str) -> Self {
            let mut fetcher = Self::default();
            let _ = fetcher.users.insert(login.to_string(), format!("id-{login}"));
            fetcher
        }

        fn repo(mut self, name: &str, hours: Option<Vec<u32>>) -> Self {
            self.repos.push(RepoRef::new("octo", name));
            let _ = self.commits.insert(name.to_string(), hours);
            self
        }
    }

    impl Fetcher for FakeFetcher {
        async fn user_id(&self, login: &str) -> Result<String, CardError> {
            self.users
                .get(login)
                .cloned()
                .ok_or_else(|| CardError::NotFound(format!("user '{login}'")))
        }

        async fn recent_repositories(&self, _login: &str, _limit: usize) -> Result<Vec<RepoRef>, CardError> {
            // ignores the limit; the aggregator applies its own cap
            Ok(self.repos.clone())
        }

        async fn commit_timestamps(&self, repo: &RepoRef, _author_id: &str, _limit: usize) -> Result<Vec<CommitRecord>, CardError> {
            let _ = self.commit_calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            let _ = self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            tokio::task::yield_now().await;
            if self.hang.contains(&repo.name) {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }

            let _ = self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match self.commits.get(&repo.name) {
                Some(Some(hours)) => Ok(hours
                    .iter()
                    .map(|&h| CommitRecord::new(repo.name.clone(), Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap()))
                    .collect()),
                Some(None) => Err(CardError::upstream(app_err!("boom"))),
                None => Ok(Vec::new()),
            }
        }
    }

    #[test]
    fn test_log_target_is_right_aligned() {
        assert_eq!(LOG_TARGET.len(), 10);
        assert_eq!(LOG_TARGET.trim_start(), "activity");
    }

    #[tokio::test]
    async fn test_aggregates_across_repositories() {
        let fetcher = FakeFetcher::with_user("octo")
            .repo("a", Some(vec![9, 9, 13]))
            .repo("b", Some(vec![20, 3]));
        let aggregator = Aggregator::new(fetcher, AggregatorOptions::default());

        let result = aggregator.aggregate("octo").await.unwrap();

        assert_eq!(result.total, 5);
        assert_eq!(result.bucket(Bucket::Morning).count, 2);
        assert_eq!(result.bucket(Bucket::Daytime).count, 1);
        assert_eq!(result.bucket(Bucket::Evening).count, 1);
        assert_eq!(result.bucket(Bucket::Night).count, 1);
        assert_eq!(result.label, TypeLabel::Early);
        assert!(result.failed_repositories.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let aggregator = Aggregator::new(FakeFetcher::default(), AggregatorOptions::default());
        let err = aggregator.aggregate("ghost").await.unwrap_err();
        assert!(matches!(err, CardError::NotFound(_)));
        assert_eq!(aggregator.fetcher().commit_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_commits_is_aggregation_empty() {
        let fetcher = FakeFetcher::with_user("octo").repo("a", Some(Vec::new())).repo("b", Some(Vec::new()));
        let aggregator = Aggregator::new(fetcher, AggregatorOptions::default());

        let err = aggregator.aggregate("octo").await.unwrap_err();
        assert!(matches!(err, CardError::AggregationEmpty));
    }

    #[tokio::test]
    async fn test_no_repositories_is_aggregation_empty() {
        let aggregator = Aggregator::new(FakeFetcher::with_user("octo"), AggregatorOptions::default());
        let err = aggregator.aggregate("octo").await.unwrap_err();
        assert!(matches!(err, CardError::AggregationEmpty));
    }

    #[tokio::test]
    async fn test_fan_out_is_capped() {
        let mut fetcher = FakeFetcher::with_user("octo");
        for i in 0..25 {
            fetcher = fetcher.repo(&format!("repo{i}"), Some(vec![10]));
        }
        let options = AggregatorOptions {
            max_repositories: 50,
            ..AggregatorOptions::default()
        };
        let aggregator = Aggregator::new(fetcher, options);

        let result = aggregator.aggregate("octo").await.unwrap();

        assert_eq!(result.total, 10);
        assert_eq!(aggregator.fetcher().commit_calls.load(Ordering::SeqCst), MAX_REPOSITORIES);
        let max_in_flight = aggregator.fetcher().max_in_flight.load(Ordering::SeqCst);
        assert!(max_in_flight <= MAX_REPOSITORIES, "saw {max_in_flight} concurrent queries");
        assert!(max_in_flight > 1, "queries should run concurrently");
    }

    #[tokio::test]
    async fn test_partial_failure_is_reported() {
        let fetcher = FakeFetcher::with_user("octo").repo("good", Some(vec![22])).repo("bad", None);
        let aggregator = Aggregator::new(fetcher, AggregatorOptions::default());

        let result = aggregator.aggregate("octo").await.unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.label, TypeLabel::Night);
        assert_eq!(result.failed_repositories.len(), 1);
        assert_eq!(result.failed_repositories[0].name, "octo/bad");
    }

    #[tokio::test]
    async fn test_partial_failure_can_be_fatal() {
        let fetcher = FakeFetcher::with_user("octo").repo("good", Some(vec![22])).repo("bad", None);
        let options = AggregatorOptions {
            fail_on_partial_failure: true,
            ..AggregatorOptions::default()
        };
        let aggregator = Aggregator::new(fetcher, options);

        let err = aggregator.aggregate("octo").await.unwrap_err();
        assert!(matches!(err, CardError::TransientUpstreamFailure(_)));
    }

    #[tokio::test]
    async fn test_all_repositories_failing_fails_the_request() {
        let fetcher = FakeFetcher::with_user("octo").repo("bad1", None).repo("bad2", None);
        let aggregator = Aggregator::new(fetcher, AggregatorOptions::default());

        let err = aggregator.aggregate("octo").await.unwrap_err();
        assert!(matches!(err, CardError::TransientUpstreamFailure(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_repository_times_out() {
        let mut fetcher = FakeFetcher::with_user("octo").repo("fast", Some(vec![8])).repo("slow", Some(vec![8]));
        fetcher.hang.push("slow".to_string());
        let aggregator = Aggregator::new(fetcher, AggregatorOptions::default());

        let result = aggregator.aggregate("octo").await.unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.failed_repositories.len(), 1);
        assert_eq!(result.failed_repositories[0].name, "octo/slow");
        assert!(result.failed_repositories[0].reason.contains("timed out"));
    }
}
