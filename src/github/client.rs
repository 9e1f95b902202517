use super::queries::{
    COMMIT_HISTORY, GraphQlRequest, GraphQlResponse, HistoryData, HistoryVariables, RECENT_REPOSITORIES, RepositoriesData,
    RepositoriesVariables, RestUser,
};
use super::{Fetcher, RepoRef};
use crate::activity::CommitRecord;
use crate::card::CardError;
use core::time::Duration;
use ohno::IntoAppError;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

const LOG_TARGET: &str = "    github";

/// Public GitHub API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// [`Fetcher`] backed by the GitHub REST and GraphQL APIs.
#[derive(Debug, Clone)]
pub struct GitHubFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubFetcher {
    /// Create a client with an optional personal access token.
    ///
    /// `timeout` bounds each individual HTTP call.
    pub fn new(token: Option<&str>, base_url: impl Into<String>, user_agent: &str, timeout: Duration) -> crate::Result<Self> {
        let mut client_builder = reqwest::Client::builder().user_agent(user_agent).timeout(timeout);

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        Ok(Self {
            client: client_builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a GraphQL query. Reported errors and a missing `data` member both mean "not found".
    async fn graphql<V: Serialize + Send, T: DeserializeOwned>(&self, query: &str, variables: V, what: &str) -> Result<T, CardError> {
        let url = format!("{}/graphql", self.base_url);

        log::debug!(target: LOG_TARGET, "Querying GraphQL for {what}");

        let resp = self
            .client
            .post(&url)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .into_app_err_with(|| format!("could not query {what}"))
            .map_err(CardError::upstream)?
            .error_for_status()
            .into_app_err_with(|| format!("GraphQL request for {what} was rejected"))
            .map_err(CardError::upstream)?;

        let response: GraphQlResponse<T> = resp
            .json()
            .await
            .into_app_err_with(|| format!("malformed GraphQL response for {what}"))
            .map_err(CardError::upstream)?;

        if !response.errors.is_empty() {
            let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
            log::info!(target: LOG_TARGET, "GraphQL reported errors for {what}: {}", messages.join("; "));
            return Err(CardError::NotFound(format!("{what}: {}", messages.join("; "))));
        }

        response.data.ok_or_else(|| CardError::NotFound(format!("{what}: response contained no data")))
    }
}

impl Fetcher for GitHubFetcher {
    async fn user_id(&self, login: &str) -> Result<String, CardError> {
        let url = format!("{}/users/{login}", self.base_url);

        log::debug!(target: LOG_TARGET, "Looking up user '{login}'");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .into_app_err_with(|| format!("could not look up user '{login}'"))
            .map_err(CardError::upstream)?;

        if resp.status() == StatusCode::NOT_FOUND {
            log::info!(target: LOG_TARGET, "User '{login}' not found (404)");
            return Err(CardError::NotFound(format!("user '{login}'")));
        }

        let user: RestUser = resp
            .error_for_status()
            .into_app_err_with(|| format!("lookup of user '{login}' was rejected"))
            .map_err(CardError::upstream)?
            .json()
            .await
            .into_app_err_with(|| format!("malformed user payload for '{login}'"))
            .map_err(CardError::upstream)?;

        Ok(user.node_id)
    }

    async fn recent_repositories(&self, login: &str, limit: usize) -> Result<Vec<RepoRef>, CardError> {
        let data: RepositoriesData = self
            .graphql(
                RECENT_REPOSITORIES,
                RepositoriesVariables { login, first: limit },
                &format!("repositories of '{login}'"),
            )
            .await?;

        let user = data.user.ok_or_else(|| CardError::NotFound(format!("user '{login}'")))?;

        Ok(user
            .repositories
            .nodes
            .into_iter()
            .map(|node| RepoRef::new(login, node.name))
            .collect())
    }

    async fn commit_timestamps(&self, repo: &RepoRef, author_id: &str, limit: usize) -> Result<Vec<CommitRecord>, CardError> {
        let data: HistoryData = self
            .graphql(
                COMMIT_HISTORY,
                HistoryVariables {
                    owner: &repo.owner,
                    repo: &repo.name,
                    id: author_id,
                    first: limit,
                },
                &format!("commit history of '{repo}'"),
            )
            .await?;

        let repository = data.repository.ok_or_else(|| CardError::NotFound(format!("repository '{repo}'")))?;

        // Empty repositories have no default branch, and a branch may point at a non-commit object.
        let nodes = repository
            .default_branch_ref
            .and_then(|branch| branch.target)
            .and_then(|target| target.history)
            .map(|history| history.nodes)
            .unwrap_or_default();

        log::debug!(target: LOG_TARGET, "Fetched {} commits from '{repo}'", nodes.len());

        Ok(nodes
            .into_iter()
            .map(|node| CommitRecord::new(repo.name.clone(), node.committed_date))
            .collect())
    }
}
