//! GraphQL documents and the response shapes we read from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const RECENT_REPOSITORIES: &str = r"
query recentRepositories($login: String!, $first: Int!) {
  user(login: $login) {
    repositories(first: $first, ownerAffiliations: OWNER, orderBy: { direction: DESC, field: UPDATED_AT }) {
      nodes {
        name
      }
    }
  }
}
";

pub const COMMIT_HISTORY: &str = r"
query commitHistory($owner: String!, $repo: String!, $id: ID!, $first: Int!) {
  repository(owner: $owner, name: $repo) {
    defaultBranchRef {
      target {
        ... on Commit {
          history(first: $first, author: { id: $id }) {
            nodes {
              committedDate
            }
          }
        }
      }
    }
  }
}
";

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RepositoriesVariables<'a> {
    pub login: &'a str,
    pub first: usize,
}

#[derive(Debug, Serialize)]
pub struct HistoryVariables<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub id: &'a str,
    pub first: usize,
}

#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoriesData {
    pub user: Option<UserRepositories>,
}

#[derive(Debug, Deserialize)]
pub struct UserRepositories {
    pub repositories: Connection<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryNode {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryData {
    pub repository: Option<RepositoryHistory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryHistory {
    pub default_branch_ref: Option<BranchRef>,
}

#[derive(Debug, Deserialize)]
pub struct BranchRef {
    pub target: Option<CommitTarget>,
}

/// Target of the default branch. `history` is absent when the target is not a commit.
#[derive(Debug, Deserialize)]
pub struct CommitTarget {
    pub history: Option<Connection<CommitNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitNode {
    pub committed_date: DateTime<Utc>,
}

/// Subset of the REST user payload.
#[derive(Debug, Deserialize)]
pub struct RestUser {
    pub node_id: String,
}
