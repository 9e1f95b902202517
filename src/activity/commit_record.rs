use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A single commit authored by the user, as seen on a repository's default branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub repository: String,
    pub committed_at: DateTime<Utc>,
}

impl CommitRecord {
    #[must_use]
    pub fn new(repository: impl Into<String>, committed_at: DateTime<Utc>) -> Self {
        Self {
            repository: repository.into(),
            committed_at,
        }
    }

    /// Parse an ISO-8601 / RFC 3339 timestamp, normalizing it to UTC.
    pub fn parse(repository: impl Into<String>, timestamp: &str) -> Result<Self, chrono::ParseError> {
        let committed_at = DateTime::parse_from_rfc3339(timestamp)?.with_timezone(&Utc);
        Ok(Self::new(repository, committed_at))
    }

    /// Hour of day (0-23) in UTC.
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.committed_at.hour()
    }
}
