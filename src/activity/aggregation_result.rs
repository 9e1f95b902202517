use super::{Bucket, CommitRecord, TimeBucket};
use crate::card::CardError;
use serde::Serialize;
use strum::IntoEnumIterator;

/// The overall "type" of committer derived from the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeLabel {
    Early,
    Night,
}

impl TypeLabel {
    /// Early when the day side (morning + daytime) has at least as many commits as the night side.
    #[must_use]
    pub const fn from_totals(day_side: u64, night_side: u64) -> Self {
        if day_side >= night_side { Self::Early } else { Self::Night }
    }

    /// Title line shown on the card.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Early => "I'm an Early 🐤",
            Self::Night => "I'm a Night 🦉",
        }
    }
}

/// A repository whose commits could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRepository {
    pub name: String,
    pub reason: String,
}

/// Distribution of a user's commits over the four buckets.
#[derive(Debug, Clone, Serialize)]
pub struct AggregationResult {
    pub label: TypeLabel,
    pub total: u64,
    /// Always in [`Bucket`] declaration order: morning, daytime, evening, night.
    pub buckets: [TimeBucket; 4],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_repositories: Vec<FailedRepository>,
}

impl AggregationResult {
    /// Classify commits and compute counts, shares and the label.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::AggregationEmpty`] when there is nothing to classify, since shares
    /// are undefined for an empty distribution.
    #[expect(single_use_lifetimes, reason = "Required by Rust 2024 for impl Trait with references")]
    pub fn from_commits<'a>(commits: impl IntoIterator<Item = &'a CommitRecord>) -> Result<Self, CardError> {
        let mut counts = [0_u64; 4];

        for commit in commits {
            // hour() is always 0..24, so every commit lands in a bucket
            if let Some(bucket) = Bucket::for_hour(commit.hour()) {
                counts[bucket as usize] += 1;
            }
        }

        Self::from_counts(counts)
    }

    /// Build a result from per-bucket counts given in [`Bucket`] declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::AggregationEmpty`] if all counts are zero.
    pub fn from_counts(counts: [u64; 4]) -> Result<Self, CardError> {
        let total: u64 = counts.iter().sum();
        if total == 0 {
            return Err(CardError::AggregationEmpty);
        }

        let (day_side, night_side) = Bucket::iter().fold((0, 0), |(day, night), bucket| {
            let count = counts[bucket as usize];
            if bucket.is_day_side() { (day + count, night) } else { (day, night + count) }
        });

        Ok(Self {
            label: TypeLabel::from_totals(day_side, night_side),
            total,
            buckets: [
                TimeBucket::new(Bucket::Morning, counts[Bucket::Morning as usize], total),
                TimeBucket::new(Bucket::Daytime, counts[Bucket::Daytime as usize], total),
                TimeBucket::new(Bucket::Evening, counts[Bucket::Evening as usize], total),
                TimeBucket::new(Bucket::Night, counts[Bucket::Night as usize], total),
            ],
            failed_repositories: Vec::new(),
        })
    }

    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &TimeBucket {
        &self.buckets[bucket as usize]
    }
}
