//! Commit time-of-day analysis.

mod aggregation_result;
mod aggregator;
mod commit_record;
mod time_bucket;

pub use aggregation_result::{AggregationResult, FailedRepository, TypeLabel};
pub use aggregator::{Aggregator, AggregatorOptions, MAX_COMMITS_PER_REPOSITORY, MAX_REPOSITORIES};
pub use commit_record::CommitRecord;
pub use time_bucket::{Bucket, TimeBucket};
