use chrono::{DateTime, Utc};
use rfollow_common::{IdentityRecord, OptionalDatasets, RFollowError, ReconciliationResult};
use serde::Serialize;

/// Counts shown alongside a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_followers: usize,
    pub total_following: usize,
    pub mutual: usize,
    pub following_only: usize,
    pub followers_only: usize,
}

impl Statistics {
    pub fn from_result(result: &ReconciliationResult) -> Self {
        Self {
            total_followers: result.total_followers,
            total_following: result.total_following,
            mutual: result.mutual.len(),
            following_only: result.following_only.len(),
            followers_only: result.followers_only.len(),
        }
    }
}

/// JSON document describing one analyzed export
#[derive(Debug, Serialize)]
pub struct ExportReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub statistics: Statistics,
    pub relationships: &'a ReconciliationResult,
}

impl<'a> ExportReport<'a> {
    pub fn new(source: impl Into<String>, result: &'a ReconciliationResult) -> Self {
        Self::with_time(source, result, Utc::now())
    }

    pub fn with_time(
        source: impl Into<String>,
        result: &'a ReconciliationResult,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            generated_at,
            source: source.into(),
            statistics: Statistics::from_result(result),
            relationships: result,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, RFollowError> {
        serde_json::to_string_pretty(self).map_err(|e| RFollowError::Serialization(e.to_string()))
    }
}

/// Records whose handle contains `query`, ignoring case.
/// A blank query keeps everything.
pub fn search_handles<'a>(records: &'a [IdentityRecord], query: &str) -> Vec<&'a IdentityRecord> {
    let query = query.trim().to_lowercase();
    records
        .iter()
        .filter(|record| query.is_empty() || record.handle.to_lowercase().contains(&query))
        .collect()
}

/// Copy of `result` keeping only matching handles in every collection.
/// Totals still describe the whole export.
pub fn filter_result(result: &ReconciliationResult, query: &str) -> ReconciliationResult {
    let keep = |records: &[IdentityRecord]| -> Vec<IdentityRecord> {
        search_handles(records, query).into_iter().cloned().collect()
    };
    let keep_optional =
        |records: &Option<Vec<IdentityRecord>>| records.as_deref().map(|r| keep(r));

    ReconciliationResult {
        mutual: keep(&result.mutual),
        following_only: keep(&result.following_only),
        followers_only: keep(&result.followers_only),
        total_followers: result.total_followers,
        total_following: result.total_following,
        optional: OptionalDatasets {
            close_friends: keep_optional(&result.optional.close_friends),
            pending_follow_requests: keep_optional(&result.optional.pending_follow_requests),
            recent_follow_requests: keep_optional(&result.optional.recent_follow_requests),
            recently_unfollowed: keep_optional(&result.optional.recently_unfollowed),
        },
    }
}
