use rfollow_common::{IdentityRecord, OptionalDatasets, ReconciliationResult};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Classify every distinct handle of the two collections.
///
/// `mutual` and `following_only` carry the record from the following side.
/// Duplicate handles within one side collapse to the last occurrence, while
/// the totals report the raw input lengths.
pub fn reconcile(followers: &[IdentityRecord], following: &[IdentityRecord]) -> ReconciliationResult {
    info!(
        "Reconciling {} followers with {} following",
        followers.len(),
        following.len()
    );

    let unique_followers = dedup_by_handle(followers);
    let unique_following = dedup_by_handle(following);

    let follower_handles: HashSet<&str> =
        unique_followers.iter().map(|r| r.handle.as_str()).collect();
    let following_handles: HashSet<&str> =
        unique_following.iter().map(|r| r.handle.as_str()).collect();

    let mut mutual = Vec::new();
    let mut following_only = Vec::new();
    for record in &unique_following {
        if follower_handles.contains(record.handle.as_str()) {
            mutual.push(record.clone());
        } else {
            following_only.push(record.clone());
        }
    }

    let mut followers_only: Vec<IdentityRecord> = unique_followers
        .iter()
        .filter(|record| !following_handles.contains(record.handle.as_str()))
        .cloned()
        .collect();

    sort_by_recency(&mut mutual);
    sort_by_recency(&mut following_only);
    sort_by_recency(&mut followers_only);

    debug!(
        "mutual={} following_only={} followers_only={}",
        mutual.len(),
        following_only.len(),
        followers_only.len()
    );

    ReconciliationResult {
        mutual,
        following_only,
        followers_only,
        total_followers: followers.len(),
        total_following: following.len(),
        optional: OptionalDatasets::default(),
    }
}

/// Collapse duplicate handles, last occurrence wins.
///
/// A handle keeps the position of its first occurrence.
pub fn dedup_by_handle(records: &[IdentityRecord]) -> Vec<IdentityRecord> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<IdentityRecord> = Vec::with_capacity(records.len());

    for record in records {
        match positions.get(record.handle.as_str()) {
            Some(&index) => unique[index] = record.clone(),
            None => {
                positions.insert(record.handle.as_str(), unique.len());
                unique.push(record.clone());
            }
        }
    }

    unique
}

/// Most recent first; equal timestamps keep their relative order
pub fn sort_by_recency(records: &mut [IdentityRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
