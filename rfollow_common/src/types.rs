use serde::{Deserialize, Serialize};

/// Directory of an export that holds the relationship files
pub const DEFAULT_EXPORT_DIR: &str = "connections/followers_and_following";

/// Largest archive accepted by default (50 MiB)
pub const DEFAULT_MAX_ARCHIVE_BYTES: u64 = 50 * 1024 * 1024;

/// One relationship entry, normalized across export versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Account handle, unique within one collection
    pub handle: String,
    /// Profile link
    pub href: String,
    /// When the relationship was established (seconds since epoch)
    pub timestamp: i64,
}

impl IdentityRecord {
    pub fn new(handle: impl Into<String>, href: impl Into<String>, timestamp: i64) -> Self {
        Self {
            handle: handle.into(),
            href: href.into(),
            timestamp,
        }
    }
}

/// Top-level layout of an export file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// The file is an array of entries
    Flat,
    /// The file is an object whose named property holds the entries
    Keyed(&'static str),
}

/// Every relationship file the engine knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Followers,
    Following,
    CloseFriends,
    PendingRequests,
    RecentRequests,
    RecentlyUnfollowed,
}

impl DatasetKind {
    /// Datasets whose absence only drops a field from the result
    pub const OPTIONAL: [DatasetKind; 4] = [
        DatasetKind::CloseFriends,
        DatasetKind::PendingRequests,
        DatasetKind::RecentRequests,
        DatasetKind::RecentlyUnfollowed,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            DatasetKind::Followers => "followers_1.json",
            DatasetKind::Following => "following.json",
            DatasetKind::CloseFriends => "close_friends.json",
            DatasetKind::PendingRequests => "pending_follow_requests.json",
            DatasetKind::RecentRequests => "recent_follow_requests.json",
            DatasetKind::RecentlyUnfollowed => "recently_unfollowed_profiles.json",
        }
    }

    pub fn schema(self) -> Schema {
        match self {
            DatasetKind::Followers => Schema::Flat,
            DatasetKind::Following => Schema::Keyed("relationships_following"),
            DatasetKind::CloseFriends => Schema::Keyed("relationships_close_friends"),
            DatasetKind::PendingRequests => Schema::Keyed("relationships_follow_requests_sent"),
            DatasetKind::RecentRequests => {
                Schema::Keyed("relationships_permanent_follow_requests")
            }
            DatasetKind::RecentlyUnfollowed => Schema::Keyed("relationships_unfollowed_users"),
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, DatasetKind::Followers | DatasetKind::Following)
    }
}

/// Auxiliary collections, each present only if its file was readable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalDatasets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_friends: Option<Vec<IdentityRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_follow_requests: Option<Vec<IdentityRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_follow_requests: Option<Vec<IdentityRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recently_unfollowed: Option<Vec<IdentityRecord>>,
}

impl OptionalDatasets {
    pub fn get(&self, kind: DatasetKind) -> Option<&[IdentityRecord]> {
        match kind {
            DatasetKind::CloseFriends => self.close_friends.as_deref(),
            DatasetKind::PendingRequests => self.pending_follow_requests.as_deref(),
            DatasetKind::RecentRequests => self.recent_follow_requests.as_deref(),
            DatasetKind::RecentlyUnfollowed => self.recently_unfollowed.as_deref(),
            DatasetKind::Followers | DatasetKind::Following => None,
        }
    }

    /// Store a dataset; required kinds are not part of this set and are ignored
    pub fn set(&mut self, kind: DatasetKind, records: Vec<IdentityRecord>) {
        let slot = match kind {
            DatasetKind::CloseFriends => &mut self.close_friends,
            DatasetKind::PendingRequests => &mut self.pending_follow_requests,
            DatasetKind::RecentRequests => &mut self.recent_follow_requests,
            DatasetKind::RecentlyUnfollowed => &mut self.recently_unfollowed,
            DatasetKind::Followers | DatasetKind::Following => return,
        };
        *slot = Some(records);
    }
}

/// Relationship sets derived from one export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Accounts that follow the user and that the user follows
    pub mutual: Vec<IdentityRecord>,
    /// Accounts the user follows that do not follow back
    pub following_only: Vec<IdentityRecord>,
    /// Accounts following the user that the user does not follow
    pub followers_only: Vec<IdentityRecord>,
    /// Length of the followers file, duplicates included
    pub total_followers: usize,
    /// Length of the following file, duplicates included
    pub total_following: usize,
    #[serde(flatten)]
    pub optional: OptionalDatasets,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Archives larger than this are rejected before decoding
    #[serde(default = "default_max_archive_bytes")]
    pub max_archive_bytes: u64,

    /// Relative path of the relationship folder inside an export
    #[serde(default = "default_export_dir")]
    pub export_dir: String,

    /// Whether auxiliary datasets are read at all
    #[serde(default = "default_include_optional")]
    pub include_optional: bool,

    /// Enable portable mode (config alongside binary)
    #[serde(default)]
    pub portable_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_archive_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
            export_dir: default_export_dir(),
            include_optional: true,
            portable_mode: false,
        }
    }
}

fn default_max_archive_bytes() -> u64 {
    DEFAULT_MAX_ARCHIVE_BYTES
}

fn default_export_dir() -> String {
    DEFAULT_EXPORT_DIR.to_string()
}

fn default_include_optional() -> bool {
    true
}
