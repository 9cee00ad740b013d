use rfollow_common::{join_path, DatasetKind, RFollowError, Vfs};
use tracing::debug;

/// Resolved folder of an export that holds the relationship files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLocation {
    base_dir: String,
    nested: bool,
}

impl ExportLocation {
    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    /// True when the folder sat below an extra top-level directory
    pub fn is_nested(&self) -> bool {
        self.nested
    }

    pub fn file_path(&self, kind: DatasetKind) -> String {
        join_path(&self.base_dir, kind.file_name())
    }
}

/// Find `export_dir` inside the entries of `vfs`.
///
/// The well-known location is tried first. Otherwise the first entry whose
/// path contains `export_dir` decides the folder, so exports wrapped in an
/// arbitrary top-level directory still resolve.
pub fn locate_export_dir(vfs: &dyn Vfs, export_dir: &str) -> Result<ExportLocation, RFollowError> {
    let wanted = export_dir.trim_matches('/');
    if wanted.is_empty() {
        return Err(RFollowError::Config("export_dir must not be empty".to_string()));
    }

    let entries = vfs.entries()?;
    debug!("Searching {} entries of {} for {}", entries.len(), vfs.instance_id(), wanted);

    let prefix = format!("{}/", wanted);
    if entries.iter().any(|entry| entry.starts_with(&prefix)) {
        return Ok(ExportLocation {
            base_dir: wanted.to_string(),
            nested: false,
        });
    }

    for entry in &entries {
        if let Some(index) = entry.find(wanted) {
            let base_dir = &entry[..index + wanted.len()];
            debug!("Found nested export folder {} via {}", base_dir, entry);
            return Ok(ExportLocation {
                base_dir: base_dir.to_string(),
                nested: true,
            });
        }
    }

    Err(RFollowError::MissingDirectory(wanted.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::zip_bytes;
    use crate::vfs::ZipVfs;
    use rfollow_common::DEFAULT_EXPORT_DIR;

    fn vfs(files: &[(&str, &str)]) -> ZipVfs {
        ZipVfs::from_bytes(zip_bytes(files)).unwrap()
    }

    #[test]
    fn test_well_known_location() {
        let vfs = vfs(&[
            ("connections/followers_and_following/followers_1.json", "[]"),
            ("personal_information/info.json", "{}"),
        ]);

        let location = locate_export_dir(&vfs, DEFAULT_EXPORT_DIR).unwrap();
        assert_eq!(location.base_dir(), "connections/followers_and_following");
        assert!(!location.is_nested());
        assert_eq!(
            location.file_path(DatasetKind::Following),
            "connections/followers_and_following/following.json"
        );
    }

    #[test]
    fn test_extra_top_level_folder() {
        let vfs = vfs(&[
            ("instagram-user-2024/media/photo.txt", "x"),
            ("instagram-user-2024/connections/followers_and_following/following.json", "{}"),
        ]);

        let location = locate_export_dir(&vfs, DEFAULT_EXPORT_DIR).unwrap();
        assert_eq!(
            location.base_dir(),
            "instagram-user-2024/connections/followers_and_following"
        );
        assert!(location.is_nested());
        assert_eq!(
            location.file_path(DatasetKind::Followers),
            "instagram-user-2024/connections/followers_and_following/followers_1.json"
        );
    }

    #[test]
    fn test_first_match_wins() {
        let vfs = vfs(&[
            ("a/connections/followers_and_following/following.json", "{}"),
            ("b/connections/followers_and_following/following.json", "{}"),
        ]);

        let location = locate_export_dir(&vfs, DEFAULT_EXPORT_DIR).unwrap();
        assert_eq!(location.base_dir(), "a/connections/followers_and_following");
    }

    #[test]
    fn test_trailing_slash_in_configured_dir() {
        let vfs = vfs(&[("connections/followers_and_following/following.json", "{}")]);

        let location = locate_export_dir(&vfs, "/connections/followers_and_following/").unwrap();
        assert_eq!(location.base_dir(), "connections/followers_and_following");
    }

    #[test]
    fn test_missing_directory() {
        let vfs = vfs(&[("photos/1.jpg", "x"), ("README.txt", "hello")]);

        let err = locate_export_dir(&vfs, DEFAULT_EXPORT_DIR).unwrap_err();
        assert!(matches!(err, RFollowError::MissingDirectory(dir) if dir == DEFAULT_EXPORT_DIR));
    }
}
