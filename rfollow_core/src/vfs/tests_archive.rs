#[cfg(test)]
mod tests {
    use crate::test_support::zip_bytes;
    use crate::vfs::ZipVfs;
    use rfollow_common::{Vfs, VfsError};
    use std::io::Read;

    // ============================================================================
    // In-memory ZIP
    // ============================================================================

    #[test]
    fn test_zip_vfs_lists_entries_in_archive_order() {
        let data = zip_bytes(&[("b.txt", "b"), ("a/c.txt", "c"), ("a.txt", "a")]);
        let vfs = ZipVfs::from_bytes(data).expect("Failed to open ZIP");

        let entries = vfs.entries().expect("Failed to list entries");
        assert_eq!(entries, vec!["b.txt", "a/c.txt", "a.txt"]);
        assert!(vfs.instance_id().starts_with("zip:"));
    }

    #[test]
    fn test_zip_vfs_read_file() {
        let data = zip_bytes(&[("dir/data.txt", "Test data content")]);
        let vfs = ZipVfs::from_bytes(data).expect("Failed to open ZIP");

        let mut reader = vfs.open_file("dir/data.txt").expect("Failed to open file");
        let mut buffer = String::new();
        reader.read_to_string(&mut buffer).expect("Failed to read");
        assert_eq!(buffer, "Test data content");

        assert_eq!(vfs.read_all("dir/data.txt").unwrap(), b"Test data content");
    }

    #[test]
    fn test_zip_vfs_exists() {
        let data = zip_bytes(&[("dir/data.txt", "x")]);
        let vfs = ZipVfs::from_bytes(data).expect("Failed to open ZIP");

        assert!(vfs.exists("dir/data.txt"));
        assert!(!vfs.exists("dir/other.txt"));
        assert!(!vfs.exists("data.txt"));
    }

    #[test]
    fn test_zip_vfs_missing_file() {
        let data = zip_bytes(&[("data.txt", "x")]);
        let vfs = ZipVfs::from_bytes(data).expect("Failed to open ZIP");

        let result = vfs.open_file("missing.txt");
        assert!(matches!(result, Err(VfsError::NotFound(_))));
    }

    #[test]
    fn test_zip_vfs_rejects_non_archive() {
        let result = ZipVfs::from_bytes(b"this is not a zip file at all".to_vec());
        assert!(matches!(result, Err(VfsError::InvalidArchive(_))));
    }

    #[test]
    fn test_zip_vfs_rejects_truncated_archive() {
        let mut data = zip_bytes(&[("data.txt", "some content")]);
        data.truncate(data.len() / 2);

        let result = ZipVfs::from_bytes(data);
        assert!(result.is_err(), "Should fail for truncated archive");
    }

    #[test]
    fn test_zip_vfs_entry_limit() {
        let big = "x".repeat(4096);
        let data = zip_bytes(&[("big.txt", big.as_str()), ("small.txt", "tiny")]);
        let vfs = ZipVfs::from_bytes(data)
            .expect("Failed to open ZIP")
            .with_entry_limit(1024);

        let result = vfs.read_all("big.txt");
        assert!(matches!(result, Err(VfsError::InvalidArchive(_))));
        assert_eq!(vfs.read_all("small.txt").unwrap(), b"tiny");
    }

    #[test]
    fn test_zip_vfs_entry_at_limit_is_read() {
        let data = zip_bytes(&[("exact.txt", "12345678")]);
        let vfs = ZipVfs::from_bytes(data)
            .expect("Failed to open ZIP")
            .with_entry_limit(8);

        assert_eq!(vfs.read_all("exact.txt").unwrap(), b"12345678");
    }
}
