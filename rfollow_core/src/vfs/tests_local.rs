#[cfg(test)]
mod tests {
    use crate::vfs::LocalVfs;
    use rfollow_common::{Vfs, VfsError};
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &std::path::Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(path, contents).expect("Failed to write file");
    }

    #[test]
    fn test_local_vfs_requires_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        assert!(matches!(LocalVfs::new(file), Err(VfsError::NotADirectory(_))));
    }

    #[test]
    fn test_local_vfs_entries_are_sorted_relative_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write(temp_dir.path(), "b.json", "{}");
        write(temp_dir.path(), "a/nested/c.json", "[]");
        fs::create_dir_all(temp_dir.path().join("empty")).unwrap();

        let vfs = LocalVfs::new(temp_dir.path().to_path_buf()).unwrap();
        let entries = vfs.entries().expect("Failed to list entries");

        assert_eq!(entries, vec!["a/nested/c.json", "b.json"]);
    }

    #[test]
    fn test_local_vfs_read_and_exists() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write(temp_dir.path(), "dir/data.json", "[1]");

        let vfs = LocalVfs::new(temp_dir.path().to_path_buf()).unwrap();
        assert!(vfs.exists("dir/data.json"));
        assert!(!vfs.exists("dir"));
        assert_eq!(vfs.read_all("dir/data.json").unwrap(), b"[1]");
    }

    #[test]
    fn test_local_vfs_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let vfs = LocalVfs::new(temp_dir.path().to_path_buf()).unwrap();

        assert!(matches!(vfs.open_file("nope.json"), Err(VfsError::NotFound(_))));
    }
}
