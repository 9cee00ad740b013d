use crate::VfsError;
use std::io::Read;

/// Read-only virtual file system over an export
///
/// This trait allows rfollow to treat a ZIP archive held in memory and an
/// export that was already extracted to disk uniformly. Paths are relative
/// to the export root and always use `/` as separator.
pub trait Vfs: Send + Sync {
    /// Uniquely identifies the VFS instance (e.g., "zip:memory", "local:/tmp/export")
    fn instance_id(&self) -> &str;

    /// Lists every entry path, in a stable order
    fn entries(&self) -> Result<Vec<String>, VfsError>;

    /// Opens a file for reading (returns a Read trait object)
    fn open_file(&self, path: &str) -> Result<Box<dyn Read + Send>, VfsError>;

    /// Checks if a file exists
    fn exists(&self, path: &str) -> bool;

    /// Reads a whole file into memory
    fn read_all(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        let mut reader = self.open_file(path)?;
        let mut contents = Vec::new();
        reader.read_to_end(&mut contents)?;
        Ok(contents)
    }
}

/// Joins a relative directory and a file name with `/`
pub fn join_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}
