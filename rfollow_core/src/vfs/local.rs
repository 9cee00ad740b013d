use jwalk::WalkDir;
use rfollow_common::{Vfs, VfsError};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Export that was already extracted to a local directory
pub struct LocalVfs {
    instance_id: String,
    root: PathBuf,
}

impl LocalVfs {
    pub fn new(root: PathBuf) -> Result<Self, VfsError> {
        if !root.is_dir() {
            return Err(VfsError::NotADirectory(root.display().to_string()));
        }

        let instance_id = format!("local:{}", root.display());
        Ok(Self { instance_id, root })
    }

    fn full_path(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

impl Vfs for LocalVfs {
    fn instance_id(&self) -> &str {
        &self.instance_id
    }

    fn entries(&self) -> Result<Vec<String>, VfsError> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root).sort(true).skip_hidden(false);
        for entry in walker {
            let entry = entry.map_err(|e| {
                VfsError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Walk error: {}", e),
                ))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if let Some(relative) = relative_key(&self.root, &path) {
                entries.push(relative);
            }
        }

        Ok(entries)
    }

    fn open_file(&self, path: &str) -> Result<Box<dyn Read + Send>, VfsError> {
        let full_path = self.full_path(path);

        if !full_path.exists() {
            return Err(VfsError::NotFound(path.to_string()));
        }
        if !full_path.is_file() {
            return Err(VfsError::NotAFile(full_path.display().to_string()));
        }

        let file = fs::File::open(&full_path)?;
        Ok(Box::new(file))
    }

    fn exists(&self, path: &str) -> bool {
        self.full_path(path).is_file()
    }
}

/// `/`-separated path of `path` relative to `root`
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
