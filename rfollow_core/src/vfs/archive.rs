use rfollow_common::{Vfs, VfsError, DEFAULT_MAX_ARCHIVE_BYTES};
use std::io::{Cursor, Read};
use zip::result::ZipError;
use zip::ZipArchive;

/// ZIP archive VFS held entirely in memory (read-only)
pub struct ZipVfs {
    instance_id: String,
    data: Vec<u8>,
    names: Vec<String>,
    max_entry_bytes: u64,
}

impl ZipVfs {
    /// Parse the central directory of `data`; fails for anything that is not
    /// a readable ZIP archive
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, VfsError> {
        let names = {
            let mut archive = ZipArchive::new(Cursor::new(data.as_slice()))
                .map_err(|e| VfsError::InvalidArchive(e.to_string()))?;

            let mut names = Vec::with_capacity(archive.len());
            for i in 0..archive.len() {
                let file = archive
                    .by_index(i)
                    .map_err(|e| VfsError::InvalidArchive(e.to_string()))?;
                names.push(file.name().to_string());
            }
            names
        };

        let instance_id = format!("zip:memory:{}", data.len());
        Ok(Self {
            instance_id,
            data,
            names,
            max_entry_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
        })
    }

    /// Cap on the decompressed size of a single entry
    pub fn with_entry_limit(mut self, max_entry_bytes: u64) -> Self {
        self.max_entry_bytes = max_entry_bytes;
        self
    }

    fn open_archive(&self) -> Result<ZipArchive<Cursor<&[u8]>>, VfsError> {
        ZipArchive::new(Cursor::new(self.data.as_slice()))
            .map_err(|e| VfsError::InvalidArchive(e.to_string()))
    }
}

impl Vfs for ZipVfs {
    fn instance_id(&self) -> &str {
        &self.instance_id
    }

    fn entries(&self) -> Result<Vec<String>, VfsError> {
        Ok(self.names.clone())
    }

    fn open_file(&self, path: &str) -> Result<Box<dyn Read + Send>, VfsError> {
        let mut archive = self.open_archive()?;

        let mut file = archive.by_name(path).map_err(|e| match e {
            ZipError::FileNotFound => VfsError::NotFound(path.to_string()),
            ZipError::Io(err) => VfsError::Io(err),
            other => VfsError::InvalidArchive(other.to_string()),
        })?;

        if file.is_dir() {
            return Err(VfsError::NotAFile(path.to_string()));
        }

        let mut contents = Vec::new();
        file.by_ref()
            .take(self.max_entry_bytes.saturating_add(1))
            .read_to_end(&mut contents)?;
        if contents.len() as u64 > self.max_entry_bytes {
            return Err(VfsError::InvalidArchive(format!(
                "{} expands beyond {} bytes",
                path, self.max_entry_bytes
            )));
        }

        Ok(Box::new(Cursor::new(contents)))
    }

    fn exists(&self, path: &str) -> bool {
        self.names.iter().any(|name| name == path)
    }
}
