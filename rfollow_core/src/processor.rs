use crate::aggregate::{collect_optional, read_required};
use crate::locator::locate_export_dir;
use crate::reconcile::reconcile;
use crate::vfs::{LocalVfs, ZipVfs};
use rfollow_common::{
    AppConfig, DatasetKind, RFollowError, ReconciliationResult, Vfs, VfsError,
};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Runs the whole export pipeline for one input
pub struct ExportProcessor {
    config: AppConfig,
}

impl ExportProcessor {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Reject inputs that are empty or larger than the configured ceiling
    pub fn check_input_size(&self, size: u64) -> Result<(), RFollowError> {
        if size == 0 {
            return Err(RFollowError::EmptyInput);
        }
        if size > self.config.max_archive_bytes {
            return Err(RFollowError::InputTooLarge {
                size,
                limit: self.config.max_archive_bytes,
            });
        }
        Ok(())
    }

    /// Process an archive held in memory
    pub fn process_bytes(&self, data: Vec<u8>) -> Result<ReconciliationResult, RFollowError> {
        self.process_with_cancel(data, None)
    }

    /// Process an archive held in memory, checking `cancel` between stages
    pub fn process_with_cancel(
        &self,
        data: Vec<u8>,
        cancel: Option<&AtomicBool>,
    ) -> Result<ReconciliationResult, RFollowError> {
        self.check_input_size(data.len() as u64)?;
        checkpoint(cancel)?;

        let vfs = open_archive(data)?.with_entry_limit(self.config.max_archive_bytes);
        self.process_vfs(&vfs, cancel)
    }

    /// Process a `.zip` export file or an extracted export directory
    pub fn process_path(&self, path: &Path) -> Result<ReconciliationResult, RFollowError> {
        if path.is_dir() {
            info!("Reading extracted export from {}", path.display());
            let vfs = LocalVfs::new(path.to_path_buf())?;
            return self.process_vfs(&vfs, None);
        }

        if !path.is_file() {
            return Err(RFollowError::Vfs(VfsError::NotFound(path.display().to_string())));
        }
        if !has_zip_extension(path) {
            return Err(RFollowError::UnsupportedInput(format!(
                "{} is not a .zip file",
                path.display()
            )));
        }

        let size = fs::metadata(path)?.len();
        self.check_input_size(size)?;

        info!("Reading archive {} ({} bytes)", path.display(), size);
        let data = fs::read(path)?;
        self.process_bytes(data)
    }

    /// Run locator, normalizer, reconciliation and aggregation over `vfs`
    pub fn process_vfs(
        &self,
        vfs: &dyn Vfs,
        cancel: Option<&AtomicBool>,
    ) -> Result<ReconciliationResult, RFollowError> {
        let location = locate_export_dir(vfs, &self.config.export_dir)?;
        info!("Using export folder {}", location.base_dir());

        checkpoint(cancel)?;
        let followers = read_required(vfs, &location, DatasetKind::Followers)?;

        checkpoint(cancel)?;
        let following = read_required(vfs, &location, DatasetKind::Following)?;

        let mut result = reconcile(&followers, &following);

        if self.config.include_optional {
            result.optional = collect_optional(vfs, &location, cancel)?;
        }

        checkpoint(cancel)?;
        Ok(result)
    }
}

impl Default for ExportProcessor {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

fn open_archive(data: Vec<u8>) -> Result<ZipVfs, RFollowError> {
    ZipVfs::from_bytes(data).map_err(|e| match e {
        VfsError::InvalidArchive(msg) => RFollowError::CorruptArchive(msg),
        VfsError::Io(err) => RFollowError::CorruptArchive(err.to_string()),
        other => RFollowError::Vfs(other),
    })
}

fn checkpoint(cancel: Option<&AtomicBool>) -> Result<(), RFollowError> {
    if cancel.map_or(false, |flag| flag.load(Ordering::Relaxed)) {
        return Err(RFollowError::Cancelled);
    }
    Ok(())
}

fn has_zip_extension(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("zip"))
}
