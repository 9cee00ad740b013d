use crate::locator::ExportLocation;
use crate::normalizer::normalize_slice;
use crate::reconcile::sort_by_recency;
use rfollow_common::{
    DatasetKind, IdentityRecord, OptionalDatasets, RFollowError, Vfs, VfsError,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Read and normalize one dataset. `Ok(None)` means the file is absent.
pub fn read_dataset(
    vfs: &dyn Vfs,
    location: &ExportLocation,
    kind: DatasetKind,
) -> Result<Option<Vec<IdentityRecord>>, RFollowError> {
    let path = location.file_path(kind);
    if !vfs.exists(&path) {
        return Ok(None);
    }

    let data = vfs.read_all(&path).map_err(|e| match e {
        VfsError::InvalidArchive(msg) => RFollowError::CorruptArchive(msg),
        other => RFollowError::Vfs(other),
    })?;

    let records = normalize_slice(&data, kind.schema()).map_err(|source| RFollowError::Schema {
        file: kind.file_name().to_string(),
        source,
    })?;

    debug!("Read {} records from {}", records.len(), path);
    Ok(Some(records))
}

/// Read a dataset the result cannot do without
pub fn read_required(
    vfs: &dyn Vfs,
    location: &ExportLocation,
    kind: DatasetKind,
) -> Result<Vec<IdentityRecord>, RFollowError> {
    read_dataset(vfs, location, kind)?
        .ok_or_else(|| RFollowError::MissingRequiredFile(kind.file_name().to_string()))
}

/// Best-effort read of an auxiliary dataset, sorted most recent first.
/// Every failure yields `None`.
pub fn read_optional(
    vfs: &dyn Vfs,
    location: &ExportLocation,
    kind: DatasetKind,
) -> Option<Vec<IdentityRecord>> {
    match read_dataset(vfs, location, kind) {
        Ok(Some(mut records)) => {
            sort_by_recency(&mut records);
            Some(records)
        }
        Ok(None) => {
            debug!("{} not present, skipping", kind.file_name());
            None
        }
        Err(e) => {
            warn!("Could not read {}, skipping: {}", kind.file_name(), e);
            None
        }
    }
}

/// Gather every auxiliary dataset that can be read.
///
/// Only cancellation is reported as an error.
pub fn collect_optional(
    vfs: &dyn Vfs,
    location: &ExportLocation,
    cancel: Option<&AtomicBool>,
) -> Result<OptionalDatasets, RFollowError> {
    let mut datasets = OptionalDatasets::default();

    for kind in DatasetKind::OPTIONAL {
        if cancel.map_or(false, |flag| flag.load(Ordering::Relaxed)) {
            return Err(RFollowError::Cancelled);
        }

        if let Some(records) = read_optional(vfs, location, kind) {
            datasets.set(kind, records);
        }
    }

    Ok(datasets)
}
