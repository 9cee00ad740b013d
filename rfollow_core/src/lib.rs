pub mod vfs;
pub mod locator;
pub mod normalizer;
pub mod reconcile;
pub mod aggregate;
pub mod processor;
pub mod report;

#[cfg(test)]
mod test_support;

pub use vfs::{LocalVfs, ZipVfs};
pub use locator::{locate_export_dir, ExportLocation};
pub use normalizer::{normalize_slice, normalize_value};
pub use reconcile::{dedup_by_handle, reconcile, sort_by_recency};
pub use aggregate::{collect_optional, read_optional, read_required};
pub use processor::ExportProcessor;
pub use report::{filter_result, search_handles, ExportReport, Statistics};
