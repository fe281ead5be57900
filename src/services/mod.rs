//! Upload service implementations.
//!
//! - Upload: single-file signed upload with unsigned fallback
//! - Batch: concurrent multi-file uploads with per-file results

mod batch;
mod upload;

pub use batch::{BatchItem, BatchOptions, BatchUploadError, BatchUploadReport};
pub use upload::UploadService;
