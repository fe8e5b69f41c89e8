//! # kiln-upload
//!
//! Turns staged browser uploads into committed, versioned storage objects.
//!
//! - [`versioning`] strips an old timestamp suffix and applies a fresh one.
//! - [`retry`] runs one storage request with exponential backoff.
//! - [`chunked`] picks a single request or an upload session by size and
//!   keeps the session offset in step with the bytes read.
//! - [`pipeline`] ties these together for single files and folder batches
//!   and writes the activity log row.
//! - [`staging`] owns the scratch files the web layer writes request bodies to.

pub mod chunked;
pub mod error;
pub mod pipeline;
pub mod retry;
pub mod staging;
pub mod versioning;

pub use chunked::UploadSettings;
pub use error::UploadError;
pub use pipeline::{FailedFile, FolderReport, UploadPipeline, UploadedFile};
pub use retry::RetryPolicy;
pub use staging::{StagedFile, StagingWriter};
