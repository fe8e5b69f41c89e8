//! # kiln-storage
//!
//! Dropbox file API client for kiln.
//!
//! Covers folder listing, metadata, temporary preview links, single-file
//! and zipped-folder downloads, and both simple and session-based uploads.
//! A [`DropboxClient`] is short-lived: build one per request with
//! [`DropboxClient::connect`], which exchanges the configured refresh token
//! for an access token.
//!
//! The upload primitives are also exposed through the [`FileStore`] trait
//! so the upload pipeline can run against an in-memory fake in tests.

pub mod folders;
pub mod links;
pub mod transfer;
pub mod types;
pub mod upload;

mod client;
mod error;
mod http;
mod traits;

pub use client::DropboxClient;
pub use error::StorageError;
pub use http::{join_path, normalize_path};
pub use traits::FileStore;
pub use transfer::Download;
pub use types::{Entry, EntryKind, ExplorerItem, FileMetadata, UploadCursor, VersionInfo};
