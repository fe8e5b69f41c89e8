//! Single-file and zipped-folder downloads.

use bytes::Bytes;

use crate::client::DropboxClient;
use crate::error::StorageError;
use crate::http::normalize_path;
use crate::types::{Entry, PathArg};

/// A downloaded payload ready to be served as an attachment.
#[derive(Debug, Clone)]
pub struct Download {
    /// Suggested file name for `Content-Disposition`.
    pub file_name: String,
    pub bytes: Bytes,
    pub is_zip: bool,
}

impl DropboxClient {
    /// Download one file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the file does not exist.
    pub async fn download(&self, path: &str) -> Result<Bytes, StorageError> {
        let path = normalize_path(path);
        self.content_download("files/download", &PathArg { path: &path })
            .await
    }

    /// Download a whole folder as a zip archive.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the folder does not exist.
    pub async fn download_zip(&self, path: &str) -> Result<Bytes, StorageError> {
        let path = normalize_path(path);
        self.content_download("files/download_zip", &PathArg { path: &path })
            .await
    }

    /// Download `path` as a file or, for folders, as `<name>.zip`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] for missing or deleted paths.
    pub async fn download_path(&self, path: &str) -> Result<Download, StorageError> {
        match self.get_metadata(path).await? {
            Entry::File(file) => Ok(Download {
                bytes: self.download(path).await?,
                file_name: file.name,
                is_zip: false,
            }),
            Entry::Folder(folder) => Ok(Download {
                bytes: self.download_zip(path).await?,
                file_name: format!("{}.zip", folder.name),
                is_zip: true,
            }),
            Entry::Deleted(_) => Err(StorageError::NotFound(normalize_path(path))),
        }
    }
}
