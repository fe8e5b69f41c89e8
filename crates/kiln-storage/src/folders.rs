//! Folder listing and metadata lookups.

use serde::Serialize;

use crate::client::DropboxClient;
use crate::error::StorageError;
use crate::http::normalize_path;
use crate::types::{Entry, ExplorerItem, ListFolderResult, PathArg};

#[derive(Serialize)]
struct ListFolderArg<'a> {
    path: &'a str,
    recursive: bool,
}

#[derive(Serialize)]
struct ContinueArg<'a> {
    cursor: &'a str,
}

impl DropboxClient {
    /// List every entry directly under `path`, following pagination.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] for a missing folder, or any
    /// transport/API error from the listing calls.
    pub async fn list_folder(&self, path: &str) -> Result<Vec<Entry>, StorageError> {
        let path = normalize_path(path);
        let mut page: ListFolderResult = self
            .rpc(
                "files/list_folder",
                &ListFolderArg {
                    path: &path,
                    recursive: false,
                },
            )
            .await?;

        let mut entries = std::mem::take(&mut page.entries);
        while page.has_more {
            page = self
                .rpc(
                    "files/list_folder/continue",
                    &ContinueArg {
                        cursor: &page.cursor,
                    },
                )
                .await?;
            entries.append(&mut page.entries);
        }

        tracing::debug!(path = %path, count = entries.len(), "listed folder");
        Ok(entries)
    }

    /// Names of the sub-folders of `path`.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::list_folder`] errors.
    pub async fn list_folders(&self, path: &str) -> Result<Vec<String>, StorageError> {
        Ok(folder_names(&self.list_folder(path).await?))
    }

    /// Names of the files directly under `path`.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::list_folder`] errors.
    pub async fn list_files(&self, path: &str) -> Result<Vec<String>, StorageError> {
        Ok(file_names(&self.list_folder(path).await?))
    }

    /// Explorer rows (`{name, path_lower, type}`) for `path`.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::list_folder`] errors.
    pub async fn list_entries(&self, path: &str) -> Result<Vec<ExplorerItem>, StorageError> {
        Ok(self
            .list_folder(path)
            .await?
            .iter()
            .filter_map(ExplorerItem::from_entry)
            .collect())
    }

    /// Metadata for a single file or folder.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if nothing exists at `path`.
    pub async fn get_metadata(&self, path: &str) -> Result<Entry, StorageError> {
        let path = normalize_path(path);
        self.rpc("files/get_metadata", &PathArg { path: &path })
            .await
    }
}

pub(crate) fn folder_names(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.is_folder())
        .map(|e| e.name().to_string())
        .collect()
}

pub(crate) fn file_names(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.is_file())
        .map(|e| e.name().to_string())
        .collect()
}
