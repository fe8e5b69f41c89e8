//! Temporary preview links and per-asset version listings.

use crate::client::DropboxClient;
use crate::error::StorageError;
use crate::http::{join_path, normalize_path};
use crate::types::{PathArg, TemporaryLinkResult, VersionInfo};

impl DropboxClient {
    /// Short-lived direct link to a file, used for previews and thumbnails.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the file does not exist.
    pub async fn get_temporary_link(&self, path: &str) -> Result<String, StorageError> {
        let path = normalize_path(path);
        let result: TemporaryLinkResult = self
            .rpc("files/get_temporary_link", &PathArg { path: &path })
            .await?;
        Ok(result.link)
    }

    /// Files under `<root>/<game>/<asset>`, newest first, each with a preview link.
    ///
    /// A file whose link cannot be generated is still listed, with no thumbnail.
    ///
    /// # Errors
    ///
    /// Propagates listing errors for the asset folder.
    pub async fn versions_info(
        &self,
        root: &str,
        game: &str,
        asset: &str,
    ) -> Result<Vec<VersionInfo>, StorageError> {
        let folder = join_path(&join_path(root, game), asset);
        let names = self.list_files(&folder).await?;

        let mut versions = Vec::with_capacity(names.len());
        for name in names {
            let filepath = join_path(&folder, &name);
            let thumbnail_url = match self.get_temporary_link(&filepath).await {
                Ok(link) => Some(link),
                Err(error) => {
                    tracing::warn!(path = %filepath, %error, "no preview link for version");
                    None
                }
            };
            versions.push(VersionInfo {
                filename: name,
                filepath,
                thumbnail_url,
            });
        }
        versions.reverse();
        Ok(versions)
    }
}
