//! Scratch files holding request bodies until they are uploaded.
//!
//! A [`StagedFile`] owns a [`TempPath`]; dropping it deletes the file, so
//! every exit from a handler (success, error, early return) cleans up.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

use crate::versioning::sanitize_file_name;

/// A client upload written to the scratch directory.
#[derive(Debug)]
pub struct StagedFile {
    path: TempPath,
    client_name: String,
    size: u64,
}

impl StagedFile {
    /// Open a new scratch file in `scratch_dir` for the client file `client_name`.
    ///
    /// `client_name` may be a relative path (`Dir/sub/file.png`) when the
    /// browser submitted a directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be created.
    pub async fn create(scratch_dir: &Path, client_name: &str) -> io::Result<StagingWriter> {
        tokio::fs::create_dir_all(scratch_dir).await?;
        let path = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(scratch_dir)?
            .into_temp_path();
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .await?;
        tracing::debug!(path = %path.display(), client_name, "staging upload");
        Ok(StagingWriter {
            file,
            staged: Self {
                path,
                client_name: client_name.to_string(),
                size: 0,
            },
        })
    }

    /// Stage an in-memory body in one go.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the scratch file cannot be written.
    pub async fn write_all(scratch_dir: &Path, client_name: &str, data: &[u8]) -> io::Result<Self> {
        let mut writer = Self::create(scratch_dir, client_name).await?;
        writer.write_chunk(data).await?;
        writer.finish().await
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Sanitized final component of the client name.
    #[must_use]
    pub fn file_name(&self) -> String {
        let last = self
            .client_name
            .rsplit(['/', '\\'])
            .find(|part| !part.is_empty())
            .unwrap_or_default();
        sanitize_file_name(last)
    }

    /// Sanitized components of the client name, in order.
    #[must_use]
    pub fn relative_components(&self) -> Vec<String> {
        self.client_name
            .split(['/', '\\'])
            .filter(|part| !part.is_empty() && *part != "." && *part != "..")
            .map(sanitize_file_name)
            .collect()
    }

    /// Where the scratch file lives; for logging only.
    #[must_use]
    pub fn scratch_path(&self) -> PathBuf {
        self.path.to_path_buf()
    }
}

/// Streams a request body into a [`StagedFile`].
#[derive(Debug)]
pub struct StagingWriter {
    file: tokio::fs::File,
    staged: StagedFile,
}

impl StagingWriter {
    /// # Errors
    ///
    /// Returns an I/O error if the write fails.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk).await?;
        self.staged.size += chunk.len() as u64;
        Ok(())
    }

    /// Flush and hand back the staged file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the flush fails.
    pub async fn finish(mut self) -> io::Result<StagedFile> {
        self.file.flush().await?;
        self.file.sync_all().await?;
        Ok(self.staged)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn staged_file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedFile::write_all(dir.path(), "hero.png", b"pixels")
            .await
            .unwrap();
        let path = staged.scratch_path();
        assert!(path.exists());
        assert_eq!(staged.size(), 6);
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"pixels");

        drop(staged);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn abandoned_writer_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = StagedFile::create(dir.path(), "big.bin").await.unwrap();
        writer.write_chunk(b"partial").await.unwrap();
        drop(writer);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn creates_missing_scratch_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("kiln-scratch").join("uploads");
        let staged = StagedFile::write_all(&nested, "a.txt", b"x").await.unwrap();
        assert!(staged.path().starts_with(&nested));
    }

    #[tokio::test]
    async fn client_names_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedFile::write_all(dir.path(), "Hero Pack/../textures/cape final.png", b"x")
            .await
            .unwrap();
        assert_eq!(staged.file_name(), "cape_final.png");
        assert_eq!(
            staged.relative_components(),
            vec!["Hero_Pack", "textures", "cape_final.png"]
        );
    }
}
