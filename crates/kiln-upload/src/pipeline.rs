//! Upload orchestration: versioned names, chunked transfer, activity rows.

use chrono::{NaiveDateTime, Utc};
use kiln_core::entities::NewActivity;
use kiln_core::enums::ActionType;
use kiln_db::ActivityStore;
use kiln_storage::{FileStore, join_path};
use serde::Serialize;

use crate::chunked::{UploadSettings, upload_file};
use crate::error::UploadError;
use crate::staging::StagedFile;
use crate::versioning::{strip_version_suffix, timestamp, versioned_file_name};

/// Fallback name for a folder batch whose files carry no directory.
const DEFAULT_FOLDER_NAME: &str = "upload";

/// One committed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    pub name: String,
    pub path: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub path: String,
    pub error: String,
}

/// Outcome of a folder batch. Every file is attempted regardless of
/// earlier failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderReport {
    pub folder_name: String,
    pub folder_path: String,
    pub uploaded: Vec<String>,
    pub failed: Vec<FailedFile>,
}

impl FolderReport {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Uploads staged files and records each outcome in the activity log.
pub struct UploadPipeline<'a> {
    store: &'a dyn FileStore,
    activity: &'a dyn ActivityStore,
    settings: UploadSettings,
}

impl<'a> UploadPipeline<'a> {
    #[must_use]
    pub fn new(
        store: &'a dyn FileStore,
        activity: &'a dyn ActivityStore,
        settings: UploadSettings,
    ) -> Self {
        Self {
            store,
            activity,
            settings,
        }
    }

    /// Upload one file into `dest_folder` under a freshly versioned name.
    ///
    /// # Errors
    ///
    /// Returns the upload error after a `failure` row has been recorded, or
    /// [`UploadError::Database`] if the upload succeeded but the row could
    /// not be written.
    pub async fn upload_file(
        &self,
        user_email: &str,
        staged: &StagedFile,
        dest_folder: &str,
    ) -> Result<UploadedFile, UploadError> {
        self.upload_file_at(user_email, staged, dest_folder, Utc::now().naive_utc())
            .await
    }

    /// [`Self::upload_file`] with an explicit version time.
    ///
    /// # Errors
    ///
    /// See [`Self::upload_file`].
    pub async fn upload_file_at(
        &self,
        user_email: &str,
        staged: &StagedFile,
        dest_folder: &str,
        now: NaiveDateTime,
    ) -> Result<UploadedFile, UploadError> {
        let name = versioned_file_name(&staged.file_name(), &timestamp(now));
        let path = join_path(dest_folder, &name);

        let result = upload_file(self.store, staged.path(), &path, &self.settings).await;
        if let Err(error) = &result {
            tracing::error!(path = %path, %error, "file upload failed");
        }

        let row = NewActivity::upload(user_email, ActionType::Upload, &name, &path, result.is_ok());
        self.record(row, result.is_ok()).await?;

        let meta = result?;
        Ok(UploadedFile {
            name,
            path,
            size: meta.size,
        })
    }

    /// Upload a client directory tree as one batch.
    ///
    /// The top-level directory is renamed with a single shared version
    /// stamp; files inside keep their (sanitized) relative paths. One
    /// `upload_folder` row is recorded, `failure` if any file failed.
    ///
    /// # Errors
    ///
    /// [`UploadError::EmptyBatch`] for no files; [`UploadError::Database`]
    /// if the batch row cannot be written. Individual file failures are
    /// reported in the returned [`FolderReport`].
    pub async fn upload_folder(
        &self,
        user_email: &str,
        files: &[StagedFile],
        dest_folder: &str,
    ) -> Result<FolderReport, UploadError> {
        self.upload_folder_at(user_email, files, dest_folder, Utc::now().naive_utc())
            .await
    }

    /// [`Self::upload_folder`] with an explicit version time.
    ///
    /// # Errors
    ///
    /// See [`Self::upload_folder`].
    pub async fn upload_folder_at(
        &self,
        user_email: &str,
        files: &[StagedFile],
        dest_folder: &str,
        now: NaiveDateTime,
    ) -> Result<FolderReport, UploadError> {
        let Some(first) = files.first() else {
            return Err(UploadError::EmptyBatch);
        };
        let top = match first.relative_components().as_slice() {
            [dir, _, ..] => dir.clone(),
            _ => DEFAULT_FOLDER_NAME.to_string(),
        };
        let folder_name = format!("{}_{}", strip_version_suffix(&top), timestamp(now));
        let folder_path = join_path(dest_folder, &folder_name);

        let mut report = FolderReport {
            folder_name,
            folder_path,
            uploaded: Vec::with_capacity(files.len()),
            failed: Vec::new(),
        };

        for staged in files {
            let components = staged.relative_components();
            let inner = match components.as_slice() {
                [_, rest @ ..] if !rest.is_empty() => rest.join("/"),
                _ => staged.file_name(),
            };
            let path = join_path(&report.folder_path, &inner);
            match upload_file(self.store, staged.path(), &path, &self.settings).await {
                Ok(_) => report.uploaded.push(path),
                Err(error) => {
                    tracing::error!(path = %path, %error, "folder file upload failed");
                    report.failed.push(FailedFile {
                        path,
                        error: error.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            folder = %report.folder_path,
            uploaded = report.uploaded.len(),
            failed = report.failed.len(),
            "folder upload finished"
        );

        let row = NewActivity::upload(
            user_email,
            ActionType::UploadFolder,
            &report.folder_name,
            &report.folder_path,
            report.succeeded(),
        );
        self.record(row, true).await?;
        Ok(report)
    }

    /// Write an activity row. A write failure is returned only when
    /// `must_succeed`; otherwise it is logged so the upload error wins.
    async fn record(&self, row: NewActivity, must_succeed: bool) -> Result<(), UploadError> {
        match self.activity.record_activity(&row).await {
            Ok(_) => Ok(()),
            Err(error) if must_succeed => Err(error.into()),
            Err(error) => {
                tracing::error!(path = %row.path, %error, "failed to record upload failure");
                Ok(())
            }
        }
    }
}
