//! Streaming multipart bodies into scratch files.

use std::collections::HashMap;
use std::path::Path;

use axum::extract::Multipart;
use kiln_upload::StagedFile;

use crate::error::AppError;

/// A multipart form with its file parts staged on disk.
#[derive(Debug, Default)]
pub struct StagedForm {
    pub files: HashMap<String, Vec<StagedFile>>,
    pub fields: HashMap<String, String>,
}

impl StagedForm {
    /// Staged files submitted under `name`, in submission order.
    #[must_use]
    pub fn take_files(&mut self, name: &str) -> Vec<StagedFile> {
        self.files.remove(name).unwrap_or_default()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

/// Read every part of `multipart`. File parts without a file name (an
/// empty file input) are skipped.
///
/// # Errors
///
/// `BadRequest` for a malformed body, `Internal` if the scratch directory
/// cannot be written.
pub async fn stage_multipart(
    mut multipart: Multipart,
    scratch_dir: &Path,
) -> Result<StagedForm, AppError> {
    let mut form = StagedForm::default();
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let Some(file_name) = field.file_name().map(str::to_string) else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("malformed form field: {e}")))?;
            form.fields.insert(name, value);
            continue;
        };
        if file_name.is_empty() {
            continue;
        }

        let mut writer = StagedFile::create(scratch_dir, &file_name)
            .await
            .map_err(|e| AppError::Internal(format!("cannot stage upload: {e}")))?;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::BadRequest(format!("upload interrupted: {e}")))?
        {
            writer
                .write_chunk(&chunk)
                .await
                .map_err(|e| AppError::Internal(format!("cannot stage upload: {e}")))?;
        }
        let staged = writer
            .finish()
            .await
            .map_err(|e| AppError::Internal(format!("cannot stage upload: {e}")))?;
        tracing::debug!(field = %name, client_name = %file_name, size = staged.size(), "staged upload");
        form.files.entry(name).or_default().push(staged);
    }
    Ok(form)
}
