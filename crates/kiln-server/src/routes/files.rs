//! Upload, download, explorer, and preview routes backed by Dropbox.

use axum::Form;
use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use kiln_core::responses::MessageBody;
use kiln_storage::{DropboxClient, ExplorerItem, StorageError, join_path};
use kiln_upload::UploadPipeline;
use serde::Deserialize;

use crate::body::non_empty;
use crate::error::AppError;
use crate::session::CurrentUser;
use crate::state::AppState;
use crate::uploads::stage_multipart;
use crate::views::{DownloadPage, ExplorerPage, PreviewLink, UploadPage};

/// Folder the download browser starts from.
const DOWNLOAD_ROOT: &str = "";

/// Listing failures degrade to an empty list so the page still renders.
fn or_empty<T>(result: Result<Vec<T>, StorageError>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|error| {
        tracing::warn!(%error, what, "listing failed");
        Vec::new()
    })
}

pub async fn upload_page(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<UploadPage>, AppError> {
    let dropbox = state.dropbox().await?;
    Ok(Json(UploadPage {
        folder_options: or_empty(dropbox.list_folders("").await, "folder options"),
    }))
}

/// Upload loose files (`file` parts) and/or one directory tree
/// (`directory` parts) into the top-level folder named by `folder`.
pub async fn upload(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<MessageBody>), AppError> {
    let mut form = stage_multipart(multipart, state.scratch_dir()).await?;
    let files = form.take_files("file");
    let directory = form.take_files("directory");
    if files.is_empty() && directory.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(MessageBody::new("No files were uploaded.")),
        ));
    }
    let Some(folder) = form.field("folder").map(str::to_string) else {
        return Err(AppError::BadRequest("No destination folder selected.".into()));
    };

    let dropbox = state.dropbox().await?;
    if !dropbox.list_folders("").await?.contains(&folder) {
        return Err(AppError::BadRequest(format!("Unknown folder '{folder}'")));
    }
    let dest = join_path("", &folder);

    let db = state.db();
    let pipeline = UploadPipeline::new(&dropbox, &db, state.upload_settings());
    let mut failures = Vec::new();

    for staged in &files {
        if let Err(error) = pipeline.upload_file(&user.email, staged, &dest).await {
            failures.push(format!("{}: {error}", staged.client_name()));
        }
    }

    if !directory.is_empty() {
        match pipeline.upload_folder(&user.email, &directory, &dest).await {
            Ok(report) => failures.extend(
                report
                    .failed
                    .into_iter()
                    .map(|f| format!("{}: {}", f.path, f.error)),
            ),
            Err(error) => failures.push(error.to_string()),
        }
    }

    if failures.is_empty() {
        Ok((
            StatusCode::OK,
            Json(MessageBody::new("Files uploaded successfully.")),
        ))
    } else {
        Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageBody::new(format!(
                "Some files failed to upload: {}",
                failures.join("; ")
            ))),
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadForm {
    #[serde(default)]
    game: Option<String>,
    #[serde(default)]
    asset: Option<String>,
}

pub async fn download_page(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<DownloadPage>, AppError> {
    let dropbox = state.dropbox().await?;
    Ok(Json(browse(&dropbox, None, None).await))
}

pub async fn download_select(
    State(state): State<AppState>,
    _user: CurrentUser,
    Form(form): Form<DownloadForm>,
) -> Result<Json<DownloadPage>, AppError> {
    let dropbox = state.dropbox().await?;
    let game = non_empty(form.game);
    let asset = non_empty(form.asset);
    Ok(Json(browse(&dropbox, game, asset).await))
}

async fn browse(
    dropbox: &DropboxClient,
    selected_game: Option<String>,
    selected_asset: Option<String>,
) -> DownloadPage {
    let games = or_empty(dropbox.list_folders(DOWNLOAD_ROOT).await, "games");
    let assets = match &selected_game {
        Some(game) => or_empty(
            dropbox.list_folders(&join_path(DOWNLOAD_ROOT, game)).await,
            "assets",
        ),
        None => Vec::new(),
    };
    let versions = match (&selected_game, &selected_asset) {
        (Some(game), Some(asset)) => or_empty(
            dropbox.versions_info(DOWNLOAD_ROOT, game, asset).await,
            "versions",
        ),
        _ => Vec::new(),
    };
    DownloadPage {
        games,
        selected_game,
        assets,
        selected_asset,
        versions,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PathQuery {
    #[serde(default)]
    path: Option<String>,
}

/// Serve a file, or a folder as a zip, as an attachment.
pub async fn download_file_folder(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Response, AppError> {
    let Some(path) = non_empty(query.path) else {
        return Err(AppError::BadRequest("No path provided".into()));
    };
    let dropbox = state.dropbox().await?;
    let download = dropbox.download_path(&join_path("", &path)).await?;

    let content_type = if download.is_zip {
        "application/zip"
    } else {
        "application/octet-stream"
    };
    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(&download.file_name)
    );
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.bytes,
    )
        .into_response())
}

pub async fn explorer(State(state): State<AppState>) -> Result<Json<ExplorerPage>, AppError> {
    let dropbox = state.dropbox().await?;
    Ok(Json(ExplorerPage {
        files: or_empty(dropbox.list_entries("").await, "explorer root"),
    }))
}

pub async fn folder(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<Vec<ExplorerItem>>, AppError> {
    let path = query.path.unwrap_or_default();
    let dropbox = state.dropbox().await?;
    Ok(Json(or_empty(dropbox.list_entries(&path).await, "folder")))
}

/// Temporary link for previewing one file.
pub async fn preview_asset(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<PathQuery>,
) -> Result<Json<PreviewLink>, AppError> {
    let Some(path) = non_empty(query.path) else {
        return Err(AppError::BadRequest("Path parameter is required".into()));
    };
    let dropbox = state.dropbox().await?;
    match dropbox.get_temporary_link(&path).await {
        Ok(url) => Ok(Json(PreviewLink { url })),
        Err(error) => {
            tracing::warn!(path = %path, %error, "preview link failed");
            Err(AppError::NotFound("Failed to get image URL".into()))
        }
    }
}
