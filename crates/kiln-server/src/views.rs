//! JSON view models for page routes.

use kiln_core::entities::{Assignment, SessionUser};
use kiln_storage::{ExplorerItem, VersionInfo};
use serde::Serialize;

use crate::flash::FlashMessage;

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub user: Option<SessionUser>,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub flashes: Vec<FlashMessage>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentsPage {
    pub assignments: Vec<Assignment>,
    pub users: Vec<String>,
    pub asset_path: Option<String>,
    pub flashes: Vec<FlashMessage>,
}

#[derive(Debug, Serialize)]
pub struct UploadPage {
    pub folder_options: Vec<String>,
}

/// Game → asset → versions drill-down.
#[derive(Debug, Default, Serialize)]
pub struct DownloadPage {
    pub games: Vec<String>,
    pub selected_game: Option<String>,
    pub assets: Vec<String>,
    pub selected_asset: Option<String>,
    pub versions: Vec<VersionInfo>,
}

#[derive(Debug, Serialize)]
pub struct ExplorerPage {
    pub files: Vec<ExplorerItem>,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordPage {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewLink {
    pub url: String,
}

/// The password-reset page takes its tokens from the URL fragment
/// client-side; the server supplies nothing.
#[derive(Debug, Default, Serialize)]
pub struct EmptyPage {}
