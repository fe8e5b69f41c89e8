//! Assignment listing, creation, and submission.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::response::Redirect;
use axum_extra::extract::SignedCookieJar;
use bytes::Bytes;
use kiln_core::entities::NewAssignment;
use kiln_core::responses::ApiMessage;
use kiln_db::DatabaseError;
use kiln_upload::UploadPipeline;

use crate::body::parse_json;
use crate::error::AppError;
use crate::flash;
use crate::session::CurrentUser;
use crate::state::AppState;
use crate::uploads::stage_multipart;
use crate::views::AssignmentsPage;

pub async fn list(
    state: State<AppState>,
    user: CurrentUser,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Json<AssignmentsPage>), AppError> {
    render(state, user, jar, None).await
}

/// Same page, with the asset path pre-selected for a new assignment.
pub async fn list_for_asset(
    state: State<AppState>,
    user: CurrentUser,
    jar: SignedCookieJar,
    Path(asset_path): Path<String>,
) -> Result<(SignedCookieJar, Json<AssignmentsPage>), AppError> {
    render(state, user, jar, Some(asset_path)).await
}

async fn render(
    State(state): State<AppState>,
    _user: CurrentUser,
    jar: SignedCookieJar,
    asset_path: Option<String>,
) -> Result<(SignedCookieJar, Json<AssignmentsPage>), AppError> {
    let assignments = state.db().list_assignments().await?;
    let (jar, flashes) = flash::take(jar);
    Ok((
        jar,
        Json(AssignmentsPage {
            assignments,
            users: state.config().team.members.clone(),
            asset_path,
            flashes,
        }),
    ))
}

/// Create an assignment from a JSON body. `assigned_by` defaults to the
/// logged-in user.
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Bytes,
) -> Result<Json<ApiMessage>, AppError> {
    let mut new: NewAssignment = parse_json(&body)?;
    if new.assigned_by.trim().is_empty() {
        new.assigned_by = user.email;
    }
    new.validate()?;
    state.db().create_assignment(&new).await?;
    Ok(Json(ApiMessage::success_bare()))
}

/// Upload the deliverable for an open assignment into `/<asset_path>`,
/// then mark the assignment completed.
///
/// Unknown or completed assignments are refused before anything is staged.
/// The assignment is left open if the upload fails.
pub async fn submit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: SignedCookieJar,
    Path((id, asset_path)): Path<(i64, String)>,
    multipart: Multipart,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let back = Redirect::to("/assignments");
    let db = state.db();

    match db.get_assignment(id).await {
        Ok(assignment) if assignment.ensure_open().is_ok() => {}
        Ok(_) | Err(DatabaseError::NotFound { .. }) => {
            tracing::info!(id, "submission refused for unknown or completed assignment");
            return Ok((
                flash::error(jar, "Invalid or already completed assignment."),
                back,
            ));
        }
        Err(error) => return Err(error.into()),
    }

    let mut form = stage_multipart(multipart, state.scratch_dir()).await?;
    let Some(staged) = form.take_files("file").into_iter().next() else {
        return Ok((flash::error(jar, "No file was uploaded."), back));
    };

    let dropbox = state.dropbox().await?;
    let pipeline = UploadPipeline::new(&dropbox, &db, state.upload_settings());
    let dest = format!("/{}", asset_path.trim_start_matches('/'));

    let jar = match pipeline.upload_file(&user.email, &staged, &dest).await {
        Ok(uploaded) => match db.complete_assignment(id).await {
            Ok(_) => {
                tracing::info!(id, path = %uploaded.path, "assignment submitted");
                flash::success(jar, "Assignment submitted successfully.")
            }
            Err(error) => {
                tracing::error!(id, %error, "uploaded but could not complete assignment");
                flash::error(jar, format!("File uploaded, but the assignment was not closed: {error}"))
            }
        },
        Err(error) => {
            tracing::error!(id, %error, "assignment upload failed");
            flash::error(jar, format!("Error uploading file: {error}"))
        }
    };
    Ok((jar, back))
}
