//! Dashboard, review comments, and approval.

use axum::Json;
use axum::extract::{Path, State};
use bytes::Bytes;
use kiln_core::entities::{Comment, NewComment};
use kiln_core::responses::MessageBody;
use kiln_db::DashboardView;
use serde::Deserialize;

use crate::body::parse_json;
use crate::error::AppError;
use crate::session::CurrentUser;
use crate::state::AppState;

pub async fn dashboard(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<DashboardView>, AppError> {
    let entries = state.db().list_activity().await?;
    Ok(Json(DashboardView::from_log(entries)))
}

pub async fn get_comments(
    State(state): State<AppState>,
    Path(activity_id): Path<i64>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.db().comments_for_activity(activity_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    activity_log_id: i64,
    comment: String,
}

/// Attach a comment by the logged-in user to an activity row.
pub async fn add_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Bytes,
) -> Result<Json<Comment>, AppError> {
    let request: AddCommentRequest = parse_json(&body)?;
    if request.comment.trim().is_empty() {
        return Err(AppError::BadRequest("Comment text is required".into()));
    }
    let created = state
        .db()
        .add_comment(&NewComment {
            activity_log_id: request.activity_log_id,
            author: user.email,
            comment: request.comment,
        })
        .await?;
    Ok(Json(created))
}

/// Approve an upload that is awaiting review. Anything else is a 409.
pub async fn approve_asset(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageBody>, AppError> {
    state.db().approve_activity(id).await?;
    tracing::info!(id, approved_by = %user.email, "asset approved");
    Ok(Json(MessageBody::new("Asset approved successfully")))
}
