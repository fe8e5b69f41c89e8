//! Route table.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod account;
pub mod assignments;
pub mod files;
pub mod review;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(account::index))
        .route("/login", get(account::login_page))
        .route("/supabase_login", post(account::supabase_login))
        .route("/logout", get(account::logout))
        .route("/reset", get(account::reset_page))
        .route("/reset_password", post(account::reset_password))
        .route(
            "/change_password",
            get(account::change_password_page).post(account::change_password),
        )
        .route("/dashboard", get(review::dashboard))
        .route("/get_comments/{activity_id}", get(review::get_comments))
        .route("/add_comment", post(review::add_comment))
        .route("/approve_asset/{id}", post(review::approve_asset))
        .route("/assignments", get(assignments::list))
        .route("/assignments/{*asset_path}", get(assignments::list_for_asset))
        .route("/add_assignment", post(assignments::add))
        .route(
            "/submit_assignment/{id}/{*asset_path}",
            post(assignments::submit).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/upload",
            get(files::upload_page)
                .post(files::upload)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/download", get(files::download_page).post(files::download_select))
        .route("/download_file_folder", get(files::download_file_folder))
        .route("/explorer", get(files::explorer))
        .route("/folder", get(files::folder))
        .route("/preview_asset", get(files::preview_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
