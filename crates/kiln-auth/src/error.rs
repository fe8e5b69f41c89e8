use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid login credentials")]
    InvalidCredentials,

    #[error("not authenticated: {0}")]
    NotAuthenticated(String),

    #[error("token expired")]
    TokenExpired,

    #[error("auth API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}
