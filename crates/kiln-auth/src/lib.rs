//! # kiln-auth
//!
//! Supabase (GoTrue) authentication for kiln.
//!
//! Provides password sign-in, user lookup from an access token, session
//! refresh, password update and reset-email requests, sign-out, and the
//! composite flows the web layer calls: [`flows::login`],
//! [`flows::change_password`], and [`flows::reset_password`].

pub mod client;
pub mod error;
pub mod expiry;
pub mod flows;
pub mod types;

pub use client::AuthClient;
pub use flows::{AuthBackend, LoginOutcome};
pub use error::AuthError;
pub use types::{AuthSession, AuthUser};
