//! # kiln-db
//!
//! Row access for the three backend tables (`activity_log`, `assignments`,
//! `comments`) through the Supabase PostgREST API.
//!
//! [`KilnDb`] holds the project URL, API key, and a shared `reqwest::Client`.
//! Table operations are added to it by the modules under `repos`, one per
//! table. Status changes (approval, assignment completion) are conditional
//! updates so concurrent requests cannot move a row backwards.

pub mod error;
pub mod repos;
pub mod service;
pub mod store;
pub mod views;

mod helpers;

pub use error::DatabaseError;
pub use service::KilnDb;
pub use store::ActivityStore;
pub use views::DashboardView;
