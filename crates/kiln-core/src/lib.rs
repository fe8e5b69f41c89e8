//! # kiln-core
//!
//! Core types shared across all kiln crates:
//! - Entity structs for the backend tables (activity log, assignments, comments)
//! - Status enums with state machine transitions
//! - The ephemeral session user
//! - Cross-cutting error types
//! - JSON response envelopes used by the HTTP layer

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
