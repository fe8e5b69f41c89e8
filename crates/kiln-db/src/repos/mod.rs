//! Table modules. Each adds methods to `KilnDb` via `impl KilnDb` blocks.

pub mod activity;
pub mod assignment;
pub mod comment;
