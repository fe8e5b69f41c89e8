//! Entity structs for every backend table plus the session user.

mod activity;
mod assignment;
mod comment;
mod user;

pub use activity::{ActivityLogEntry, NewActivity};
pub use assignment::{Assignment, NewAssignment};
pub use comment::{Comment, NewComment};
pub use user::SessionUser;
