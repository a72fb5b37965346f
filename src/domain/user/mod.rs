// User domain module
// Contains the user entity and its insert/update shapes

#![allow(clippy::module_inception)]

pub mod user;

// Re-export main types for convenience
pub use user::{NewUser, User, UserChanges};
