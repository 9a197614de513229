//! Authentication models

pub mod session;
pub mod user;

// Re-export for convenience
pub use session::Session;
pub use user::{PERMISSION_ADMIN, PERMISSION_DELETE, PERMISSION_EDIT, UserProfile};
