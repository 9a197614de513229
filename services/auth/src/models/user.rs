//! User model and related functionality

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Permission granting every capability, including account management
pub const PERMISSION_ADMIN: &str = "admin";
/// Permission to create and edit clinic records
pub const PERMISSION_EDIT: &str = "edit";
/// Permission to delete clinic records
pub const PERMISSION_DELETE: &str = "delete";

/// Snapshot of the logged-in user embedded in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub email: String,
    /// Role label shown next to the name, e.g. "Administrator"
    pub role: String,
    /// Avatar glyph
    pub avatar: String,
    #[serde(default)]
    pub permissions: BTreeSet<String>,
}

impl UserProfile {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    pub fn is_admin(&self) -> bool {
        self.has_permission(PERMISSION_ADMIN)
    }
}
