//! Session model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserProfile;

/// Client-persisted record asserting that a user is authenticated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub logged_in: bool,
    pub user: UserProfile,
    /// Creation time in epoch milliseconds
    pub created_at: i64,
    #[serde(default)]
    pub remember_me: bool,
}

impl Session {
    /// Create a logged-in session for `user`
    pub fn new(user: UserProfile, remember_me: bool) -> Self {
        Self {
            logged_in: true,
            user,
            created_at: Utc::now().timestamp_millis(),
            remember_me,
        }
    }

    /// Creation time, `None` when the stored value is out of range
    pub fn created(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }
}
