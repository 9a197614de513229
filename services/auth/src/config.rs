//! Session gate configuration

use serde::Deserialize;

/// Names of the pages and the storage key the gate works with
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Key under which the serialized session is stored
    pub storage_key: String,
    /// Page users are sent to when they are not logged in
    pub login_page: String,
    /// Public marketing page
    pub landing_page: String,
    /// Page a logged-in user lands on
    pub home_page: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: "smartvet_session".to_string(),
            login_page: "login.html".to_string(),
            landing_page: "landing.html".to_string(),
            home_page: "index.html".to_string(),
        }
    }
}
