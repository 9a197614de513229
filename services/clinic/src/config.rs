//! Application configuration
//!
//! Loaded from built-in defaults, an optional `smartvet.toml` and
//! `SMARTVET_*` environment variables (`__` separates sections, e.g.
//! `SMARTVET_API__BASE_URL`).

use std::path::Path;

use auth::SessionConfig;
use common::settings::load_settings;
use common::storage::StorageConfig;
use serde::Deserialize;

use crate::client::ApiConfig;
use crate::vaccination::VaccinationConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SMARTVET";

/// Top-level settings for the `smartvet` front-end
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    pub log_level: String,
    pub storage: StorageConfig,
    pub session: SessionConfig,
    pub api: ApiConfig,
    pub vaccination: VaccinationConfig,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            storage: StorageConfig::default(),
            session: SessionConfig::default(),
            api: ApiConfig::default(),
            vaccination: VaccinationConfig::default(),
        }
    }
}

impl ClinicConfig {
    /// Load the layered configuration; `file` overrides the default lookup
    pub fn load(file: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        load_settings(file, ENV_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_overrides_selected_sections() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("smartvet.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "http://clinic.internal:9000/api"

[vaccination]
due_soon_days = 14

[session]
login_page = "signin.html"
"#,
        )
        .expect("write config");

        let config = ClinicConfig::load(Some(&path)).expect("load config");
        assert_eq!(config.api.base_url, "http://clinic.internal:9000/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.vaccination.due_soon_days, 14);
        assert_eq!(config.session.login_page, "signin.html");
        assert_eq!(config.session.storage_key, "smartvet_session");
        assert_eq!(config.log_level, "info");
    }
}
