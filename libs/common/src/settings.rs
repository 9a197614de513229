//! Layered settings loader
//!
//! Sources, lowest precedence first: the `Default` impl of the target type
//! (via `#[serde(default)]`), a TOML file, then `<PREFIX>_...` environment
//! variables where `__` separates nested keys.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::de::DeserializeOwned;
use tracing::debug;

/// File stem looked up in the working directory when no path is given
pub const DEFAULT_SETTINGS_FILE: &str = "smartvet";

/// Load settings of type `T`.
///
/// An explicit `file` must exist; the default file is optional.
pub fn load_settings<T: DeserializeOwned>(
    file: Option<&Path>,
    env_prefix: &str,
) -> Result<T, ConfigError> {
    let file_source = match file {
        Some(path) => File::from(path.to_path_buf()).required(true),
        None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
    };

    let settings = Config::builder()
        .add_source(file_source)
        .add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    debug!("Settings loaded (env prefix {})", env_prefix);
    settings.try_deserialize()
}
