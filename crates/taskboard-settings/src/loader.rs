//! Settings loading.
//!
//! Loading flow, lowest to highest priority:
//! 1. Compiled [`Settings::default()`]
//! 2. The JSON settings file, when it exists
//! 3. `TASKBOARD_*` environment variables, `__` separating nested keys
//!    (`TASKBOARD_SERVER__PORT=9000` sets `server.port`)

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::Settings;

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// `~/.taskboard`, or `/tmp/.taskboard` when `HOME` is unset.
pub fn taskboard_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".taskboard")
}

/// Default settings file (`~/.taskboard/settings.json`).
pub fn settings_path() -> PathBuf {
    taskboard_dir().join("settings.json")
}

/// Load settings from the default path with env overrides.
pub fn load_settings() -> Result<Settings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from `path` with env overrides. A missing file is not an
/// error; a malformed one is.
pub fn load_settings_from_path(path: &Path) -> Result<Settings> {
    if path.exists() {
        debug!(?path, "loading settings from file");
    } else {
        debug!(?path, "settings file not found, using defaults");
    }

    let settings: Settings = figment(path).extract()?;
    validate(&settings)?;
    Ok(settings)
}

/// The provider stack, exposed so callers can layer more on top.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Json::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

fn validate(settings: &Settings) -> Result<()> {
    if settings.tasks.default_parent_name.trim().is_empty() {
        return Err(SettingsError::Invalid {
            key: "tasks.default_parent_name",
            reason: "must not be blank".to_string(),
        });
    }
    if settings.server.host.trim().is_empty() {
        return Err(SettingsError::Invalid {
            key: "server.host",
            reason: "must not be blank".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("absent.json");
            let settings = load_settings_from_path(&path).map_err(|e| e.to_string())?;
            assert_eq!(settings, Settings::default());
            Ok(())
        });
    }

    #[test]
    fn file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "settings.json",
                r#"{"server": {"port": 9100}, "tasks": {"default_parent_name": "Inbox"}}"#,
            )?;
            let path = jail.directory().join("settings.json");
            let settings = load_settings_from_path(&path).map_err(|e| e.to_string())?;
            assert_eq!(settings.server.port, 9100);
            assert_eq!(settings.server.host, "127.0.0.1");
            assert_eq!(settings.tasks.default_parent_name, "Inbox");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("settings.json", r#"{"server": {"port": 9100}}"#)?;
            jail.set_env("TASKBOARD_SERVER__PORT", "9200");
            jail.set_env("TASKBOARD_LOGGING__JSON", "true");
            let path = jail.directory().join("settings.json");
            let settings = load_settings_from_path(&path).map_err(|e| e.to_string())?;
            assert_eq!(settings.server.port, 9200);
            assert!(settings.logging.json);
            Ok(())
        });
    }

    #[test]
    fn malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("settings.json", "{ not json")?;
            let path = jail.directory().join("settings.json");
            assert!(load_settings_from_path(&path).is_err());
            Ok(())
        });
    }

    #[test]
    fn blank_default_parent_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("settings.json", r#"{"tasks": {"default_parent_name": "  "}}"#)?;
            let path = jail.directory().join("settings.json");
            let err = load_settings_from_path(&path).unwrap_err();
            assert!(matches!(
                err,
                SettingsError::Invalid { key: "tasks.default_parent_name", .. }
            ));
            Ok(())
        });
    }

    #[test]
    fn settings_path_is_under_taskboard_dir() {
        assert!(settings_path().starts_with(taskboard_dir()));
        assert!(settings_path().ends_with("settings.json"));
    }
}
