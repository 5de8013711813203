//! # taskboard-settings
//!
//! Configuration for the taskboard server, loaded from three layers (in
//! priority order):
//! 1. **Compiled defaults** ([`Settings::default()`])
//! 2. **Settings file** (`~/.taskboard/settings.json` or an explicit path)
//! 3. **Environment variables** (`TASKBOARD_*`, highest priority)

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{load_settings, load_settings_from_path, settings_path, taskboard_dir};
pub use types::{LoggingSettings, ServerSettings, Settings, StorageSettings, TaskSettings};
