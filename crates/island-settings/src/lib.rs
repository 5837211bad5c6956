//! # island-settings
//!
//! Configuration for the island player, loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`PlayerSettings::default()`]
//! 2. **Settings file**: optional JSON file, missing keys keep their defaults
//! 3. **Environment variables**: `ISLAND_*` overrides
//!
//! Command-line flags are applied on top by the binary.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, apply_overrides, load_settings, load_settings_from_path, validate,
};
pub use types::{DEFAULT_MEDIATOR_URL, PlayerSettings};
