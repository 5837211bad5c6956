//! Settings loading with environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`PlayerSettings::default()`]
//! 2. If a settings file is given and exists, read it (missing keys keep defaults)
//! 3. Apply `ISLAND_*` environment overrides

use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::PlayerSettings;

/// Accepted `requestTimeoutSecs` values.
pub const REQUEST_TIMEOUT_SECS_RANGE: (u64, u64) = (1, 300);
/// Accepted `registrationDelayMs` values.
pub const REGISTRATION_DELAY_MS_RANGE: (u64, u64) = (0, 60_000);
/// Accepted `drainTimeoutSecs` values.
pub const DRAIN_TIMEOUT_SECS_RANGE: (u64, u64) = (1, 600);

/// Load defaults plus environment overrides, without a settings file.
pub fn load_settings() -> PlayerSettings {
    let mut settings = PlayerSettings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Load settings from `path` with environment overrides.
///
/// A missing file yields defaults. An unreadable or malformed file, or one with
/// out-of-range values, is an error.
pub fn load_settings_from_path(path: &Path) -> Result<PlayerSettings> {
    let mut settings = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: PlayerSettings =
            serde_json::from_str(&content).map_err(|source| SettingsError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        validate(&settings)?;
        settings
    } else {
        debug!(?path, "settings file not found, using defaults");
        PlayerSettings::default()
    };

    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Check bounded values against the ranges env overrides are held to.
pub fn validate(settings: &PlayerSettings) -> Result<()> {
    check_range(
        "requestTimeoutSecs",
        settings.request_timeout_secs,
        REQUEST_TIMEOUT_SECS_RANGE,
    )?;
    check_range(
        "registrationDelayMs",
        settings.registration_delay_ms,
        REGISTRATION_DELAY_MS_RANGE,
    )?;
    check_range("drainTimeoutSecs", settings.drain_timeout_secs, DRAIN_TIMEOUT_SECS_RANGE)
}

fn check_range(key: &str, value: u64, (min, max): (u64, u64)) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::InvalidValue(format!("{key} {value} not in {min}..={max}")))
    }
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(settings: &mut PlayerSettings) {
    apply_overrides(settings, |key| std::env::var(key).ok());
}

/// Apply overrides read through `lookup`.
///
/// Invalid values are logged and ignored; empty strings count as unset.
pub fn apply_overrides(settings: &mut PlayerSettings, lookup: impl Fn(&str) -> Option<String>) {
    let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) =
        read("ISLAND_PORT").and_then(|v| checked(&v, "ISLAND_PORT", |s| s.parse::<u16>().ok()))
    {
        settings.port = v;
    }
    if let Some(v) = read("ISLAND_VERBOSE").and_then(|v| checked(&v, "ISLAND_VERBOSE", parse_bool))
    {
        settings.verbose = v;
    }
    if let Some(v) = read("ISLAND_TEAM_NAME") {
        settings.team_name = Some(v);
    }
    if let Some(v) = read("ISLAND_MEDIATOR_URL") {
        settings.mediator_url = v;
    }
    if let Some(v) =
        read("ISLAND_MANUAL_EXIT").and_then(|v| checked(&v, "ISLAND_MANUAL_EXIT", parse_bool))
    {
        settings.manual_exit = v;
    }
    if let Some(v) = read("ISLAND_ADVERTISE_IP") {
        settings.advertise_ip = Some(v);
    }
    if let Some(v) = read("ISLAND_BIND_HOST") {
        settings.bind_host = v;
    }
    if let Some(v) = read("ISLAND_REQUEST_TIMEOUT_SECS").and_then(|v| {
        let (min, max) = REQUEST_TIMEOUT_SECS_RANGE;
        checked(&v, "ISLAND_REQUEST_TIMEOUT_SECS", |s| parse_u64_range(s, min, max))
    }) {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = read("ISLAND_REGISTRATION_DELAY_MS").and_then(|v| {
        let (min, max) = REGISTRATION_DELAY_MS_RANGE;
        checked(&v, "ISLAND_REGISTRATION_DELAY_MS", |s| parse_u64_range(s, min, max))
    }) {
        settings.registration_delay_ms = v;
    }
    if let Some(v) = read("ISLAND_DRAIN_TIMEOUT_SECS").and_then(|v| {
        let (min, max) = DRAIN_TIMEOUT_SECS_RANGE;
        checked(&v, "ISLAND_DRAIN_TIMEOUT_SECS", |s| parse_u64_range(s, min, max))
    }) {
        settings.drain_timeout_secs = v;
    }
}

fn checked<T>(val: &str, key: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let result = parse(val.trim());
    if result.is_none() {
        warn!(key, value = %val, "invalid env var, ignoring");
    }
    result
}

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u64` within an inclusive range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (min..=max).contains(&n).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
