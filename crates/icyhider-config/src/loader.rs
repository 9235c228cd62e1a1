// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./icyhider.toml` > `~/.config/icyhider/icyhider.toml` > `/etc/icyhider/icyhider.toml`
//! with environment variable overrides via `ICYHIDER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::IcyHiderConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/icyhider/icyhider.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "icyhider.toml";

/// Path of the per-user configuration file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("icyhider").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/icyhider/icyhider.toml` (system-wide)
/// 3. `~/.config/icyhider/icyhider.toml` (user XDG config)
/// 4. `./icyhider.toml` (local directory)
/// 5. `ICYHIDER_*` environment variables
pub fn load_config() -> Result<IcyHiderConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<IcyHiderConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(IcyHiderConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<IcyHiderConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(IcyHiderConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(IcyHiderConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider with explicit section mapping.
///
/// Key names contain underscores, so `Env::split("_")` would be ambiguous:
/// `ICYHIDER_SOURCES_BASE_PATH` must map to `sources.base_path`, and
/// `ICYHIDER_SOURCES_DIRECTORY_LABEL_PREFIX` to
/// `sources.directory.label_prefix`.
fn env_provider() -> Env {
    Env::prefixed("ICYHIDER_").map(|key| map_env_key(&key.as_str().to_ascii_lowercase()).into())
}

/// Map a lowercased, prefix-stripped env var name to a dotted config key.
pub(crate) fn map_env_key(key: &str) -> String {
    const SECTIONS: [(&str, &str); 6] = [
        ("sources_aggregate_", "sources.aggregate."),
        ("sources_directory_", "sources.directory."),
        ("sources_", "sources."),
        ("registry_", "registry."),
        ("host_", "host."),
        ("log_", "log."),
    ];

    for (prefix, section) in SECTIONS {
        if let Some(rest) = key.strip_prefix(prefix) {
            return format!("{section}{rest}");
        }
    }
    key.to_string()
}
