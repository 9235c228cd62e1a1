// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty labels and source paths that stay below
//! the base directory.

use std::collections::HashSet;
use std::path::{Component, Path};

use crate::diagnostic::ConfigError;
use crate::model::IcyHiderConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &IcyHiderConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "log.level `{}` is not one of: {}",
            config.log.level,
            LOG_LEVELS.join(", ")
        )));
    }

    require_non_empty(&mut errors, "host.manifest", &config.host.manifest);
    require_non_empty(&mut errors, "host.label", &config.host.label);

    let mut seen = HashSet::new();
    for (i, name) in config.host.pinned.iter().enumerate() {
        if name.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "host.pinned[{i}] must not be empty"
            )));
        } else if !seen.insert(name.as_str()) {
            errors.push(ConfigError::validation(format!(
                "duplicate node `{name}` in host.pinned"
            )));
        }
    }

    if let Some(base) = &config.sources.base_path {
        require_non_empty(&mut errors, "sources.base_path", base);
    }

    let aggregate = &config.sources.aggregate;
    if aggregate.enabled {
        require_relative_dir(&mut errors, "sources.aggregate.dir", &aggregate.dir);
        require_non_empty(&mut errors, "sources.aggregate.label", &aggregate.label);
        if aggregate.unit.trim().is_empty() {
            errors.push(ConfigError::validation(
                "sources.aggregate.unit must not be empty",
            ));
        } else if aggregate.unit.contains(['/', '\\']) || aggregate.unit.starts_with('.') {
            errors.push(ConfigError::validation(format!(
                "sources.aggregate.unit `{}` must be a bare unit name, not a path",
                aggregate.unit
            )));
        }
    }

    let directory = &config.sources.directory;
    if directory.enabled {
        require_relative_dir(&mut errors, "sources.directory.dir", &directory.dir);
        require_non_empty(
            &mut errors,
            "sources.directory.label_prefix",
            &directory.label_prefix,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn require_non_empty(errors: &mut Vec<ConfigError>, key: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ConfigError::validation(format!("{key} must not be empty")));
    }
}

/// Source directories are resolved against the base path and must stay below it.
fn require_relative_dir(errors: &mut Vec<ConfigError>, key: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ConfigError::validation(format!("{key} must not be empty")));
        return;
    }
    let path = Path::new(value);
    if path.is_absolute() {
        errors.push(ConfigError::validation(format!(
            "{key} `{value}` must be relative to sources.base_path"
        )));
    } else if path.components().any(|c| matches!(c, Component::ParentDir)) {
        errors.push(ConfigError::validation(format!(
            "{key} `{value}` must not contain `..`"
        )));
    }
}
