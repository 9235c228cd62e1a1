// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the IcyHider registry builder.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level IcyHider configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to the layout of a standard install.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IcyHiderConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// The required host namespace.
    #[serde(default)]
    pub host: HostConfig,

    /// Optional extension sources discovered on disk.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Registry behavior.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Host namespace configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// Path to the manifest describing the host's own node classes.
    #[serde(default = "default_host_manifest")]
    pub manifest: String,

    /// Source label of the host namespace; wrapped nodes get
    /// category `IcyHider <label>`.
    #[serde(default = "default_host_label")]
    pub label: String,

    /// Host nodes whose wrappers carry the bare `IcyHider` category.
    #[serde(default = "default_pinned")]
    pub pinned: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            manifest: default_host_manifest(),
            label: default_host_label(),
            pinned: default_pinned(),
        }
    }
}

fn default_host_manifest() -> String {
    "comfy-core.toml".to_string()
}

fn default_host_label() -> String {
    "Comfy Core".to_string()
}

fn default_pinned() -> Vec<String> {
    ["PreviewImage", "LoadImage", "SaveImage"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Optional extension source configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    /// Directory the source paths are resolved against. `None` uses the
    /// parent of the directory holding the running executable.
    #[serde(default)]
    pub base_path: Option<String>,

    /// Single named aggregate unit.
    #[serde(default)]
    pub aggregate: AggregateSourceConfig,

    /// Directory of independent units.
    #[serde(default)]
    pub directory: DirectorySourceConfig,
}

/// Aggregate-convention source: one unit in a sibling directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AggregateSourceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory relative to `sources.base_path`.
    #[serde(default = "default_aggregate_dir")]
    pub dir: String,

    /// Unit name; the manifest file is `<unit>.toml`.
    #[serde(default = "default_aggregate_unit")]
    pub unit: String,

    /// Source label used for the category of wrapped nodes.
    #[serde(default = "default_aggregate_label")]
    pub label: String,
}

impl Default for AggregateSourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_aggregate_dir(),
            unit: default_aggregate_unit(),
            label: default_aggregate_label(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_aggregate_dir() -> String {
    "was-ns".to_string()
}

fn default_aggregate_unit() -> String {
    "WAS_Node_Suite".to_string()
}

fn default_aggregate_label() -> String {
    "WAS Node Suite".to_string()
}

/// Directory-convention source: every unit file in one directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DirectorySourceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory relative to `sources.base_path`.
    #[serde(default = "default_directory_dir")]
    pub dir: String,

    /// Each file is labelled `<label_prefix>/<file stem>`.
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,
}

impl Default for DirectorySourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_directory_dir(),
            label_prefix: default_label_prefix(),
        }
    }
}

fn default_directory_dir() -> String {
    "was-extras/nodes".to_string()
}

fn default_label_prefix() -> String {
    "was-extras".to_string()
}

/// Registry configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// What to do when two sources produce the same synthesized id.
    #[serde(default)]
    pub collision: CollisionPolicy,
}

/// Policy for synthesized-id collisions. Both policies log a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Keep the entry registered first and drop the newcomer.
    #[default]
    KeepFirst,
    /// Replace the existing entry with the newcomer.
    Replace,
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionPolicy::KeepFirst => write!(f, "keep-first"),
            CollisionPolicy::Replace => write!(f, "replace"),
        }
    }
}
