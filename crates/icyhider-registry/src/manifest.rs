// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Namespace manifest parsing from TOML files.
//!
//! Extension sources are declared as manifests instead of executable code.
//! A manifest lists node classes with their class-level attributes; any
//! attribute a node leaves out is absent, which the qualifier treats exactly
//! like a class that never defined it.
//!
//! ```toml
//! [namespace]
//! name = "WAS Node Suite"
//! version = "1.0.0"
//!
//! [[node]]
//! name = "Image_Blend"
//! input_types = { required = { image_a = ["IMAGE"], image_b = ["IMAGE"] } }
//! return_types = ["IMAGE"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use icyhider_core::{IcyError, InputSpec, Namespace, NodeClass};
use serde::Deserialize;
use tracing::warn;

/// Path recorded for manifests parsed from memory.
const INLINE_PATH: &str = "<inline>";

/// One node class declared in a manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDefinition {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub input_types: Option<InputSpec>,
    #[serde(default)]
    pub return_types: Option<Vec<String>>,
    #[serde(default)]
    pub return_names: Option<Vec<String>>,
    #[serde(default)]
    pub output_node: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sealed: bool,
    /// Attributes IcyHider does not interpret, kept for delegation.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl NodeClass for NodeDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_types(&self) -> Option<&InputSpec> {
        self.input_types.as_ref()
    }

    fn return_types(&self) -> Option<&[String]> {
        self.return_types.as_deref()
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn return_names(&self) -> Option<&[String]> {
        self.return_names.as_deref()
    }

    fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    fn output_node(&self) -> bool {
        self.output_node
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    fn is_sealed(&self) -> bool {
        self.sealed
    }
}

/// Top-level structure of a namespace manifest.
///
/// Node tables are kept as raw values so each one is converted on its own.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    namespace: NamespaceSection,
    #[serde(default, rename = "node")]
    nodes: Vec<toml::Value>,
}

/// The optional `[namespace]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NamespaceSection {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// A namespace read from a manifest.
#[derive(Debug)]
pub struct ManifestNamespace {
    label: String,
    declared_name: Option<String>,
    version: Option<semver::Version>,
    path: PathBuf,
    nodes: BTreeMap<String, Arc<NodeDefinition>>,
    skipped: Vec<String>,
}

impl ManifestNamespace {
    /// Name the manifest declares for itself, if any.
    pub fn declared_name(&self) -> Option<&str> {
        self.declared_name.as_deref()
    }

    pub fn version(&self) -> Option<&semver::Version> {
        self.version.as_ref()
    }

    /// File the manifest was loaded from (`<inline>` for strings).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries that could not be read as node definitions, in file order.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn get(&self, name: &str) -> Option<&Arc<NodeDefinition>> {
        self.nodes.get(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Namespace for ManifestNamespace {
    fn label(&self) -> &str {
        &self.label
    }

    fn members(&self) -> Vec<(String, Arc<dyn NodeClass>)> {
        self.nodes
            .iter()
            .map(|(name, node)| (name.clone(), node.clone() as Arc<dyn NodeClass>))
            .collect()
    }
}

/// Parse a namespace manifest from TOML content.
///
/// `label` identifies the source; it becomes the category suffix of every
/// node wrapped from this namespace. The file as a whole fails only on TOML
/// syntax errors or an invalid `[namespace]` section. A node table that
/// cannot be read, has a blank name, or repeats an earlier name is logged
/// and skipped; its siblings still load.
pub fn parse_namespace_manifest(
    toml_content: &str,
    label: &str,
) -> Result<ManifestNamespace, IcyError> {
    parse_at(toml_content, label, PathBuf::from(INLINE_PATH))
}

/// Load and parse a namespace manifest from a file path.
pub fn load_namespace_manifest(path: &Path, label: &str) -> Result<ManifestNamespace, IcyError> {
    let content = std::fs::read_to_string(path).map_err(|source| IcyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_at(&content, label, path.to_path_buf())
}

fn parse_at(toml_content: &str, label: &str, path: PathBuf) -> Result<ManifestNamespace, IcyError> {
    let file: ManifestFile = toml::from_str(toml_content)
        .map_err(|e| IcyError::manifest(&path, e.message().to_string()))?;

    let version = file
        .namespace
        .version
        .as_deref()
        .map(semver::Version::parse)
        .transpose()
        .map_err(|e| IcyError::manifest(&path, format!("namespace.version: {e}")))?;

    let mut nodes = BTreeMap::new();
    let mut skipped = Vec::new();
    for (i, raw) in file.nodes.into_iter().enumerate() {
        let entry = raw
            .get("name")
            .and_then(toml::Value::as_str)
            .map_or_else(|| format!("node[{i}]"), str::to_string);

        let node = match NodeDefinition::deserialize(raw) {
            Ok(node) if node.name.trim().is_empty() => {
                warn!(source = %label, node = %entry, error = "name must not be blank", "skipping node");
                skipped.push(entry);
                continue;
            }
            Ok(node) => node,
            Err(e) => {
                warn!(source = %label, node = %entry, error = %e.message(), "skipping node");
                skipped.push(entry);
                continue;
            }
        };

        if nodes.contains_key(&node.name) {
            warn!(source = %label, node = %node.name, error = "duplicate name", "skipping node");
            skipped.push(entry);
            continue;
        }
        nodes.insert(node.name.clone(), Arc::new(node));
    }

    Ok(ManifestNamespace {
        label: label.to_string(),
        declared_name: file.namespace.name,
        version,
        path,
        nodes,
        skipped,
    })
}
