// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the qualifier, synthesizer, and registry.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::traits::NodeClass;

/// Prefix of every category label produced by wrapping.
pub const CATEGORY_PREFIX: &str = "IcyHider";

/// Prefix of every synthesized node id.
pub const ID_PREFIX: &str = "Icy";

/// Input specification of a node, grouped the way the host groups sockets.
///
/// Each field maps an input name to its host-defined descriptor, usually an
/// array of `[TYPE, {options}]`. The descriptor is opaque to IcyHider.
/// Groups other than the three standard ones are kept in `other` so they
/// survive delegation unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub required: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub optional: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hidden: BTreeMap<String, serde_json::Value>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl InputSpec {
    /// Total number of declared inputs across all groups.
    pub fn len(&self) -> usize {
        self.required.len() + self.optional.len() + self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The category assigned to a wrapped node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryLabel {
    /// Derived from the label of the source the node came from.
    Source(String),
    /// The bare `IcyHider` category used by pinned host nodes.
    Fixed,
}

impl CategoryLabel {
    pub fn source(label: impl Into<String>) -> Self {
        CategoryLabel::Source(label.into())
    }

    /// The source label this category was derived from, if any.
    pub fn source_label(&self) -> Option<&str> {
        match self {
            CategoryLabel::Source(label) => Some(label),
            CategoryLabel::Fixed => None,
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryLabel::Source(label) => write!(f, "{CATEGORY_PREFIX} {label}"),
            CategoryLabel::Fixed => f.write_str(CATEGORY_PREFIX),
        }
    }
}

/// Which discovery step a namespace was obtained from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The required host namespace.
    Host,
    /// A single named aggregate unit next to the install location.
    Aggregate,
    /// One file from a directory of independent units.
    Directory,
}

/// Host-facing description of a node, as consumed by the plugin loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub name: String,
    pub display_name: String,
    pub category: String,
    pub input: InputSpec,
    pub output: Vec<String>,
    pub output_name: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    pub output_node: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NodeInfo {
    /// Snapshot the class-level attributes of a node.
    pub fn from_node(node: &dyn NodeClass) -> Self {
        let output: Vec<String> = node.return_types().map(<[String]>::to_vec).unwrap_or_default();
        let output_name = node
            .return_names()
            .map(<[String]>::to_vec)
            .unwrap_or_else(|| output.clone());
        Self {
            name: node.name().to_string(),
            display_name: node.display_name().unwrap_or(node.name()).to_string(),
            category: node.category().unwrap_or_default().to_string(),
            input: node.input_types().cloned().unwrap_or_default(),
            output,
            output_name,
            function: node.function().map(str::to_string),
            output_node: node.output_node(),
            description: node.description().map(str::to_string),
        }
    }
}
