// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of wrapped nodes consumed by the host's plugin loader.
//!
//! The `NodeRegistry` keeps two parallel maps keyed by synthesized id:
//! id → wrapped class and id → display name. Both maps always hold the same
//! key set. Id collisions are resolved by the configured [`CollisionPolicy`]
//! and are always logged.

use std::collections::BTreeMap;
use std::sync::Arc;

use icyhider_config::CollisionPolicy;
use icyhider_core::{NodeClass, NodeInfo, ID_PREFIX};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::wrap::IcyNode;

/// What happened to a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The id was new.
    Inserted,
    /// The id existed and the newcomer replaced it.
    Replaced,
    /// The id existed and the existing entry was kept.
    Kept,
}

impl RegisterOutcome {
    /// Whether the newcomer is now the registered entry.
    pub fn accepted(self) -> bool {
        matches!(self, RegisterOutcome::Inserted | RegisterOutcome::Replaced)
    }
}

/// Serializable form of both mappings, in the shape the host loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryExport {
    pub node_class_mappings: BTreeMap<String, NodeInfo>,
    pub node_display_name_mappings: BTreeMap<String, String>,
}

/// Registry of wrapped node classes and their display names.
pub struct NodeRegistry {
    policy: CollisionPolicy,
    classes: BTreeMap<String, Arc<IcyNode>>,
    display_names: BTreeMap<String, String>,
}

impl NodeRegistry {
    /// Create a new empty registry with the given collision policy.
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            classes: BTreeMap::new(),
            display_names: BTreeMap::new(),
        }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Register a wrapped node under `id` with its display name.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        node: IcyNode,
        display_name: impl Into<String>,
    ) -> RegisterOutcome {
        let id = id.into();
        let display_name = display_name.into();

        if let Some(existing) = self.classes.get(&id) {
            let existing_category = existing.category().unwrap_or_default().to_string();
            let incoming_category = node.category().unwrap_or_default().to_string();
            match self.policy {
                CollisionPolicy::KeepFirst => {
                    warn!(
                        id = %id,
                        kept = %existing_category,
                        dropped = %incoming_category,
                        "id collision, keeping the first registration"
                    );
                    return RegisterOutcome::Kept;
                }
                CollisionPolicy::Replace => {
                    warn!(
                        id = %id,
                        replaced = %existing_category,
                        by = %incoming_category,
                        "id collision, replacing the earlier registration"
                    );
                    self.classes.insert(id.clone(), Arc::new(node));
                    self.display_names.insert(id, display_name);
                    return RegisterOutcome::Replaced;
                }
            }
        }

        self.classes.insert(id.clone(), Arc::new(node));
        self.display_names.insert(id, display_name);
        RegisterOutcome::Inserted
    }

    /// Get a wrapped node by id.
    pub fn get(&self, id: &str) -> Option<&Arc<IcyNode>> {
        self.classes.get(id)
    }

    /// Get the display name registered for an id.
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.display_names.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.classes.contains_key(id)
    }

    /// All ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        self.classes.keys().map(String::as_str).collect()
    }

    /// Iterate `(id, node, display name)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<IcyNode>, &str)> {
        self.classes.iter().map(|(id, node)| {
            let display = self.display_names.get(id).map_or("", String::as_str);
            (id.as_str(), node, display)
        })
    }

    /// Host-facing descriptions keyed by id, with registry display names.
    pub fn node_info(&self) -> BTreeMap<String, NodeInfo> {
        self.iter()
            .map(|(id, node, display)| {
                let mut info = NodeInfo::from_node(node.as_ref());
                info.display_name = display.to_string();
                (id.to_string(), info)
            })
            .collect()
    }

    /// Snapshot both mappings for handing to the host.
    pub fn export(&self) -> RegistryExport {
        RegistryExport {
            node_class_mappings: self.node_info(),
            node_display_name_mappings: self.display_names.clone(),
        }
    }

    /// Returns the number of distinct ids.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new(CollisionPolicy::default())
    }
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("policy", &self.policy)
            .field("ids", &self.ids())
            .finish()
    }
}

/// Whether an id follows the naming convention of synthesized wrappers.
pub fn is_icy_id(id: &str) -> bool {
    id.strip_prefix(ID_PREFIX).is_some_and(|rest| !rest.is_empty())
}
