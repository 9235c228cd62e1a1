// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only collections of named node classes.

use std::sync::Arc;

use crate::traits::NodeClass;

/// A source of node classes: the host's own set or an extension unit.
pub trait Namespace: Send + Sync {
    /// Identifying label of the source (e.g. "Comfy Core").
    fn label(&self) -> &str;

    /// All members as `(name, class)` pairs, sorted by name.
    fn members(&self) -> Vec<(String, Arc<dyn NodeClass>)>;
}

/// A namespace assembled in code, for hosts that register classes directly.
pub struct StaticNamespace {
    label: String,
    members: Vec<(String, Arc<dyn NodeClass>)>,
}

impl StaticNamespace {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            members: Vec::new(),
        }
    }

    /// Add a class under its own name.
    pub fn with(mut self, class: Arc<dyn NodeClass>) -> Self {
        let name = class.name().to_string();
        self.members.push((name, class));
        self
    }

    /// Add a class under an explicit member name (an alias).
    pub fn with_alias(mut self, name: impl Into<String>, class: Arc<dyn NodeClass>) -> Self {
        self.members.push((name.into(), class));
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Namespace for StaticNamespace {
    fn label(&self) -> &str {
        &self.label
    }

    fn members(&self) -> Vec<(String, Arc<dyn NodeClass>)> {
        let mut members = self.members.clone();
        members.sort_by(|a, b| a.0.cmp(&b.0));
        members
    }
}

impl std::fmt::Debug for StaticNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticNamespace")
            .field("label", &self.label)
            .field("members", &self.members.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .finish()
    }
}
