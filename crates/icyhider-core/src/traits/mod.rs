// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits for node classes and the namespaces that hold them.

pub mod namespace;
pub mod node;

pub use namespace::{Namespace, StaticNamespace};
pub use node::NodeClass;
