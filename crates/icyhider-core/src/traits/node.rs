// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The node class capability trait.

use crate::error::IcyError;
use crate::types::InputSpec;

/// A node class as seen by the registry builder.
///
/// Every accessor is class-level: it describes the node type, not an
/// instance. Optional accessors return `None` when the class does not define
/// the attribute at all, which is distinct from defining it as empty. The two
/// capability accessors that decide eligibility are [`input_types`] and
/// [`return_types`].
///
/// [`input_types`]: NodeClass::input_types
/// [`return_types`]: NodeClass::return_types
pub trait NodeClass: Send + Sync + 'static {
    /// Identifier of the class inside its namespace.
    fn name(&self) -> &str;

    /// Input specification accessor (`INPUT_TYPES` on the host side).
    fn input_types(&self) -> Option<&InputSpec>;

    /// Output specification accessor (`RETURN_TYPES` on the host side).
    fn return_types(&self) -> Option<&[String]>;

    fn display_name(&self) -> Option<&str> {
        None
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn return_names(&self) -> Option<&[String]> {
        None
    }

    /// Name of the entry point the host calls to execute the node.
    fn function(&self) -> Option<&str> {
        None
    }

    fn output_node(&self) -> bool {
        false
    }

    fn description(&self) -> Option<&str> {
        None
    }

    /// Any other class-level attribute, looked up by name.
    fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        let _ = key;
        None
    }

    /// Sealed classes refuse derivation; wrapping them fails.
    fn is_sealed(&self) -> bool {
        false
    }

    /// Executes the node in-process.
    ///
    /// Classes that only describe a node the host executes itself keep the
    /// default, which reports [`IcyError::NotExecutable`].
    fn invoke(&self, inputs: &serde_json::Value) -> Result<serde_json::Value, IcyError> {
        let _ = inputs;
        Err(IcyError::NotExecutable {
            name: self.name().to_string(),
        })
    }
}
