// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock node class for deterministic tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use icyhider_core::{IcyError, InputSpec, NodeClass};
use serde_json::{json, Value};

/// A node class with every attribute settable.
///
/// By default it exposes both capability accessors, one `INT` input and one
/// `INT` output, so it qualifies for wrapping. `invoke` echoes its inputs
/// and counts calls.
#[derive(Debug)]
pub struct MockNode {
    name: String,
    display_name: Option<String>,
    category: Option<String>,
    input_types: Option<InputSpec>,
    return_types: Option<Vec<String>>,
    function: Option<String>,
    output_node: bool,
    description: Option<String>,
    sealed: bool,
    attributes: BTreeMap<String, Value>,
    invocations: AtomicUsize,
}

impl MockNode {
    pub fn new(name: &str) -> Self {
        let mut inputs = InputSpec::default();
        inputs.required.insert("value".to_string(), json!(["INT"]));
        Self {
            name: name.to_string(),
            display_name: None,
            category: Some("mock".to_string()),
            input_types: Some(inputs),
            return_types: Some(vec!["INT".to_string()]),
            function: Some("run".to_string()),
            output_node: false,
            description: None,
            sealed: false,
            attributes: BTreeMap::new(),
            invocations: AtomicUsize::new(0),
        }
    }

    pub fn without_input_types(mut self) -> Self {
        self.input_types = None;
        self
    }

    pub fn without_return_types(mut self) -> Self {
        self.return_types = None;
        self
    }

    pub fn with_input_types(mut self, inputs: InputSpec) -> Self {
        self.input_types = Some(inputs);
        self
    }

    pub fn with_return_types(mut self, outputs: Vec<String>) -> Self {
        self.return_types = Some(outputs);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    pub fn marked_output(mut self) -> Self {
        self.output_node = true;
        self
    }

    /// Mark the class as refusing derivation.
    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }

    /// Number of `invoke` calls so far.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    pub fn arc(self) -> Arc<dyn NodeClass> {
        Arc::new(self)
    }
}

impl NodeClass for MockNode {
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

    fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    fn output_node(&self) -> bool {
        self.output_node
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn invoke(&self, inputs: &Value) -> Result<Value, IcyError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "node": self.name, "inputs": inputs }))
    }
}
