// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synthesis of category-overriding wrappers.
//!
//! [`IcyNode`] holds the original class as its single base and answers every
//! accessor by delegation, except [`NodeClass::category`] (the one override)
//! and [`NodeClass::name`] (the synthesized id). Wrapping never mutates the
//! base and never runs its behavior.

use std::sync::Arc;

use icyhider_core::{CategoryLabel, IcyError, InputSpec, NodeClass, ID_PREFIX};

/// Synthesized registry id for a member name: `Icy<name>`.
pub fn synthesized_id(name: &str) -> String {
    format!("{ID_PREFIX}{name}")
}

/// Synthesized display name for a member name: `Icy <name>`.
pub fn synthesized_display_name(name: &str) -> String {
    format!("{ID_PREFIX} {name}")
}

/// A wrapped node class with an overridden category.
pub struct IcyNode {
    id: String,
    member_name: String,
    label: CategoryLabel,
    category: String,
    base: Arc<dyn NodeClass>,
}

impl IcyNode {
    /// The original class this wrapper derives from.
    pub fn base(&self) -> &Arc<dyn NodeClass> {
        &self.base
    }

    /// The name the base was found under in its namespace.
    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    pub fn label(&self) -> &CategoryLabel {
        &self.label
    }
}

impl std::fmt::Debug for IcyNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IcyNode")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("base", &self.base.name())
            .finish()
    }
}

/// Wrap `class`, found under `name`, into a node whose category is `label`.
///
/// Fails when the base refuses derivation or when `name` cannot form a
/// registry id. Callers log the failure and move on to the next class.
pub fn wrap(
    name: &str,
    class: Arc<dyn NodeClass>,
    label: &CategoryLabel,
) -> Result<IcyNode, IcyError> {
    let fail = |reason: &str| IcyError::Synthesis {
        name: name.to_string(),
        label: label
            .source_label()
            .map_or_else(|| label.to_string(), str::to_string),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() || name.chars().any(char::is_control) {
        return Err(fail("class name is blank or contains control characters"));
    }
    if class.is_sealed() {
        return Err(fail("class is sealed against derivation"));
    }

    Ok(IcyNode {
        id: synthesized_id(name),
        member_name: name.to_string(),
        category: label.to_string(),
        label: label.clone(),
        base: class,
    })
}

impl NodeClass for IcyNode {
    fn name(&self) -> &str {
        &self.id
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn input_types(&self) -> Option<&InputSpec> {
        self.base.input_types()
    }

    fn return_types(&self) -> Option<&[String]> {
        self.base.return_types()
    }

    fn display_name(&self) -> Option<&str> {
        self.base.display_name()
    }

    fn return_names(&self) -> Option<&[String]> {
        self.base.return_names()
    }

    fn function(&self) -> Option<&str> {
        self.base.function()
    }

    fn output_node(&self) -> bool {
        self.base.output_node()
    }

    fn description(&self) -> Option<&str> {
        self.base.description()
    }

    fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.base.attribute(key)
    }

    fn is_sealed(&self) -> bool {
        self.base.is_sealed()
    }

    fn invoke(&self, inputs: &serde_json::Value) -> Result<serde_json::Value, IcyError> {
        self.base.invoke(inputs)
    }
}

#[cfg(test)]
mod tests {
    use icyhider_test_utils::MockNode;
    use serde_json::json;

    use super::*;

    #[test]
    fn wrapper_overrides_only_category() {
        let base = Arc::new(
            MockNode::new("ImageBlur")
                .with_display_name("Image Blur")
                .with_category("image/filters")
                .with_description("blurs an image"),
        );
        let icy = wrap("ImageBlur", base.clone(), &CategoryLabel::source("Comfy Core")).unwrap();

        assert_eq!(icy.name(), "IcyImageBlur");
        assert_eq!(icy.category(), Some("IcyHider Comfy Core"));
        assert_eq!(icy.input_types(), base.input_types());
        assert_eq!(icy.return_types(), base.return_types());
        assert_eq!(icy.function(), base.function());
        assert_eq!(icy.description(), Some("blurs an image"));
        assert_eq!(icy.display_name(), Some("Image Blur"));
        assert_eq!(icy.output_node(), base.output_node());

        // The base keeps its own category.
        assert_eq!(base.category(), Some("image/filters"));
        assert_eq!(base.name(), "ImageBlur");
    }

    #[test]
    fn fixed_label_yields_bare_category() {
        let icy = wrap("SaveImage", MockNode::new("SaveImage").arc(), &CategoryLabel::Fixed).unwrap();
        assert_eq!(icy.category(), Some("IcyHider"));
        assert_eq!(icy.label(), &CategoryLabel::Fixed);
    }

    #[test]
    fn invoke_delegates_to_base() {
        let base = Arc::new(MockNode::new("Add"));
        let icy = wrap("Add", base.clone(), &CategoryLabel::source("Core")).unwrap();

        let direct = base.invoke(&json!({"a": 1})).unwrap();
        let wrapped = icy.invoke(&json!({"a": 1})).unwrap();
        assert_eq!(direct, wrapped);
        assert_eq!(base.invocations(), 2);
    }

    #[test]
    fn wrapping_does_not_run_base_behavior() {
        let base = Arc::new(MockNode::new("Expensive"));
        let _icy = wrap("Expensive", base.clone(), &CategoryLabel::source("Core")).unwrap();
        assert_eq!(base.invocations(), 0);
    }

    #[test]
    fn extra_attributes_are_inherited() {
        let base = MockNode::new("Styled").with_attribute("color", json!("#223344"));
        let icy = wrap("Styled", base.arc(), &CategoryLabel::source("Core")).unwrap();
        assert_eq!(icy.attribute("color"), Some(&json!("#223344")));
        assert_eq!(icy.attribute("missing"), None);
    }

    #[test]
    fn sealed_class_fails_with_name_and_label() {
        let base = MockNode::new("Frozen").sealed();
        let err = wrap("Frozen", base.arc(), &CategoryLabel::source("WAS Node Suite")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Frozen"), "got: {msg}");
        assert!(msg.contains("WAS Node Suite"), "got: {msg}");
    }

    #[test]
    fn pinned_failure_names_the_fixed_category() {
        let base = MockNode::new("SaveImage").sealed();
        let err = wrap("SaveImage", base.arc(), &CategoryLabel::Fixed).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot wrap SaveImage for [IcyHider]: class is sealed against derivation"
        );
    }

    #[test]
    fn unusable_names_fail() {
        let label = CategoryLabel::source("Core");
        assert!(wrap("", MockNode::new("x").arc(), &label).is_err());
        assert!(wrap("   ", MockNode::new("x").arc(), &label).is_err());
        assert!(wrap("Line\nBreak", MockNode::new("x").arc(), &label).is_err());
    }

    #[test]
    fn spaced_names_are_kept_verbatim() {
        let icy = wrap("Image Blend", MockNode::new("Image Blend").arc(), &CategoryLabel::source("WAS Node Suite")).unwrap();
        assert_eq!(icy.name(), "IcyImage Blend");
    }

    #[test]
    fn member_alias_drives_id() {
        let icy = wrap("Alias", MockNode::new("Original").arc(), &CategoryLabel::source("Core")).unwrap();
        assert_eq!(icy.name(), "IcyAlias");
        assert_eq!(icy.member_name(), "Alias");
        assert_eq!(icy.base().name(), "Original");
    }

    #[test]
    fn naming_helpers() {
        assert_eq!(synthesized_id("LoadImage"), "IcyLoadImage");
        assert_eq!(synthesized_display_name("LoadImage"), "Icy LoadImage");
    }
}
