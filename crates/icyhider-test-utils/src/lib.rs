// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for IcyHider tests.
//!
//! # Components
//!
//! - [`MockNode`] - Configurable in-process node class that counts invocations
//! - [`ManifestBuilder`] - Renders namespace manifest TOML
//! - [`SourceTree`] - Temporary base directory with extension sources laid out

pub mod fixtures;
pub mod mock_node;

pub use fixtures::{ManifestBuilder, SourceTree};
pub use mock_node::MockNode;
