// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the IcyHider registry builder.
//!
//! Defines the [`NodeClass`] capability trait that every wrappable node
//! exposes, the [`Namespace`] trait for sources of nodes, the shared error
//! type, and the host-facing [`NodeInfo`] description.

pub mod error;
pub mod traits;
pub mod types;

pub use error::IcyError;
pub use traits::{Namespace, NodeClass, StaticNamespace};
pub use types::{CategoryLabel, InputSpec, NodeInfo, SourceKind, CATEGORY_PREFIX, ID_PREFIX};
