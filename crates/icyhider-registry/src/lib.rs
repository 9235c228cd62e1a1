// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry construction: qualify, wrap, and register node classes.
//!
//! The pipeline takes a required host namespace and optional extension
//! namespaces discovered on disk, wraps every structurally eligible node
//! class so it reports an `IcyHider` category, and collects the wrappers into
//! a [`NodeRegistry`] the host's plugin loader consumes.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use icyhider_config::IcyHiderConfig;
//! use icyhider_registry::{load_namespace_manifest, Driver};
//!
//! let config = IcyHiderConfig::default();
//! let host = load_namespace_manifest("comfy-core.toml".as_ref(), &config.host.label)?;
//! let build = Driver::new(&config, "/opt/comfy/custom_nodes", Arc::new(host)).run();
//! println!("{} nodes wrapped", build.registry().len());
//! # Ok::<(), icyhider_core::IcyError>(())
//! ```

pub mod driver;
pub mod loader;
pub mod manifest;
pub mod qualify;
pub mod registry;
pub mod wrap;

pub use driver::{process_namespace, Build, BuildReport, Driver, StageReport, StageStatus};
pub use loader::{load_aggregate, load_directory, resolve_base_path, DirectoryOutcome, LoadOutcome};
pub use manifest::{load_namespace_manifest, parse_namespace_manifest, ManifestNamespace, NodeDefinition};
pub use qualify::{qualifies, Rejection};
pub use registry::{is_icy_id, NodeRegistry, RegisterOutcome, RegistryExport};
pub use wrap::{wrap, IcyNode};
