// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring from configuration to a finished registry build.

use std::path::Path;
use std::sync::Arc;

use icyhider_config::IcyHiderConfig;
use icyhider_core::IcyError;
use icyhider_registry::{load_namespace_manifest, resolve_base_path, Build, Driver};
use tracing::info;

/// Load the host namespace, resolve the source base path, and run the driver.
///
/// The host namespace is required: failing to load it is a broken host
/// contract and is returned as an error. Every optional source failure is
/// contained in the build report instead.
pub fn run_pipeline(config: &IcyHiderConfig) -> Result<Build, IcyError> {
    let host = load_namespace_manifest(Path::new(&config.host.manifest), &config.host.label)?;
    let base = resolve_base_path(&config.sources)?;
    info!(
        host = %config.host.manifest,
        nodes = host.len(),
        base = %base.display(),
        "building registry"
    );
    Ok(Driver::new(config, base, Arc::new(host)).run())
}

#[cfg(test)]
mod tests {
    use icyhider_test_utils::{ManifestBuilder, SourceTree};

    use super::*;

    fn config_for(tree: &SourceTree) -> IcyHiderConfig {
        let mut config = IcyHiderConfig::default();
        config.host.manifest = tree.path().join("comfy-core.toml").display().to_string();
        config.sources.base_path = Some(tree.path().display().to_string());
        config
    }

    #[test]
    fn missing_host_manifest_is_fatal() {
        let tree = SourceTree::new();
        let err = run_pipeline(&config_for(&tree)).unwrap_err();
        assert!(matches!(err, IcyError::Io { .. }));
    }

    #[test]
    fn invalid_host_manifest_is_fatal() {
        let tree = SourceTree::new().with_file("comfy-core.toml", "[[node]\nname = ");
        let err = run_pipeline(&config_for(&tree)).unwrap_err();
        assert!(matches!(err, IcyError::Manifest { .. }));
    }

    #[test]
    fn builds_from_host_and_sources() {
        let host = ManifestBuilder::new()
            .qualifying("LoadImage")
            .qualifying("KSampler")
            .bare("Note")
            .render();
        let suite = ManifestBuilder::new().qualifying("Image_Blend").render();
        let tree = SourceTree::new()
            .with_file("comfy-core.toml", &host)
            .with_file("was-ns/WAS_Node_Suite.toml", &suite);

        let build = run_pipeline(&config_for(&tree)).unwrap();
        assert_eq!(
            build.registry().ids(),
            vec!["IcyImage_Blend", "IcyKSampler", "IcyLoadImage"]
        );
        assert_eq!(build.report().total, 3);
    }
}
