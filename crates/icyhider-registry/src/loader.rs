// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discovery and loading of optional extension namespaces.
//!
//! Two conventions are supported, each applied independently:
//!
//! - **Aggregate**: one unit, `<base>/<dir>/<unit>.toml`.
//! - **Directory**: every `*.toml` file in `<base>/<dir>`, except files whose
//!   name starts with `_`, each loaded as its own namespace.
//!
//! Every load attempt ends in a typed outcome. A missing location is
//! [`LoadOutcome::Absent`]; a location that exists but cannot be read or
//! parsed is [`LoadOutcome::Failed`]. Nothing here returns early on a
//! per-source failure.

use std::path::{Path, PathBuf};

use icyhider_config::model::{AggregateSourceConfig, DirectorySourceConfig, SourcesConfig};
use icyhider_core::IcyError;
use tracing::debug;

use crate::manifest::{load_namespace_manifest, ManifestNamespace};
use crate::qualify::RESERVED_MARKER;

/// File extension of namespace manifests.
pub const MANIFEST_EXTENSION: &str = "toml";

/// Result of loading one source.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(ManifestNamespace),
    /// The expected location does not exist.
    Absent { path: PathBuf },
    /// The location exists but loading it failed.
    Failed { path: PathBuf, error: IcyError },
}

/// One file found by the directory convention.
#[derive(Debug)]
pub struct DirectoryEntry {
    /// `<label_prefix>/<file stem>`.
    pub label: String,
    pub outcome: LoadOutcome,
}

/// Result of scanning the directory convention's location.
#[derive(Debug)]
pub enum DirectoryOutcome {
    /// Files in lexical file-name order.
    Scanned(Vec<DirectoryEntry>),
    Absent { path: PathBuf },
    /// The directory exists but could not be listed.
    Failed { path: PathBuf, error: IcyError },
}

/// Default base path: the parent of the directory holding the executable,
/// so extension directories sit next to this tool's install directory.
pub fn install_base() -> Result<PathBuf, IcyError> {
    let exe = std::env::current_exe().map_err(|source| IcyError::Io {
        path: PathBuf::from("<current executable>"),
        source,
    })?;
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            IcyError::Config(format!(
                "cannot derive sources.base_path from executable path {}",
                exe.display()
            ))
        })
}

/// Resolve `sources.base_path`, falling back to [`install_base`].
pub fn resolve_base_path(config: &SourcesConfig) -> Result<PathBuf, IcyError> {
    match &config.base_path {
        Some(path) => Ok(PathBuf::from(path)),
        None => install_base(),
    }
}

/// Load the aggregate-convention source.
pub fn load_aggregate(config: &AggregateSourceConfig, base: &Path) -> LoadOutcome {
    let dir = base.join(&config.dir);
    if !dir.exists() {
        debug!(path = %dir.display(), "aggregate source directory not present");
        return LoadOutcome::Absent { path: dir };
    }

    let unit = dir.join(format!("{}.{MANIFEST_EXTENSION}", config.unit));
    if !unit.exists() {
        debug!(path = %unit.display(), "aggregate unit not present");
        return LoadOutcome::Absent { path: unit };
    }

    load_unit(&unit, &config.label)
}

/// Load every unit of the directory-convention source.
pub fn load_directory(config: &DirectorySourceConfig, base: &Path) -> DirectoryOutcome {
    let dir = base.join(&config.dir);
    if !dir.exists() {
        debug!(path = %dir.display(), "directory source not present");
        return DirectoryOutcome::Absent { path: dir };
    }

    let files = match list_units(&dir) {
        Ok(files) => files,
        Err(source) => {
            return DirectoryOutcome::Failed {
                error: IcyError::Io {
                    path: dir.clone(),
                    source,
                },
                path: dir,
            };
        }
    };

    let entries = files
        .into_iter()
        .map(|(stem, path)| {
            let label = format!("{}/{stem}", config.label_prefix);
            let outcome = load_unit(&path, &label);
            DirectoryEntry { label, outcome }
        })
        .collect();

    DirectoryOutcome::Scanned(entries)
}

fn load_unit(path: &Path, label: &str) -> LoadOutcome {
    match load_namespace_manifest(path, label) {
        Ok(namespace) => {
            debug!(path = %path.display(), nodes = namespace.len(), "loaded namespace manifest");
            LoadOutcome::Loaded(namespace)
        }
        Err(error) => LoadOutcome::Failed {
            path: path.to_path_buf(),
            error,
        },
    }
}

/// List `(stem, path)` of loadable unit files, sorted by file name.
fn list_units(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut units = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(MANIFEST_EXTENSION) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem.starts_with(RESERVED_MARKER) || stem.is_empty() {
            continue;
        }
        if path.is_dir() {
            continue;
        }
        units.push((stem.to_string(), path.clone()));
    }
    units.sort_by(|a, b| a.1.file_name().cmp(&b.1.file_name()));
    Ok(units)
}

#[cfg(test)]
mod tests {
    use icyhider_core::Namespace;
    use icyhider_test_utils::{ManifestBuilder, SourceTree};

    use super::*;

    fn aggregate_config() -> AggregateSourceConfig {
        AggregateSourceConfig::default()
    }

    fn directory_config() -> DirectorySourceConfig {
        DirectorySourceConfig::default()
    }

    #[test]
    fn aggregate_missing_directory_is_absent() {
        let tree = SourceTree::new();
        let outcome = load_aggregate(&aggregate_config(), tree.path());
        assert!(matches!(outcome, LoadOutcome::Absent { .. }));
    }

    #[test]
    fn aggregate_missing_unit_is_absent() {
        let tree = SourceTree::new().with_dir("was-ns");
        match load_aggregate(&aggregate_config(), tree.path()) {
            LoadOutcome::Absent { path } => assert!(path.ends_with("WAS_Node_Suite.toml")),
            other => panic!("expected Absent, got {other:?}"),
        }
    }

    #[test]
    fn aggregate_loads_with_configured_label() {
        let manifest = ManifestBuilder::new().qualifying("Image_Blend").render();
        let tree = SourceTree::new().with_file("was-ns/WAS_Node_Suite.toml", &manifest);

        match load_aggregate(&aggregate_config(), tree.path()) {
            LoadOutcome::Loaded(ns) => {
                assert_eq!(ns.label(), "WAS Node Suite");
                assert_eq!(ns.len(), 1);
            }
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[test]
    fn aggregate_invalid_unit_fails() {
        let tree = SourceTree::new().with_file("was-ns/WAS_Node_Suite.toml", "[[node]\n");
        assert!(matches!(
            load_aggregate(&aggregate_config(), tree.path()),
            LoadOutcome::Failed { .. }
        ));
    }

    #[test]
    fn directory_missing_is_absent() {
        let tree = SourceTree::new();
        assert!(matches!(
            load_directory(&directory_config(), tree.path()),
            DirectoryOutcome::Absent { .. }
        ));
    }

    #[test]
    fn directory_path_that_is_a_file_fails() {
        let tree = SourceTree::new().with_file("was-extras/nodes", "not a directory");
        assert!(matches!(
            load_directory(&directory_config(), tree.path()),
            DirectoryOutcome::Failed { .. }
        ));
    }

    #[test]
    fn directory_files_load_in_lexical_order_and_skip_reserved() {
        let unit = ManifestBuilder::new().qualifying("Node").render();
        // Written out of order on purpose.
        let tree = SourceTree::new()
            .with_file("was-extras/nodes/zeta.toml", &unit)
            .with_file("was-extras/nodes/_private.toml", &unit)
            .with_file("was-extras/nodes/alpha.toml", &unit)
            .with_file("was-extras/nodes/readme.md", "ignored")
            .with_file("was-extras/nodes/mid.toml", &unit);

        let DirectoryOutcome::Scanned(entries) = load_directory(&directory_config(), tree.path())
        else {
            panic!("expected Scanned");
        };
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["was-extras/alpha", "was-extras/mid", "was-extras/zeta"]
        );
        assert!(entries
            .iter()
            .all(|e| matches!(e.outcome, LoadOutcome::Loaded(_))));
    }

    #[test]
    fn directory_failure_is_isolated_per_file() {
        let good = ManifestBuilder::new().qualifying("A").qualifying("B").render();
        let tree = SourceTree::new()
            .with_file("was-extras/nodes/broken.toml", "this is = = not toml")
            .with_file("was-extras/nodes/good.toml", &good);

        let DirectoryOutcome::Scanned(entries) = load_directory(&directory_config(), tree.path())
        else {
            panic!("expected Scanned");
        };
        assert_eq!(entries.len(), 2);
        assert!(matches!(entries[0].outcome, LoadOutcome::Failed { .. }));
        match &entries[1].outcome {
            LoadOutcome::Loaded(ns) => assert_eq!(ns.len(), 2),
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[test]
    fn configured_base_path_wins() {
        let config = SourcesConfig {
            base_path: Some("/srv/nodes".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_base_path(&config).unwrap(), PathBuf::from("/srv/nodes"));
    }

    #[test]
    fn install_base_is_an_ancestor_of_the_executable() {
        let base = install_base().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert!(exe.starts_with(&base));
    }
}
