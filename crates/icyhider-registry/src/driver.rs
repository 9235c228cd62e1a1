// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot orchestration of the wrap pipeline over all sources.
//!
//! The [`Driver`] processes the host namespace first, then the aggregate
//! source, then every unit of the directory source. Each source is processed
//! the same way: qualify every member, wrap it, register it. Failures inside
//! one class or one source are logged and recorded in the [`BuildReport`];
//! they never stop later steps. [`Driver::run`] consumes the driver, so a
//! driver runs at most once and the registry it returns is no longer
//! mutated by it.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use icyhider_config::model::{AggregateSourceConfig, DirectorySourceConfig};
use icyhider_config::IcyHiderConfig;
use icyhider_core::{CategoryLabel, Namespace, SourceKind};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::loader::{self, DirectoryOutcome, LoadOutcome};
use crate::qualify;
use crate::registry::NodeRegistry;
use crate::wrap::{synthesized_display_name, synthesized_id, wrap};

/// Outcome of one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageStatus {
    /// The source was processed; `count` entries were accepted.
    Processed { count: usize },
    /// The source location does not exist.
    Absent { path: PathBuf },
    /// The source exists but could not be loaded.
    Failed { path: PathBuf, error: String },
    /// The source is turned off in configuration.
    Disabled,
}

/// Report line for one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub kind: SourceKind,
    pub label: String,
    #[serde(flatten)]
    pub status: StageStatus,
}

impl StageReport {
    /// Entries this source contributed, zero unless processed.
    pub fn count(&self) -> usize {
        match self.status {
            StageStatus::Processed { count } => count,
            _ => 0,
        }
    }
}

/// Summary of a full build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildReport {
    /// One entry per source, in processing order.
    pub stages: Vec<StageReport>,
    /// Running total across directory units, when the directory was scanned.
    pub directory_total: Option<usize>,
    /// Distinct ids in the final registry.
    pub total: usize,
}

impl BuildReport {
    /// Find the report for a source label.
    pub fn stage(&self, label: &str) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.label == label)
    }

    /// Sources that existed but failed to load.
    pub fn failures(&self) -> impl Iterator<Item = &StageReport> {
        self.stages
            .iter()
            .filter(|s| matches!(s.status, StageStatus::Failed { .. }))
    }
}

/// The finished registry plus the report of how it was built.
#[derive(Debug)]
pub struct Build {
    registry: NodeRegistry,
    report: BuildReport,
}

impl Build {
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }
}

/// Wrap every qualifying member of `namespace` into `registry`.
///
/// Members named in `pinned` get the bare `IcyHider` category; the rest get
/// `IcyHider <namespace label>`. Returns the number of entries the registry
/// accepted.
pub fn process_namespace(
    registry: &mut NodeRegistry,
    namespace: &dyn Namespace,
    pinned: &BTreeSet<String>,
) -> usize {
    let label = namespace.label();
    let source_label = CategoryLabel::source(label);

    let mut members = namespace.members();
    members.sort_by(|a, b| a.0.cmp(&b.0));

    let mut count = 0;
    for (name, class) in members {
        if let Err(rejection) = qualify::check(&name, class.as_ref()) {
            trace!(source = %label, node = %name, reason = %rejection, "not wrappable");
            continue;
        }

        let category = if pinned.contains(&name) {
            CategoryLabel::Fixed
        } else {
            source_label.clone()
        };

        match wrap(&name, class, &category) {
            Ok(node) => {
                let outcome = registry.register(
                    synthesized_id(&name),
                    node,
                    synthesized_display_name(&name),
                );
                if outcome.accepted() {
                    count += 1;
                }
            }
            Err(e) => {
                warn!(source = %label, node = %name, error = %e, "skipping node");
            }
        }
    }
    count
}

/// Runs the pipeline once over the host namespace and configured sources.
pub struct Driver {
    host: Arc<dyn Namespace>,
    pinned: BTreeSet<String>,
    aggregate: Option<AggregateSourceConfig>,
    directory: Option<DirectorySourceConfig>,
    base_path: PathBuf,
    registry: NodeRegistry,
}

impl Driver {
    /// Create a driver from configuration.
    ///
    /// `base_path` is the directory extension sources are resolved against
    /// (see [`loader::resolve_base_path`]).
    pub fn new(config: &IcyHiderConfig, base_path: impl Into<PathBuf>, host: Arc<dyn Namespace>) -> Self {
        let sources = &config.sources;
        Self {
            host,
            pinned: config.host.pinned.iter().cloned().collect(),
            aggregate: sources.aggregate.enabled.then(|| sources.aggregate.clone()),
            directory: sources.directory.enabled.then(|| sources.directory.clone()),
            base_path: base_path.into(),
            registry: NodeRegistry::new(config.registry.collision),
        }
    }

    /// Run every stage and return the finished registry.
    pub fn run(mut self) -> Build {
        let mut report = BuildReport::default();

        report.stages.push(self.run_host());
        report.stages.push(self.run_aggregate());
        let (stages, directory_total) = self.run_directory();
        report.stages.extend(stages);
        report.directory_total = directory_total;

        report.total = self.registry.len();
        info!(total = report.total, "total nodes wrapped");

        Build {
            registry: self.registry,
            report,
        }
    }

    fn run_host(&mut self) -> StageReport {
        let host = Arc::clone(&self.host);
        let count = process_namespace(&mut self.registry, host.as_ref(), &self.pinned);
        info!(source = %host.label(), count, "wrapped host nodes");
        StageReport {
            kind: SourceKind::Host,
            label: host.label().to_string(),
            status: StageStatus::Processed { count },
        }
    }

    fn run_aggregate(&mut self) -> StageReport {
        let Some(config) = self.aggregate.take() else {
            debug!("aggregate source disabled");
            return StageReport {
                kind: SourceKind::Aggregate,
                label: String::new(),
                status: StageStatus::Disabled,
            };
        };

        let status = self.process_outcome(
            &config.label,
            loader::load_aggregate(&config, &self.base_path),
        );
        StageReport {
            kind: SourceKind::Aggregate,
            label: config.label,
            status,
        }
    }

    fn run_directory(&mut self) -> (Vec<StageReport>, Option<usize>) {
        let Some(config) = self.directory.take() else {
            debug!("directory source disabled");
            let stage = StageReport {
                kind: SourceKind::Directory,
                label: String::new(),
                status: StageStatus::Disabled,
            };
            return (vec![stage], None);
        };

        let prefix = config.label_prefix.clone();
        match loader::load_directory(&config, &self.base_path) {
            DirectoryOutcome::Absent { path } => {
                info!(source = %prefix, path = %path.display(), "source not found, skipping");
                let stage = StageReport {
                    kind: SourceKind::Directory,
                    label: prefix,
                    status: StageStatus::Absent { path },
                };
                (vec![stage], None)
            }
            DirectoryOutcome::Failed { path, error } => {
                warn!(source = %prefix, path = %path.display(), error = %error, "error loading source");
                let stage = StageReport {
                    kind: SourceKind::Directory,
                    label: prefix,
                    status: StageStatus::Failed {
                        path,
                        error: error.to_string(),
                    },
                };
                (vec![stage], None)
            }
            DirectoryOutcome::Scanned(entries) => {
                let mut stages = Vec::with_capacity(entries.len());
                let mut total = 0;
                for entry in entries {
                    let status = self.process_outcome(&entry.label, entry.outcome);
                    if let StageStatus::Processed { count } = status {
                        total += count;
                    }
                    stages.push(StageReport {
                        kind: SourceKind::Directory,
                        label: entry.label,
                        status,
                    });
                }
                info!(source = %prefix, count = total, units = stages.len(), "wrapped directory source nodes");
                (stages, Some(total))
            }
        }
    }

    /// Process one optional source, converting its outcome into a status.
    fn process_outcome(&mut self, label: &str, outcome: LoadOutcome) -> StageStatus {
        match outcome {
            LoadOutcome::Loaded(namespace) => {
                let count = process_namespace(&mut self.registry, &namespace, &BTreeSet::new());
                info!(source = %label, count, "wrapped source nodes");
                StageStatus::Processed { count }
            }
            LoadOutcome::Absent { path } => {
                info!(source = %label, path = %path.display(), "source not found, skipping");
                StageStatus::Absent { path }
            }
            LoadOutcome::Failed { path, error } => {
                warn!(source = %label, path = %path.display(), error = %error, "error loading source");
                StageStatus::Failed {
                    path,
                    error: error.to_string(),
                }
            }
        }
    }
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("host", &self.host.label())
            .field("pinned", &self.pinned)
            .field("base_path", &self.base_path)
            .finish()
    }
}
