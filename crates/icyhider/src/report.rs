// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text and JSON rendering of build results.

use icyhider_core::{IcyError, NodeClass};
use icyhider_registry::{BuildReport, NodeRegistry, StageStatus};
use serde::Serialize;

/// One row of `icyhider list`.
#[derive(Debug, Serialize)]
pub struct ListEntry<'a> {
    pub id: &'a str,
    pub display_name: &'a str,
    pub category: &'a str,
    /// Name of the original class the wrapper delegates to.
    pub base: &'a str,
}

/// Render the per-source summary printed by `icyhider build`.
pub fn render_summary(report: &BuildReport) -> String {
    let mut out = String::new();
    for stage in &report.stages {
        let status = match &stage.status {
            StageStatus::Processed { count } => format!("{count} wrapped"),
            StageStatus::Absent { path } => format!("not found ({})", path.display()),
            StageStatus::Failed { error, .. } => format!("error: {error}"),
            StageStatus::Disabled => "disabled".to_string(),
        };
        let label = if stage.label.is_empty() {
            "-"
        } else {
            stage.label.as_str()
        };
        out.push_str(&format!("{:<10} {:<32} {status}\n", stage.kind.to_string(), label));
    }
    if let Some(total) = report.directory_total {
        out.push_str(&format!("directory total: {total}\n"));
    }
    out.push_str(&format!("total: {}\n", report.total));
    out
}

/// Collect list rows in id order.
pub fn list_entries(registry: &NodeRegistry) -> Vec<ListEntry<'_>> {
    registry
        .iter()
        .map(|(id, node, display_name)| ListEntry {
            id,
            display_name,
            category: node.category().unwrap_or_default(),
            base: node.base().name(),
        })
        .collect()
}

/// Render rows as tab-separated text.
pub fn render_list(entries: &[ListEntry<'_>]) -> String {
    entries
        .iter()
        .map(|e| format!("{}\t{}\t{}\n", e.id, e.display_name, e.category))
        .collect()
}

/// Pretty-printed JSON of both registry mappings.
pub fn export_json(registry: &NodeRegistry) -> Result<String, IcyError> {
    serde_json::to_string_pretty(&registry.export())
        .map_err(|e| IcyError::Internal(format!("failed to serialize registry: {e}")))
}

/// Pretty-printed JSON of any serializable value.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, IcyError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| IcyError::Internal(format!("failed to serialize output: {e}")))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use icyhider_config::IcyHiderConfig;
    use icyhider_core::{SourceKind, StaticNamespace};
    use icyhider_registry::{Driver, StageReport};
    use icyhider_test_utils::MockNode;

    use super::*;

    #[test]
    fn summary_distinguishes_absent_and_failed() {
        let report = BuildReport {
            stages: vec![
                StageReport {
                    kind: SourceKind::Host,
                    label: "Comfy Core".to_string(),
                    status: StageStatus::Processed { count: 3 },
                },
                StageReport {
                    kind: SourceKind::Aggregate,
                    label: "WAS Node Suite".to_string(),
                    status: StageStatus::Absent {
                        path: PathBuf::from("/base/was-ns"),
                    },
                },
                StageReport {
                    kind: SourceKind::Directory,
                    label: "was-extras/broken".to_string(),
                    status: StageStatus::Failed {
                        path: PathBuf::from("/base/was-extras/nodes/broken.toml"),
                        error: "bad toml".to_string(),
                    },
                },
            ],
            directory_total: Some(0),
            total: 3,
        };

        let summary = render_summary(&report);
        let lines: Vec<&str> = summary.lines().collect();
        assert!(lines[0].starts_with("host"));
        assert!(lines[0].ends_with("3 wrapped"));
        assert!(lines[1].contains("not found (/base/was-ns)"));
        assert!(lines[2].contains("error: bad toml"));
        assert_eq!(lines[3], "directory total: 0");
        assert_eq!(lines[4], "total: 3");
    }

    #[test]
    fn list_and_export_cover_every_entry() {
        let host = StaticNamespace::new("Comfy Core")
            .with(MockNode::new("KSampler").arc())
            .with(MockNode::new("LoadImage").arc());
        let build = Driver::new(&IcyHiderConfig::default(), "/nonexistent", Arc::new(host)).run();

        let entries = list_entries(build.registry());
        assert_eq!(
            render_list(&entries),
            "IcyKSampler\tIcy KSampler\tIcyHider Comfy Core\nIcyLoadImage\tIcy LoadImage\tIcyHider\n"
        );
        assert_eq!(entries[0].base, "KSampler");

        let json: serde_json::Value = serde_json::from_str(&export_json(build.registry()).unwrap()).unwrap();
        assert_eq!(json["node_display_name_mappings"]["IcyKSampler"], "Icy KSampler");
        assert_eq!(json["node_class_mappings"]["IcyLoadImage"]["category"], "IcyHider");
    }
}
