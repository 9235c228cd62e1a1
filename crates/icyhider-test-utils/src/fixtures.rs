// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk fixtures: manifest text and temporary source layouts.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Renders namespace manifest TOML node by node.
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    header: Option<String>,
    blocks: Vec<String>,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `[namespace]` section.
    pub fn namespace(mut self, name: &str, version: &str) -> Self {
        self.header = Some(format!(
            "[namespace]\nname = {name:?}\nversion = {version:?}\n"
        ));
        self
    }

    /// A node exposing both input and output specifications.
    pub fn qualifying(self, name: &str) -> Self {
        self.raw(&format!(
            "[[node]]\nname = {name:?}\nfunction = \"run\"\n\
             return_types = [\"IMAGE\"]\n\
             input_types = {{ required = {{ image = [\"IMAGE\"] }} }}\n"
        ))
    }

    /// A node exposing neither specification.
    pub fn bare(self, name: &str) -> Self {
        self.raw(&format!("[[node]]\nname = {name:?}\ncategory = \"utils\"\n"))
    }

    /// A node exposing only the input specification.
    pub fn input_only(self, name: &str) -> Self {
        self.raw(&format!(
            "[[node]]\nname = {name:?}\ninput_types = {{ required = {{ text = [\"STRING\"] }} }}\n"
        ))
    }

    /// A qualifying node that refuses derivation.
    pub fn sealed(self, name: &str) -> Self {
        self.raw(&format!(
            "[[node]]\nname = {name:?}\nsealed = true\nreturn_types = []\ninput_types = {{}}\n"
        ))
    }

    /// Append a hand-written TOML block.
    pub fn raw(mut self, block: &str) -> Self {
        self.blocks.push(block.to_string());
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(header) = &self.header {
            out.push_str(header);
            out.push('\n');
        }
        for block in &self.blocks {
            out.push_str(block);
            out.push('\n');
        }
        out
    }
}

/// A temporary base directory for extension sources.
///
/// The directory is removed when the tree is dropped.
#[derive(Debug)]
pub struct SourceTree {
    dir: TempDir,
}

impl SourceTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create an (empty) directory relative to the base.
    pub fn with_dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.path().join(relative)).expect("create fixture dir");
        self
    }

    /// Write a file relative to the base, creating parent directories.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        self.write(relative, content);
        self
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture parent dir");
        }
        fs::write(&path, content).expect("write fixture file");
    }
}

impl Default for SourceTree {
    fn default() -> Self {
        Self::new()
    }
}
