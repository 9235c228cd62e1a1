// SPDX-FileCopyrightText: 2026 IcyHider Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the IcyHider registry builder.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across IcyHider crates.
#[derive(Debug, Error)]
pub enum IcyError {
    /// Configuration errors (invalid values, unusable paths).
    #[error("configuration error: {0}")]
    Config(String),

    /// A namespace manifest could not be parsed or failed validation.
    #[error("invalid manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// Filesystem errors while reading a source.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A qualifying node class could not be wrapped.
    #[error("cannot wrap {name} for [{label}]: {reason}")]
    Synthesis {
        name: String,
        label: String,
        reason: String,
    },

    /// The node only carries a description and has no in-process behavior.
    #[error("node {name} has no in-process implementation")]
    NotExecutable { name: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IcyError {
    /// Shorthand for a manifest error at `path`.
    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        IcyError::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }
}
