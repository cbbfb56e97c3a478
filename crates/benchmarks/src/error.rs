// Copyright 2025 Language Benchmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the benchmark harness.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running or persisting benchmarks.
///
/// Per-language build and run failures are not errors: they are reported
/// as a [`crate::orchestrator::LanguageOutcome`] and the run continues.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Record could not be serialized or deserialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration sources could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration loaded but is not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// External process could not be started
    #[error("Failed to spawn `{program}`: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl BenchError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BenchError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for benchmark operations.
pub type Result<T> = std::result::Result<T, BenchError>;
