// Copyright 2025 Language Benchmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for chart generation.

use langbench_benchmarks::BenchError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while visualizing results.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Loading the result set failed
    #[error(transparent)]
    Bench(#[from] BenchError),

    /// Drawing or encoding a chart failed
    #[error("Failed to render {}: {message}", path.display())]
    Render {
        /// Target image path.
        path: PathBuf,
        /// Backend error message.
        message: String,
    },
}

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;
