// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for loading and validating resource-allocation snapshots.

/// Errors raised while reading or validating a snapshot.
///
/// Every variant aborts the pipeline before the safety check runs.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The input source could not be read.
    #[error("failed to read input '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The JSON input is malformed.
    #[error("failed to parse JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// A token is not a non-negative integer. `position` is 1-based.
    #[error("invalid token '{token}' at position {position}: expected a non-negative integer")]
    InvalidToken { position: usize, token: String },

    /// The input ended before a section was complete.
    #[error("input truncated in {section}: expected {expected} values, found {found}")]
    Truncated {
        section: &'static str,
        expected: usize,
        found: usize,
    },

    /// Tokens remain after the available vector.
    #[error("unexpected trailing data: {count} extra value(s) after the available vector")]
    TrailingData { count: usize },

    /// The snapshot has no processes or no resource types.
    #[error("snapshot needs processes and resource types (got {processes}x{resources})")]
    EmptyDimensions { processes: usize, resources: usize },

    /// A matrix or vector does not have the expected shape.
    #[error("shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: String,
        expected: String,
        actual: String,
    },

    /// A process holds more of a resource than its declared maximum.
    #[error("process P{process} holds {allocated} of resource {resource}, above its maximum {max}")]
    AllocationExceedsMax {
        process: usize,
        resource: usize,
        allocated: u64,
        max: u64,
    },

    /// Resource totals do not fit in a `u64`.
    #[error("resource {resource} total overflows u64")]
    Overflow { resource: usize },
}
