// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the safety checker.

/// Errors that can occur around a safety check.
///
/// The simulation itself is total over a validated snapshot; these errors
/// come from the input or from replaying a report against its snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    /// The snapshot violated a precondition of the check.
    #[error("input error: {0}")]
    Input(#[from] resource_state::InputError),

    /// A report does not replay against the snapshot it claims to describe.
    #[error("report from '{algorithm}' is inconsistent: {detail}")]
    InvalidReport { algorithm: String, detail: String },

    /// No algorithm with the given name exists.
    #[error("unknown algorithm '{0}'; expected 'multi-pass' or 'restart'")]
    UnknownAlgorithm(String),
}
