// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # safety-checker
//!
//! The Banker's Algorithm safety check: given a validated resource
//! snapshot, decide whether a safe state exists and witness one safe
//! sequence.
//!
//! # Algorithms
//!
//! | Algorithm | Scan order | Sequence for the textbook snapshot |
//! |---|---|---|
//! | [`MultiPassScan`] | ascending passes, release visible within a pass | `P1 P3 P4 P0 P2` |
//! | [`RestartScan`] | restart from P0 after every completion | `P1 P3 P0 P2 P4` |
//!
//! Both always agree on the verdict. [`MultiPassScan`] is the reference
//! tie-break and the one [`check_safety`] uses.
//!
//! # Trait-Based Extensibility
//!
//! ```ignore
//! struct MyAlgorithm;
//! impl SafetyAlgorithm for MyAlgorithm {
//!     fn name(&self) -> &str { "custom" }
//!     fn check(&self, state: &SystemState<Validated>, options: &CheckOptions)
//!         -> SafetyReport { /* ... */ }
//! }
//! ```
//!
//! # Example
//! ```
//! let report = safety_checker::check_safety(
//!     &[vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1], vec![0, 0, 2]],
//!     &[vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2], vec![4, 3, 3]],
//!     &[3, 3, 2],
//! )
//! .unwrap();
//!
//! assert!(report.is_safe());
//! assert_eq!(report.sequence, vec![1, 3, 4, 0, 2]);
//! ```

pub mod algorithm;
mod error;
mod report;

pub use algorithm::multi_pass::MultiPassScan;
pub use algorithm::restart::RestartScan;
pub use algorithm::{algorithm_by_name, CheckOptions, SafetyAlgorithm};
pub use error::CheckerError;
pub use report::{SafetyReport, TraceStep, Verdict};

use resource_state::{state::Validated, SystemState};

/// Checks whether the snapshot given by the three inputs is safe.
///
/// The inputs are validated first; any precondition violation (ragged or
/// mismatched shapes, allocation above the declared maximum, empty
/// dimensions) is returned as [`CheckerError::Input`] instead of a verdict.
pub fn check_safety(
    allocation: &[Vec<u64>],
    max_need: &[Vec<u64>],
    available: &[u64],
) -> Result<SafetyReport, CheckerError> {
    let state = SystemState::from_rows(allocation.to_vec(), max_need.to_vec(), available.to_vec())?
        .validate()?;
    Ok(check_state(&state))
}

/// Runs the reference [`MultiPassScan`] over an already-validated snapshot.
pub fn check_state(state: &SystemState<Validated>) -> SafetyReport {
    MultiPassScan::new().check(state, &CheckOptions::default())
}
