// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Multi-pass scan: the canonical Banker's safety check.
//!
//! Each pass walks the unfinished processes in ascending index order. A
//! process whose Need fits in Work completes on the spot, and the resources
//! it releases are visible to higher-indexed processes later in the *same*
//! pass. A pass that completes nothing ends the check as unsafe.
//!
//! ```text
//! Work ← Available
//! repeat
//!     for p in 0..P where !finish[p]:
//!         if Need[p] ≤ Work: Work += Allocation[p]; finish[p]; push p
//! until all finished (safe) or a pass made no progress (unsafe)
//! ```
//!
//! At most `P` passes of at most `P × R` comparisons: `O(P²·R)`.

use super::{CheckOptions, SafetyAlgorithm, Simulation};
use crate::SafetyReport;
use resource_state::{state::Validated, SystemState};

/// Ascending-index scans with immediate release; deterministic tie-break.
#[derive(Debug, Clone, Default)]
pub struct MultiPassScan;

impl MultiPassScan {
    pub fn new() -> Self {
        Self
    }
}

impl SafetyAlgorithm for MultiPassScan {
    fn name(&self) -> &str {
        "multi-pass"
    }

    fn check(&self, state: &SystemState<Validated>, options: &CheckOptions) -> SafetyReport {
        let mut sim = Simulation::new(state, options);

        while !sim.all_finished() {
            sim.begin_pass();
            let mut progressed = false;

            for p in 0..sim.num_processes() {
                if sim.is_executable(p) {
                    sim.complete(p);
                    progressed = true;
                }
            }

            if !progressed {
                tracing::debug!("no process can execute with current resources");
                break;
            }
        }

        sim.into_report(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Verdict;

    fn textbook(available: Vec<u64>) -> SystemState<Validated> {
        SystemState::from_rows(
            vec![
                vec![0, 1, 0],
                vec![2, 0, 0],
                vec![3, 0, 2],
                vec![2, 1, 1],
                vec![0, 0, 2],
            ],
            vec![
                vec![7, 5, 3],
                vec![3, 2, 2],
                vec![9, 0, 2],
                vec![2, 2, 2],
                vec![4, 3, 3],
            ],
            available,
        )
        .unwrap()
        .validate()
        .unwrap()
    }

    #[test]
    fn test_textbook_safe() {
        let state = textbook(vec![3, 3, 2]);
        let report = MultiPassScan::new().check(&state, &CheckOptions::default());
        assert!(report.is_safe());
        assert_eq!(report.sequence, vec![1, 3, 4, 0, 2]);
        assert_eq!(report.passes, 2);
        assert!(report.blocked.is_empty());
        assert_eq!(report.final_work, vec![10, 5, 7]);
    }

    #[test]
    fn test_release_visible_within_pass() {
        // P1 frees enough for P2 within pass 1; P0 was scanned first and
        // has to wait for pass 2.
        let state = SystemState::from_rows(
            vec![vec![0], vec![2], vec![0]],
            vec![vec![3], vec![3], vec![3]],
            vec![1],
        )
        .unwrap()
        .validate()
        .unwrap();
        let report = MultiPassScan::new().check(&state, &CheckOptions::with_trace());
        assert_eq!(report.sequence, vec![1, 2, 0]);
        assert_eq!(report.passes, 2);

        let trace = report.trace.unwrap();
        assert_eq!(trace[0].pass, 1);
        assert_eq!(trace[1].pass, 1);
        assert_eq!(trace[2].pass, 2);
    }

    #[test]
    fn test_unsafe_zero_available() {
        let state = textbook(vec![0, 0, 0]);
        let report = MultiPassScan::new().check(&state, &CheckOptions::default());
        assert_eq!(report.verdict, Verdict::Unsafe);
        assert!(report.sequence.is_empty());
        assert_eq!(report.blocked, vec![0, 1, 2, 3, 4]);
        assert_eq!(report.passes, 1);
    }

    #[test]
    fn test_partial_then_stuck() {
        // P1, P3 and P4 finish, but P0 and P2 need more of A than ever frees up.
        let state = textbook(vec![1, 2, 2]);
        let report = MultiPassScan::new().check(&state, &CheckOptions::default());
        assert!(!report.is_safe());
        assert_eq!(report.sequence, vec![1, 3, 4]);
        assert_eq!(report.final_work, vec![5, 3, 5]);
        assert_eq!(report.blocked, vec![0, 2]);
        assert_eq!(report.passes, 2);
    }

    #[test]
    fn test_trace_work_is_monotonic() {
        let state = textbook(vec![3, 3, 2]);
        let report = MultiPassScan::new().check(&state, &CheckOptions::with_trace());
        let trace = report.trace.unwrap();
        assert_eq!(trace.len(), 5);
        assert_eq!(trace[0].work_before, vec![3, 3, 2]);
        for pair in trace.windows(2) {
            assert_eq!(pair[0].work_after, pair[1].work_before);
        }
        for step in &trace {
            assert!(step.work_before.iter().zip(&step.work_after).all(|(b, a)| b <= a));
        }
    }
}
