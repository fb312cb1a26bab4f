// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Restart scan: first-fit search that rescans from P0 after every completion.
//!
//! Always picks the lowest-indexed executable process given the current
//! Work. It reaches the same verdict as [`super::multi_pass::MultiPassScan`]
//! (a released allocation can only make more processes executable, so the
//! order of completions never decides safety) but may witness a different
//! safe sequence. Worst case `O(P²·R)` like the multi-pass scan.

use super::{CheckOptions, SafetyAlgorithm, Simulation};
use crate::SafetyReport;
use resource_state::{state::Validated, SystemState};

/// Lowest-index-first search, restarting after each completion.
#[derive(Debug, Clone, Default)]
pub struct RestartScan;

impl RestartScan {
    pub fn new() -> Self {
        Self
    }
}

impl SafetyAlgorithm for RestartScan {
    fn name(&self) -> &str {
        "restart"
    }

    fn check(&self, state: &SystemState<Validated>, options: &CheckOptions) -> SafetyReport {
        let mut sim = Simulation::new(state, options);

        while !sim.all_finished() {
            sim.begin_pass();
            let next = (0..sim.num_processes()).find(|&p| sim.is_executable(p));
            match next {
                Some(p) => sim.complete(p),
                None => {
                    tracing::debug!("no process can execute with current resources");
                    break;
                }
            }
        }

        sim.into_report(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::multi_pass::MultiPassScan;

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
    fn test_textbook_restart_sequence() {
        let state = textbook(vec![3, 3, 2]);
        let report = RestartScan::new().check(&state, &CheckOptions::default());
        assert!(report.is_safe());
        // P0 becomes executable right after P3 and is picked before P4.
        assert_eq!(report.sequence, vec![1, 3, 0, 2, 4]);
        assert_eq!(report.passes, 5);
    }

    #[test]
    fn test_agrees_with_multi_pass() {
        for available in [vec![3, 3, 2], vec![0, 0, 0], vec![1, 2, 2], vec![10, 10, 10]] {
            let state = textbook(available);
            let a = RestartScan::new().check(&state, &CheckOptions::default());
            let b = MultiPassScan::new().check(&state, &CheckOptions::default());
            assert_eq!(a.verdict, b.verdict);
            assert_eq!(a.final_work, b.final_work);
            a.validate(&state).unwrap();
        }
    }
}
