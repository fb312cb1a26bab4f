// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Property tests over randomly generated snapshots.
//!
//! Small snapshots are cross-checked against an exhaustive search over all
//! completion orders, which shares no code with the algorithms under test.

use proptest::prelude::*;
use resource_state::{state::Validated, SystemState};
use safety_checker::{CheckOptions, MultiPassScan, RestartScan, SafetyAlgorithm, Verdict};

/// Generates a valid snapshot with `1..=max_p` processes and `1..=max_r`
/// resource types. Max need is allocation plus a random extra.
fn snapshot(max_p: usize, max_r: usize) -> impl Strategy<Value = SystemState<Validated>> {
    (1..=max_p, 1..=max_r).prop_flat_map(|(p, r)| {
        (
            proptest::collection::vec(proptest::collection::vec(0u64..6, r), p),
            proptest::collection::vec(proptest::collection::vec(0u64..6, r), p),
            proptest::collection::vec(0u64..8, r),
        )
            .prop_map(|(allocation, extra, available)| {
                let max_need = allocation
                    .iter()
                    .zip(&extra)
                    .map(|(a, e)| a.iter().zip(e).map(|(a, e)| a + e).collect())
                    .collect();
                SystemState::from_rows(allocation, max_need, available)
                    .unwrap()
                    .validate()
                    .unwrap()
            })
    })
}

/// Returns `true` if some permutation of the processes completes.
fn exists_safe_order(state: &SystemState<Validated>) -> bool {
    fn search(
        state: &SystemState<Validated>,
        need: &resource_state::Matrix,
        work: &mut Vec<u64>,
        done: &mut Vec<bool>,
        remaining: usize,
    ) -> bool {
        if remaining == 0 {
            return true;
        }
        for p in 0..done.len() {
            if done[p] || need.row(p).iter().zip(work.iter()).any(|(n, w)| n > w) {
                continue;
            }
            done[p] = true;
            for (w, a) in work.iter_mut().zip(state.allocation().row(p)) {
                *w += a;
            }
            if search(state, need, work, done, remaining - 1) {
                return true;
            }
            for (w, a) in work.iter_mut().zip(state.allocation().row(p)) {
                *w -= a;
            }
            done[p] = false;
        }
        false
    }

    let need = state.need();
    let mut work = state.available().to_vec();
    let mut done = vec![false; state.num_processes()];
    search(state, &need, &mut work, &mut done, state.num_processes())
}

proptest! {
    #[test]
    fn verdict_matches_exhaustive_search(state in snapshot(5, 3)) {
        let report = MultiPassScan::new().check(&state, &CheckOptions::default());
        prop_assert_eq!(report.is_safe(), exists_safe_order(&state));
    }

    #[test]
    fn reports_always_replay(state in snapshot(8, 4)) {
        for algorithm in [&MultiPassScan::new() as &dyn SafetyAlgorithm, &RestartScan::new()] {
            let report = algorithm.check(&state, &CheckOptions::default());
            prop_assert!(report.validate(&state).is_ok());
        }
    }

    #[test]
    fn safe_sequence_is_a_permutation(state in snapshot(8, 4)) {
        let report = MultiPassScan::new().check(&state, &CheckOptions::default());
        if report.is_safe() {
            let mut sorted = report.sequence.clone();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..state.num_processes()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn unsafe_is_a_true_deadlock(state in snapshot(8, 4)) {
        let report = MultiPassScan::new().check(&state, &CheckOptions::default());
        if report.verdict == Verdict::Unsafe {
            let need = state.need();
            for &p in &report.blocked {
                let fits = need.row(p).iter().zip(&report.final_work).all(|(n, w)| n <= w);
                prop_assert!(!fits, "P{} is executable at termination", p);
            }
        }
    }

    #[test]
    fn algorithms_agree_on_verdict(state in snapshot(8, 4)) {
        let a = MultiPassScan::new().check(&state, &CheckOptions::default());
        let b = RestartScan::new().check(&state, &CheckOptions::default());
        prop_assert_eq!(a.verdict, b.verdict);
        prop_assert_eq!(a.blocked, b.blocked);
    }

    #[test]
    fn passes_are_bounded(state in snapshot(8, 4)) {
        let report = MultiPassScan::new().check(&state, &CheckOptions::default());
        prop_assert!(report.passes <= state.num_processes());
        prop_assert!(report.passes >= 1);
    }
}
