// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Safety report: the output of a [`crate::SafetyAlgorithm`].
//!
//! A report carries the verdict, the witnessed safe sequence, and enough
//! of the simulation (Need matrix, final Work, blocked processes, optional
//! trace) for a presentation layer to explain the result without re-running
//! the check.

use crate::CheckerError;
use resource_state::{state::Validated, Matrix, SystemState};
use std::fmt;

/// Outcome of a safety check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every process can run to completion in some order.
    Safe,
    /// Some processes can never obtain their remaining need.
    Unsafe,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Safe => f.write_str("safe"),
            Verdict::Unsafe => f.write_str("unsafe"),
        }
    }
}

/// One simulated process completion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TraceStep {
    /// 1-based scan number in which the process completed.
    pub pass: usize,
    /// Index of the completed process.
    pub process: usize,
    /// Remaining need of the process at that moment.
    pub need: Vec<u64>,
    /// Work vector before the process released its allocation.
    pub work_before: Vec<u64>,
    /// Work vector after the release.
    pub work_after: Vec<u64>,
}

/// The structured result of a safety check.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SafetyReport {
    /// Name of the algorithm that produced this report.
    pub algorithm: String,
    /// Safe or unsafe.
    pub verdict: Verdict,
    /// Processes in the order they were found executable. Complete iff safe.
    pub sequence: Vec<usize>,
    /// The derived Need matrix.
    pub need: Matrix,
    /// Work vector when the simulation stopped.
    pub final_work: Vec<u64>,
    /// Processes left unfinished, in ascending order. Empty iff safe.
    pub blocked: Vec<usize>,
    /// Number of scans performed, including a final scan that found nothing.
    pub passes: usize,
    /// Per-completion trace, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<TraceStep>>,
}

impl SafetyReport {
    /// Returns `true` if the snapshot is in a safe state.
    pub fn is_safe(&self) -> bool {
        self.verdict == Verdict::Safe
    }

    /// Renders the sequence as `P1 -> P3 -> P4 -> P0 -> P2`.
    pub fn sequence_string(&self) -> String {
        self.sequence
            .iter()
            .map(|p| format!("P{p}"))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Returns a one-line summary suitable for logging.
    pub fn summary(&self) -> String {
        match self.verdict {
            Verdict::Safe => format!(
                "'{}': SAFE after {} pass(es), sequence <{}>",
                self.algorithm,
                self.passes,
                self.sequence_string(),
            ),
            Verdict::Unsafe => format!(
                "'{}': UNSAFE after {} pass(es), {} of {} processes completed, blocked {:?}",
                self.algorithm,
                self.passes,
                self.sequence.len(),
                self.sequence.len() + self.blocked.len(),
                self.blocked,
            ),
        }
    }

    /// Replays the report against the snapshot it was computed from.
    ///
    /// Checks:
    /// - The Need matrix matches the snapshot.
    /// - The sequence holds distinct, in-range process indices, and
    ///   `blocked` is exactly the complement of it.
    /// - The verdict is safe iff every process is in the sequence.
    /// - Replaying the sequence from `available` never schedules a process
    ///   whose Need exceeds Work, and ends at `final_work`.
    /// - When unsafe, no blocked process is executable against `final_work`.
    pub fn validate(&self, state: &SystemState<Validated>) -> Result<(), CheckerError> {
        let fail = |detail: String| CheckerError::InvalidReport {
            algorithm: self.algorithm.clone(),
            detail,
        };

        let need = state.need();
        if self.need != need {
            return Err(fail("need matrix does not match the snapshot".into()));
        }

        let processes = state.num_processes();
        let mut scheduled = vec![false; processes];
        for &p in &self.sequence {
            if p >= processes {
                return Err(fail(format!("process P{p} out of range (P = {processes})")));
            }
            if scheduled[p] {
                return Err(fail(format!("process P{p} scheduled twice")));
            }
            scheduled[p] = true;
        }

        let unscheduled: Vec<usize> = (0..processes).filter(|&p| !scheduled[p]).collect();
        if unscheduled != self.blocked {
            return Err(fail(format!(
                "blocked set {:?} does not match unscheduled processes {:?}",
                self.blocked, unscheduled,
            )));
        }

        let complete = unscheduled.is_empty();
        if complete != self.is_safe() {
            return Err(fail(format!(
                "verdict '{}' but {} of {processes} processes scheduled",
                self.verdict,
                self.sequence.len(),
            )));
        }

        let mut work = state.available().to_vec();
        for &p in &self.sequence {
            if !fits(need.row(p), &work) {
                return Err(fail(format!(
                    "P{p} scheduled with need {:?} but work is only {:?}",
                    need.row(p),
                    work,
                )));
            }
            release(&mut work, state.allocation().row(p));
        }

        if work != self.final_work {
            return Err(fail(format!(
                "final work {:?} does not match replayed work {:?}",
                self.final_work, work,
            )));
        }

        if let Some(&p) = self.blocked.iter().find(|&&p| fits(need.row(p), &work)) {
            return Err(fail(format!(
                "P{p} is reported blocked but its need {:?} fits work {:?}",
                need.row(p),
                work,
            )));
        }

        Ok(())
    }
}

/// Returns `true` if `need[j] <= work[j]` for every resource `j`.
pub(crate) fn fits(need: &[u64], work: &[u64]) -> bool {
    need.iter().zip(work).all(|(n, w)| n <= w)
}

/// Adds a finished process's allocation back into `work`.
pub(crate) fn release(work: &mut [u64], allocation: &[u64]) {
    for (w, a) in work.iter_mut().zip(allocation) {
        *w += a;
    }
}
