// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`SafetyAlgorithm`] trait and its implementations.

pub mod multi_pass;
pub mod restart;

use crate::report::{fits, release};
use crate::{CheckerError, SafetyReport, TraceStep, Verdict};
use resource_state::{state::Validated, Matrix, SystemState};

/// Knobs that change what a check records, never what it decides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Record a [`TraceStep`] for every simulated completion.
    pub record_trace: bool,
}

impl CheckOptions {
    /// Options with tracing enabled.
    pub fn with_trace() -> Self {
        Self { record_trace: true }
    }
}

/// A safety-check algorithm.
///
/// Implementations are pure: they read the snapshot through a shared
/// borrow and keep Work, the finish flags and the sequence as locals, so a
/// check is atomic with respect to its snapshot.
pub trait SafetyAlgorithm: Send + Sync {
    /// Human-readable name of this algorithm.
    fn name(&self) -> &str;

    /// Runs the safety check over a validated snapshot.
    fn check(&self, state: &SystemState<Validated>, options: &CheckOptions) -> SafetyReport;
}

/// Looks up an algorithm by its CLI/config name.
pub fn algorithm_by_name(name: &str) -> Result<Box<dyn SafetyAlgorithm>, CheckerError> {
    match name.to_lowercase().as_str() {
        "multi-pass" | "multipass" | "banker" => Ok(Box::new(multi_pass::MultiPassScan::new())),
        "restart" | "first-fit" => Ok(Box::new(restart::RestartScan::new())),
        other => Err(CheckerError::UnknownAlgorithm(other.to_string())),
    }
}

/// Mutable scratch state shared by the algorithm implementations.
pub(crate) struct Simulation<'a> {
    state: &'a SystemState<Validated>,
    need: Matrix,
    work: Vec<u64>,
    finished: Vec<bool>,
    sequence: Vec<usize>,
    trace: Option<Vec<TraceStep>>,
    passes: usize,
}

impl<'a> Simulation<'a> {
    /// Derives Need and initialises Work from the available vector.
    pub fn new(state: &'a SystemState<Validated>, options: &CheckOptions) -> Self {
        let processes = state.num_processes();
        Self {
            state,
            need: state.need(),
            work: state.available().to_vec(),
            finished: vec![false; processes],
            sequence: Vec::with_capacity(processes),
            trace: options.record_trace.then(Vec::new),
            passes: 0,
        }
    }

    pub fn num_processes(&self) -> usize {
        self.finished.len()
    }

    /// Starts a new scan over the processes.
    pub fn begin_pass(&mut self) {
        self.passes += 1;
    }

    pub fn all_finished(&self) -> bool {
        self.sequence.len() == self.finished.len()
    }

    /// Returns `true` if `p` is unfinished and its Need fits in Work.
    pub fn is_executable(&self, p: usize) -> bool {
        !self.finished[p] && fits(self.need.row(p), &self.work)
    }

    /// Completes process `p`: appends it to the sequence and releases its
    /// allocation into Work.
    pub fn complete(&mut self, p: usize) {
        let work_before = self.trace.is_some().then(|| self.work.clone());

        release(&mut self.work, self.state.allocation().row(p));
        self.finished[p] = true;
        self.sequence.push(p);

        tracing::debug!(
            "pass {}: P{p} can execute, work becomes {:?}",
            self.passes,
            self.work,
        );

        if let (Some(trace), Some(work_before)) = (self.trace.as_mut(), work_before) {
            trace.push(TraceStep {
                pass: self.passes,
                process: p,
                need: self.need.row(p).to_vec(),
                work_before,
                work_after: self.work.clone(),
            });
        }
    }

    /// Consumes the simulation and produces the report.
    pub fn into_report(self, algorithm: &str) -> SafetyReport {
        let state = self.state;
        let verdict = if self.all_finished() {
            Verdict::Safe
        } else {
            Verdict::Unsafe
        };
        let blocked: Vec<usize> = (0..self.finished.len())
            .filter(|&p| !self.finished[p])
            .collect();

        let report = SafetyReport {
            algorithm: algorithm.to_string(),
            verdict,
            sequence: self.sequence,
            need: self.need,
            final_work: self.work,
            blocked,
            passes: self.passes,
            trace: self.trace,
        };

        match report.verdict {
            Verdict::Safe => tracing::info!("{}", report.summary()),
            Verdict::Unsafe => tracing::warn!("{}", report.summary()),
        }

        debug_assert!(
            report.validate(state).is_ok(),
            "inconsistent report: {:?}",
            report.validate(state),
        );

        report
    }
}
