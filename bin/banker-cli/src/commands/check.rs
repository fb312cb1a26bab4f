// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `banker check` command: load a snapshot, run the safety check, print the verdict.

use super::display;
use crate::config::{CheckerConfig, OutputFormat};
use resource_state::{state::Validated, Dimensions, SystemState};
use safety_checker::{CheckOptions, SafetyReport};
use std::path::Path;

/// JSON document printed by `--format json`.
#[derive(Debug, serde::Serialize)]
pub struct CheckOutput<'a> {
    pub input: String,
    pub dimensions: Dimensions,
    pub total_resources: Vec<u64>,
    pub report: &'a SafetyReport,
}

pub fn execute(input: &Path, config: &CheckerConfig) -> anyhow::Result<()> {
    let algorithm = config.create_algorithm()?;
    let state = super::load_state(input, config)?;

    let options = CheckOptions {
        record_trace: config.trace,
    };
    tracing::debug!(algorithm = algorithm.name(), trace = config.trace, "running safety check");
    let report = algorithm.check(&state, &options);

    match config.output {
        OutputFormat::Json => {
            let output = CheckOutput {
                input: input.display().to_string(),
                dimensions: state.dims(),
                total_resources: state.total_resources(),
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{}", display::banner("banker · Safety Check"));
            println!();
            print!("{}", render_text(&input.display().to_string(), &state, &report));
        }
    }

    Ok(())
}

/// Renders the human-readable body of a check below the banner.
pub fn render_text(input: &str, state: &SystemState<Validated>, report: &SafetyReport) -> String {
    let mut out = String::new();

    // ── Snapshot ───────────────────────────────────────────────
    out.push_str(&format!("  Input:         {input}\n"));
    out.push_str(&format!(
        "  Dimensions:    {} processes x {} resources\n",
        state.num_processes(),
        state.num_resources(),
    ));
    out.push_str(&format!(
        "  Available:     {}\n",
        display::resource_vector(state.available(), state),
    ));
    out.push_str(&format!("  Algorithm:     {}\n\n", report.algorithm));

    // ── Trace ──────────────────────────────────────────────────
    if let Some(trace) = &report.trace {
        out.push_str("  Simulation:\n");
        for step in trace {
            out.push_str(&display::trace_line(step));
            out.push('\n');
        }
        out.push_str(&format!("  ({} pass(es))\n\n", report.passes));
    }

    // ── Verdict ────────────────────────────────────────────────
    out.push_str(&display::verdict_block(report));
    out.push('\n');
    out
}
