// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `banker inspect` command: display a snapshot without judging it.
//!
//! Prints the allocation, maximum and derived need tables, the available
//! vector, and per-resource totals (held plus available).

use super::display;
use crate::config::CheckerConfig;
use resource_state::{state::Validated, SystemState};
use std::path::Path;

pub fn execute(input: &Path, config: &CheckerConfig) -> anyhow::Result<()> {
    let state = super::load_state(input, config)?;

    println!("{}", display::banner("banker · Snapshot Inspector"));
    println!();
    print!("{}", render(&state));
    Ok(())
}

/// Renders the snapshot tables.
pub fn render(state: &SystemState<Validated>) -> String {
    let need = state.need();
    let mut out = String::new();

    out.push_str(&format!(
        "  Processes: {}   Resource types: {}\n\n",
        state.num_processes(),
        state.num_resources(),
    ));

    out.push_str(&display::matrix_table("Allocation", state.allocation(), state));
    out.push('\n');
    out.push_str(&display::matrix_table("Max", state.max_need(), state));
    out.push('\n');
    out.push_str(&display::matrix_table("Need (Max - Allocation)", &need, state));
    out.push('\n');

    // Validation already rejected snapshots whose totals overflow.
    let held = state.allocation().column_sums().unwrap_or_default();
    out.push_str(&format!(
        "  Available:       {}\n",
        display::resource_vector(state.available(), state),
    ));
    out.push_str(&format!("  Held:            {}\n", display::resource_vector(&held, state)));
    out.push_str(&format!(
        "  Total instances: {}\n",
        display::resource_vector(&state.total_resources(), state),
    ));
    out
}
