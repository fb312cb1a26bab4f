// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `banker demo` command: the classic five-process, three-resource example.

use super::display;
use crate::config::CheckerConfig;
use resource_state::{state::Validated, SystemState};
use safety_checker::CheckOptions;

/// Builds the textbook snapshot (Available = 3 3 2).
pub fn textbook_state() -> anyhow::Result<SystemState<Validated>> {
    let state = SystemState::from_rows(
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
        vec![3, 3, 2],
    )?
    .validate()?;
    Ok(state)
}

pub fn execute(config: &CheckerConfig) -> anyhow::Result<()> {
    let algorithm = config.create_algorithm()?;
    let state = textbook_state()?;

    println!("{}", display::banner("banker · Demo"));
    println!();
    print!("{}", super::inspect::render(&state));
    println!();

    let report = algorithm.check(&state, &CheckOptions::with_trace());
    print!("{}", super::check::render_text("built-in textbook snapshot", &state, &report));
    Ok(())
}
