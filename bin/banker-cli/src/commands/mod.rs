// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared helpers.

pub mod check;
pub mod demo;
pub mod display;
pub mod inspect;

use crate::config::CheckerConfig;
use anyhow::Context;
use resource_state::{state::Validated, StateLoader, SystemState};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows the `-v` count
/// (warn, info, debug, trace). Logs go to stderr so stdout stays clean for
/// the verdict.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads and validates a snapshot according to the configured input mode.
pub fn load_state(input: &Path, config: &CheckerConfig) -> anyhow::Result<SystemState<Validated>> {
    let mode = config.input_mode()?;
    tracing::info!(path = %input.display(), ?mode, "loading snapshot");

    let state = StateLoader::load(input, mode)
        .with_context(|| format!("failed to load snapshot from '{}'", input.display()))?;

    tracing::info!("{}", state.summary());
    Ok(state)
}
