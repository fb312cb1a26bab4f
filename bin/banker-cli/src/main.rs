// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # banker
//!
//! Command-line interface for the Banker's Algorithm safety check.
//!
//! ## Usage
//! ```bash
//! # Check a 5x3 snapshot (allocation, max, available as whitespace-separated integers)
//! banker check input.txt
//!
//! # Self-describing input ("P R" header), restart scan, trace of every completion
//! banker check --sized --algorithm restart --trace input.txt
//!
//! # Machine-readable verdict
//! banker check --format json snapshot.json
//!
//! # Print the allocation / max / need tables
//! banker inspect input.txt
//!
//! # Run the classic 5-process, 3-resource example
//! banker demo
//! ```
//!
//! Both safe and unsafe verdicts exit with status 0; unreadable or
//! malformed input exits non-zero.

mod commands;
mod config;

use clap::{Args, Parser, Subcommand};
use config::{CheckerConfig, OutputFormat, Overrides};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "banker",
    about = "Banker's Algorithm safety check for resource-allocation snapshots",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (explicit flags take precedence).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// How the text input is shaped.
#[derive(Args, Debug, Default)]
struct InputArgs {
    /// Number of processes in fixed-format input.
    #[arg(short, long)]
    processes: Option<usize>,

    /// Number of resource types in fixed-format input.
    #[arg(short, long)]
    resources: Option<usize>,

    /// The input starts with a "P R" dimension header.
    #[arg(long, conflicts_with_all = ["processes", "resources"])]
    sized: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a snapshot is safe and print a safe sequence.
    Check {
        /// Snapshot file: whitespace-separated text, or JSON when it ends in `.json`.
        input: PathBuf,

        #[command(flatten)]
        shape: InputArgs,

        /// Safety algorithm: multi-pass, restart.
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Print every completion step of the simulation.
        #[arg(short, long)]
        trace: bool,

        /// Output format.
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the allocation, max and need tables of a snapshot.
    Inspect {
        /// Snapshot file.
        input: PathBuf,

        #[command(flatten)]
        shape: InputArgs,
    },

    /// Run the check on the classic 5-process, 3-resource example.
    Demo {
        /// Safety algorithm: multi-pass, restart.
        #[arg(short, long)]
        algorithm: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => CheckerConfig::from_file(path)?,
        None => CheckerConfig::default(),
    };

    match cli.command {
        Commands::Check {
            input,
            shape,
            algorithm,
            trace,
            format,
        } => {
            config.apply(&Overrides {
                processes: shape.processes,
                resources: shape.resources,
                sized: shape.sized,
                algorithm,
                trace,
                output: format,
            });
            commands::check::execute(&input, &config)
        }
        Commands::Inspect { input, shape } => {
            config.apply(&Overrides {
                processes: shape.processes,
                resources: shape.resources,
                sized: shape.sized,
                ..Default::default()
            });
            commands::inspect::execute(&input, &config)
        }
        Commands::Demo { algorithm } => {
            config.apply(&Overrides {
                algorithm,
                ..Default::default()
            });
            commands::demo::execute(&config)
        }
    }
}
