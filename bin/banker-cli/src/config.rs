// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Checker configuration loaded from TOML files or built from CLI flags.
//!
//! # TOML Format
//! ```toml
//! processes = 5
//! resources = 3
//! input_format = "fixed"    # or "sized": the input starts with "P R"
//! algorithm = "multi-pass"  # or "restart"
//! trace = false
//! output = "text"           # or "json"
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use resource_state::{Dimensions, InputMode};
use safety_checker::SafetyAlgorithm;
use std::path::Path;

/// Errors raised while loading or interpreting the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The TOML is malformed or has the wrong types.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serialising the configuration failed.
    #[error("TOML serialise error: {0}")]
    Serialise(#[from] toml::ser::Error),

    /// A value is out of range or unknown.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// How the text input declares its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Dimensions come from `processes` / `resources`.
    Fixed,
    /// The input begins with `P R`.
    Sized,
}

/// How the verdict is printed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables and verdict.
    Text,
    /// A single JSON document on stdout.
    Json,
}

/// Configuration for a `banker` run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Process count for fixed-format input.
    pub processes: usize,
    /// Resource-type count for fixed-format input.
    pub resources: usize,
    /// Fixed or self-describing text input.
    pub input_format: InputFormat,
    /// Algorithm name: `"multi-pass"` or `"restart"`.
    pub algorithm: String,
    /// Whether to record and print the per-completion trace.
    pub trace: bool,
    /// Output format.
    pub output: OutputFormat,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            processes: 5,
            resources: 3,
            input_format: InputFormat::Fixed,
            algorithm: "multi-pass".to_string(),
            trace: false,
            output: OutputFormat::Text,
        }
    }
}

impl CheckerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolves the text input mode.
    pub fn input_mode(&self) -> Result<InputMode, ConfigError> {
        match self.input_format {
            InputFormat::Sized => Ok(InputMode::Sized),
            InputFormat::Fixed => {
                if self.processes == 0 || self.resources == 0 {
                    return Err(ConfigError::Invalid(format!(
                        "fixed input needs at least one process and one resource (got {}x{})",
                        self.processes, self.resources,
                    )));
                }
                Ok(InputMode::Fixed(Dimensions::new(self.processes, self.resources)))
            }
        }
    }

    /// Creates the safety algorithm named by this config.
    pub fn create_algorithm(&self) -> Result<Box<dyn SafetyAlgorithm>, ConfigError> {
        safety_checker::algorithm_by_name(&self.algorithm)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Applies explicit command-line overrides on top of this config.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(p) = overrides.processes {
            self.processes = p;
            self.input_format = InputFormat::Fixed;
        }
        if let Some(r) = overrides.resources {
            self.resources = r;
            self.input_format = InputFormat::Fixed;
        }
        if overrides.sized {
            self.input_format = InputFormat::Sized;
        }
        if let Some(algorithm) = &overrides.algorithm {
            self.algorithm = algorithm.clone();
        }
        if overrides.trace {
            self.trace = true;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub processes: Option<usize>,
    pub resources: Option<usize>,
    pub sized: bool,
    pub algorithm: Option<String>,
    pub trace: bool,
    pub output: Option<OutputFormat>,
}
