// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Snapshot loading from whitespace-separated text or JSON.
//!
//! # Text Format
//! Non-negative integers separated by any whitespace, in order:
//!
//! ```text
//! # allocation (P rows of R values)
//! 0 1 0
//! 2 0 0
//! # max need (P rows of R values)
//! 7 5 3
//! 3 2 2
//! # available (R values)
//! 3 3 2
//! ```
//!
//! In [`InputMode::Fixed`] the dimensions come from configuration. In
//! [`InputMode::Sized`] the first two integers are `P` and `R`. Everything
//! from a `#` to the end of its line is ignored.
//!
//! # JSON Format
//! ```json
//! {
//!   "allocation": [[0, 1, 0], [2, 0, 0]],
//!   "max_need":   [[7, 5, 3], [3, 2, 2]],
//!   "available":  [3, 3, 2],
//!   "resource_names": ["A", "B", "C"]
//! }
//! ```
//! `resource_names` is optional. Dimensions are taken from the data.

use crate::state::{Unchecked, Validated};
use crate::{Dimensions, InputError, Matrix, SystemState};
use std::path::Path;

/// How the dimensions of a text snapshot are determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Dimensions agreed out of band; the input holds only data.
    Fixed(Dimensions),
    /// The input starts with `P R`.
    Sized,
}

impl Default for InputMode {
    /// The classic textbook shape: five processes, three resource types.
    fn default() -> Self {
        InputMode::Fixed(Dimensions::new(5, 3))
    }
}

/// JSON snapshot document.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StateManifest {
    /// Allocation matrix as a list of rows.
    pub allocation: Matrix,
    /// Maximum-need matrix as a list of rows.
    pub max_need: Matrix,
    /// Available vector.
    pub available: Vec<u64>,
    /// Optional resource display names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_names: Option<Vec<String>>,
}

impl StateManifest {
    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Converts the manifest into an unchecked snapshot.
    pub fn into_state(self) -> SystemState<Unchecked> {
        let state = SystemState::new(self.allocation, self.max_need, self.available);
        match self.resource_names {
            Some(names) => state.with_resource_names(names),
            None => state,
        }
    }
}

impl<S: crate::state::SnapshotState> From<&SystemState<S>> for StateManifest {
    fn from(state: &SystemState<S>) -> Self {
        Self {
            allocation: state.allocation().clone(),
            max_need: state.max_need().clone(),
            available: state.available().to_vec(),
            resource_names: state.resource_names().map(<[String]>::to_vec),
        }
    }
}

/// Loads snapshots from files or strings into a validated [`SystemState`].
///
/// # Example
/// ```
/// use resource_state::{Dimensions, InputMode, StateLoader};
///
/// let text = "1 0  0 1   2 1  1 1   1 0";
/// let state = StateLoader::from_text(text, InputMode::Fixed(Dimensions::new(2, 2))).unwrap();
/// assert_eq!(state.need().row(0), &[1, 1]);
/// ```
pub struct StateLoader;

impl StateLoader {
    /// Loads and validates a snapshot from a file.
    ///
    /// Files with a `.json` extension are parsed as [`StateManifest`]; the
    /// `mode` is ignored for them. Anything else is parsed as text.
    pub fn load(path: &Path, mode: InputMode) -> Result<SystemState<Validated>, InputError> {
        let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        tracing::debug!(
            "reading {} snapshot from '{}'",
            if is_json { "JSON" } else { "text" },
            path.display(),
        );

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_text(&content, mode)
        }
    }

    /// Parses and validates a JSON snapshot.
    pub fn from_json(json: &str) -> Result<SystemState<Validated>, InputError> {
        StateManifest::from_json(json)?.into_state().validate()
    }

    /// Parses and validates a whitespace-separated text snapshot.
    pub fn from_text(text: &str, mode: InputMode) -> Result<SystemState<Validated>, InputError> {
        Self::parse_text(text, mode)?.validate()
    }

    /// Parses a text snapshot without validating its contents.
    pub fn parse_text(text: &str, mode: InputMode) -> Result<SystemState<Unchecked>, InputError> {
        let mut tokens = Tokens::new(text);

        let dims = match mode {
            InputMode::Fixed(dims) => dims,
            InputMode::Sized => {
                let header = tokens.take("header", 2)?;
                Dimensions::new(to_usize(1, header[0])?, to_usize(2, header[1])?)
            }
        };
        if dims.processes.checked_mul(dims.resources).is_none() {
            return Err(InputError::ShapeMismatch {
                what: "dimensions".into(),
                expected: "a P x R cell count that fits in usize".into(),
                actual: dims.to_string(),
            });
        }
        if dims.is_empty() {
            return Err(InputError::EmptyDimensions {
                processes: dims.processes,
                resources: dims.resources,
            });
        }

        let allocation = tokens.take("allocation matrix", dims.cells())?;
        tracing::debug!("read allocation matrix ({dims})");
        let max_need = tokens.take("max-need matrix", dims.cells())?;
        tracing::debug!("read max-need matrix ({dims})");
        let available = tokens.take("available vector", dims.resources)?;
        tracing::debug!("read available vector ({} entries)", dims.resources);

        let extra = tokens.remaining()?;
        if extra > 0 {
            return Err(InputError::TrailingData { count: extra });
        }

        Ok(SystemState::new(
            Matrix::from_flat(dims.processes, dims.resources, allocation)?,
            Matrix::from_flat(dims.processes, dims.resources, max_need)?,
            available,
        ))
    }
}

/// Integer tokenizer over the text format, tracking token positions.
struct Tokens<'a> {
    words: Box<dyn Iterator<Item = &'a str> + 'a>,
    /// 1-based position of the last token read; comments are not counted.
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let words = text
            .lines()
            .map(|line| line.split_once('#').map_or(line, |(data, _)| data))
            .flat_map(str::split_whitespace);
        Self {
            words: Box::new(words),
            position: 0,
        }
    }

    fn next_value(&mut self) -> Option<Result<u64, InputError>> {
        let word = self.words.next()?;
        self.position += 1;
        let position = self.position;
        Some(word.parse::<u64>().map_err(|_| InputError::InvalidToken {
            position,
            token: word.to_string(),
        }))
    }

    /// Takes exactly `count` values for the named section.
    fn take(&mut self, section: &'static str, count: usize) -> Result<Vec<u64>, InputError> {
        let mut values = Vec::with_capacity(count.min(4096));
        while values.len() < count {
            match self.next_value() {
                Some(v) => values.push(v?),
                None => {
                    return Err(InputError::Truncated {
                        section,
                        expected: count,
                        found: values.len(),
                    })
                }
            }
        }
        Ok(values)
    }

    /// Counts the tokens left, failing on the first non-numeric one.
    fn remaining(&mut self) -> Result<usize, InputError> {
        let mut count = 0;
        while let Some(v) = self.next_value() {
            v?;
            count += 1;
        }
        Ok(count)
    }
}

fn to_usize(position: usize, value: u64) -> Result<usize, InputError> {
    usize::try_from(value).map_err(|_| InputError::InvalidToken {
        position,
        token: value.to_string(),
    })
}
