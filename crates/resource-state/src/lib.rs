// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # resource-state
//!
//! The data model consumed by the Banker's Algorithm safety check.
//!
//! - [`Matrix`]: a dense `P × R` matrix of resource counts.
//! - [`SystemState`]: allocation, maximum need and available resources,
//!   with a **type-state pattern** (`Unchecked` → `Validated`).
//! - [`StateLoader`]: reads snapshots from whitespace-separated text or JSON.
//! - [`InputError`]: everything that can be wrong with an input snapshot.
//!
//! # Example
//! ```
//! use resource_state::SystemState;
//!
//! let state = SystemState::from_rows(
//!     vec![vec![1, 0], vec![0, 1]],
//!     vec![vec![2, 1], vec![1, 1]],
//!     vec![1, 0],
//! )
//! .unwrap()
//! .validate()
//! .unwrap();
//!
//! assert_eq!(state.need().to_rows(), vec![vec![1, 1], vec![1, 0]]);
//! assert_eq!(state.total_resources(), vec![2, 1]);
//! ```

mod error;
mod loader;
mod matrix;
pub mod state;

pub use error::InputError;
pub use loader::{InputMode, StateLoader, StateManifest};
pub use matrix::{Dimensions, Matrix};
pub use state::{resource_label, SystemState};
