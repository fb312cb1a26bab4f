// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Resource-allocation snapshot with compile-time validation state.
//!
//! # Type-State Pattern
//!
//! ```text
//! SystemState<Unchecked>  matrices assembled, preconditions unknown.
//!       │  .validate()
//!       ▼
//! SystemState<Validated>  shapes consistent, allocation ≤ max, totals fit u64.
//! ```
//!
//! The safety checker only accepts `SystemState<Validated>`, so it never sees
//! a snapshot whose Need matrix would be negative. The fields are read-only
//! after construction, so a validated snapshot cannot be edited back into an
//! invalid one:
//!
//! ```compile_fail
//! use resource_state::{Matrix, SystemState};
//!
//! let mut state = SystemState::from_rows(vec![vec![1]], vec![vec![2]], vec![0])
//!     .unwrap()
//!     .validate()
//!     .unwrap();
//! state.allocation = Matrix::from_rows(vec![vec![5]]).unwrap();
//! ```
//!
//! Need is only defined once validation has passed:
//!
//! ```compile_fail
//! use resource_state::SystemState;
//!
//! let state = SystemState::from_rows(vec![vec![5]], vec![vec![2]], vec![0]).unwrap();
//! let _ = state.need();
//! ```

use crate::{Dimensions, InputError, Matrix};
use std::fmt;
use std::marker::PhantomData;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: snapshot has been assembled but not validated.
#[derive(Debug, Clone)]
pub struct Unchecked;

/// Marker: snapshot satisfies every precondition of the safety check.
#[derive(Debug, Clone)]
pub struct Validated;

/// Sealed trait for snapshot states.
pub trait SnapshotState: fmt::Debug + Clone {}
impl SnapshotState for Unchecked {}
impl SnapshotState for Validated {}

// ── SystemState ────────────────────────────────────────────────────

/// A point-in-time view of allocated, declared-maximum and free resources.
#[derive(Debug, Clone)]
pub struct SystemState<S: SnapshotState = Unchecked> {
    allocation: Matrix,
    max_need: Matrix,
    available: Vec<u64>,
    resource_names: Option<Vec<String>>,
    _state: PhantomData<S>,
}

impl SystemState<Unchecked> {
    /// Assembles a snapshot in the `Unchecked` state.
    pub fn new(allocation: Matrix, max_need: Matrix, available: Vec<u64>) -> Self {
        Self {
            allocation,
            max_need,
            available,
            resource_names: None,
            _state: PhantomData,
        }
    }

    /// Assembles a snapshot from nested rows.
    pub fn from_rows(
        allocation: Vec<Vec<u64>>,
        max_need: Vec<Vec<u64>>,
        available: Vec<u64>,
    ) -> Result<Self, InputError> {
        Ok(Self::new(
            Matrix::from_rows(allocation)?,
            Matrix::from_rows(max_need)?,
            available,
        ))
    }

    /// Attaches display names for the resource types.
    pub fn with_resource_names(mut self, names: Vec<String>) -> Self {
        self.resource_names = Some(names);
        self
    }

    /// Validates the snapshot and transitions to the `Validated` state.
    ///
    /// # Checks
    /// - At least one process and one resource type.
    /// - `max_need` has the same shape as `allocation`.
    /// - `available` and `resource_names` have one entry per resource type.
    /// - `allocation[i][j] <= max_need[i][j]` for every entry.
    /// - `available[j] + Σ allocation[·][j]` fits in a `u64`.
    pub fn validate(self) -> Result<SystemState<Validated>, InputError> {
        let dims = self.allocation.dims();
        if dims.is_empty() {
            return Err(InputError::EmptyDimensions {
                processes: dims.processes,
                resources: dims.resources,
            });
        }

        if self.max_need.dims() != dims {
            return Err(InputError::ShapeMismatch {
                what: "max-need matrix".into(),
                expected: dims.to_string(),
                actual: self.max_need.dims().to_string(),
            });
        }

        if self.available.len() != dims.resources {
            return Err(InputError::ShapeMismatch {
                what: "available vector".into(),
                expected: format!("{} entries", dims.resources),
                actual: format!("{} entries", self.available.len()),
            });
        }

        if let Some(names) = &self.resource_names {
            if names.len() != dims.resources {
                return Err(InputError::ShapeMismatch {
                    what: "resource names".into(),
                    expected: format!("{} entries", dims.resources),
                    actual: format!("{} entries", names.len()),
                });
            }
        }

        for (process, (alloc, max)) in self
            .allocation
            .iter_rows()
            .zip(self.max_need.iter_rows())
            .enumerate()
        {
            for (resource, (&allocated, &max)) in alloc.iter().zip(max).enumerate() {
                if allocated > max {
                    return Err(InputError::AllocationExceedsMax {
                        process,
                        resource,
                        allocated,
                        max,
                    });
                }
            }
        }

        // Work never exceeds available + everything allocated, so this bound
        // keeps the simulation free of overflow.
        for (resource, &avail) in self.available.iter().enumerate() {
            self.allocation
                .iter_rows()
                .try_fold(avail, |total, row| total.checked_add(row[resource]))
                .ok_or(InputError::Overflow { resource })?;
        }

        tracing::debug!(
            "snapshot validated: {} processes, {} resources",
            dims.processes,
            dims.resources,
        );

        Ok(SystemState {
            allocation: self.allocation,
            max_need: self.max_need,
            available: self.available,
            resource_names: self.resource_names,
            _state: PhantomData,
        })
    }
}

// ── Shared methods ─────────────────────────────────────────────────

impl<S: SnapshotState> SystemState<S> {
    /// `allocation[i][j]`: units of resource `j` held by process `i`.
    pub fn allocation(&self) -> &Matrix {
        &self.allocation
    }

    /// `max_need[i][j]`: maximum units of resource `j` process `i` may request.
    pub fn max_need(&self) -> &Matrix {
        &self.max_need
    }

    /// `available[j]`: units of resource `j` not allocated to any process.
    pub fn available(&self) -> &[u64] {
        &self.available
    }

    /// Display names for resource types, if any were given.
    pub fn resource_names(&self) -> Option<&[String]> {
        self.resource_names.as_deref()
    }

    /// Returns the snapshot dimensions (taken from the allocation matrix).
    pub fn dims(&self) -> Dimensions {
        self.allocation.dims()
    }

    /// Number of processes.
    pub fn num_processes(&self) -> usize {
        self.allocation.rows()
    }

    /// Number of resource types.
    pub fn num_resources(&self) -> usize {
        self.allocation.cols()
    }

    /// Display name of resource `j`: the configured name, or a default label.
    pub fn resource_name(&self, j: usize) -> String {
        self.resource_names
            .as_ref()
            .and_then(|names| names.get(j).cloned())
            .unwrap_or_else(|| resource_label(j))
    }
}

// ── Validated state ────────────────────────────────────────────────

impl SystemState<Validated> {
    /// Derives the Need matrix: `max_need[i][j] - allocation[i][j]`.
    ///
    /// Recomputed on each call; it depends only on the two input matrices.
    pub fn need(&self) -> Matrix {
        let dims = self.dims();
        Matrix::from_fn(dims.processes, dims.resources, |i, j| {
            self.max_need.get(i, j) - self.allocation.get(i, j)
        })
    }

    /// Total instances of each resource type: available plus all allocations.
    pub fn total_resources(&self) -> Vec<u64> {
        let mut totals = self.available.clone();
        for row in self.allocation.iter_rows() {
            for (t, &a) in totals.iter_mut().zip(row) {
                // Bounded by validate().
                *t += a;
            }
        }
        totals
    }

    /// Returns a one-line summary for logging.
    pub fn summary(&self) -> String {
        let totals = self.total_resources();
        format!(
            "Snapshot: {} processes, {} resource types, available {:?}, total {:?}",
            self.num_processes(),
            self.num_resources(),
            self.available,
            totals,
        )
    }
}

/// Default label for resource type `j`: `A`, `B`, … `Z`, then `R26`, `R27`, ….
pub fn resource_label(j: usize) -> String {
    if j < 26 {
        char::from(b'A' + j as u8).to_string()
    } else {
        format!("R{j}")
    }
}
