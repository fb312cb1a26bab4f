// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Text rendering of snapshots and safety reports.

use resource_state::{state::Validated, Matrix, SystemState};
use safety_checker::{SafetyReport, TraceStep, Verdict};

const BANNER_WIDTH: usize = 54;

/// A boxed title line, as printed at the top of every command.
pub fn banner(title: &str) -> String {
    let bar = "═".repeat(BANNER_WIDTH);
    format!("╔{bar}╗\n║{title:^BANNER_WIDTH$}║\n╚{bar}╝")
}

/// Renders a process × resource matrix with resource headers.
///
/// ```text
///        A   B   C
///      ------------
///   P0 | 0   1   0
/// ```
pub fn matrix_table(title: &str, matrix: &Matrix, state: &SystemState<Validated>) -> String {
    let width = column_width(matrix, state);
    let label_width = format!("P{}", matrix.rows().saturating_sub(1)).len();

    let mut out = format!("  {title}:\n");
    out.push_str(&format!("  {:label_width$}   ", ""));
    for j in 0..matrix.cols() {
        out.push_str(&format!("{:>width$} ", state.resource_name(j)));
    }
    out.push('\n');
    out.push_str(&format!(
        "  {:label_width$}  {}\n",
        "",
        "-".repeat((width + 1) * matrix.cols() + 1)
    ));

    for (i, row) in matrix.iter_rows().enumerate() {
        out.push_str(&format!("  {:<label_width$} | ", format!("P{i}")));
        for v in row {
            out.push_str(&format!("{v:>width$} "));
        }
        out.push('\n');
    }
    out
}

/// Renders a per-resource vector as `A=3 B=3 C=2`.
pub fn resource_vector(values: &[u64], state: &SystemState<Validated>) -> String {
    values
        .iter()
        .enumerate()
        .map(|(j, v)| format!("{}={v}", state.resource_name(j)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders a single trace step.
pub fn trace_line(step: &TraceStep) -> String {
    format!(
        "  pass {}: P{} can execute (need {:?}), work {:?} -> {:?}",
        step.pass, step.process, step.need, step.work_before, step.work_after,
    )
}

/// Renders the verdict block.
pub fn verdict_block(report: &SafetyReport) -> String {
    match report.verdict {
        Verdict::Safe => format!(
            "  Result:        SYSTEM IS SAFE\n  Safe sequence: < {} >\n\n  \
             Processes can execute in this order without deadlock.",
            report.sequence_string(),
        ),
        Verdict::Unsafe => {
            let blocked = report
                .blocked
                .iter()
                .map(|p| format!("P{p}"))
                .collect::<Vec<_>>()
                .join(", ");
            let mut out = String::from("  Result:        SYSTEM IS NOT SAFE\n");
            if !report.sequence.is_empty() {
                out.push_str(&format!("  Completed:     {}\n", report.sequence_string()));
            }
            out.push_str(&format!("  Blocked:       {blocked}\n"));
            out.push_str(&format!("  Work at stop:  {:?}\n\n", report.final_work));
            out.push_str("  The system may enter a deadlock state.");
            out
        }
    }
}

fn column_width(matrix: &Matrix, state: &SystemState<Validated>) -> usize {
    let widest_value = matrix
        .iter_rows()
        .flatten()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);
    let widest_name = (0..matrix.cols())
        .map(|j| state.resource_name(j).len())
        .max()
        .unwrap_or(1);
    widest_value.max(widest_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use safety_checker::{CheckOptions, MultiPassScan, SafetyAlgorithm};

    fn state(available: Vec<u64>) -> SystemState<Validated> {
        SystemState::from_rows(
            vec![vec![0, 1, 0], vec![2, 0, 0]],
            vec![vec![7, 5, 3], vec![3, 2, 2]],
            available,
        )
        .unwrap()
        .validate()
        .unwrap()
    }

    #[test]
    fn test_banner_width() {
        let b = banner("banker");
        let lines: Vec<&str> = b.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            assert_eq!(line.chars().count(), BANNER_WIDTH + 2);
        }
    }

    #[test]
    fn test_matrix_table() {
        let s = state(vec![3, 3, 2]);
        let table = matrix_table("Allocation", s.allocation(), &s);
        assert!(table.starts_with("  Allocation:\n"));
        assert!(table.contains("A B C"));
        assert!(table.contains("P0 | 0 1 0"));
        assert!(table.contains("P1 | 2 0 0"));
    }

    #[test]
    fn test_resource_vector() {
        let s = state(vec![3, 3, 2]);
        assert_eq!(resource_vector(s.available(), &s), "A=3 B=3 C=2");
    }

    #[test]
    fn test_verdict_block_safe() {
        let s = state(vec![7, 4, 3]);
        let report = MultiPassScan::new().check(&s, &CheckOptions::default());
        let block = verdict_block(&report);
        assert!(block.contains("SYSTEM IS SAFE"));
        assert!(block.contains("< P0 -> P1 >"));
    }

    #[test]
    fn test_verdict_block_unsafe() {
        let s = state(vec![0, 0, 0]);
        let report = MultiPassScan::new().check(&s, &CheckOptions::default());
        let block = verdict_block(&report);
        assert!(block.contains("NOT SAFE"));
        assert!(block.contains("Blocked:       P0, P1"));
        assert!(!block.contains("Completed"));
    }

    #[test]
    fn test_trace_line() {
        let s = state(vec![1, 2, 2]);
        let report = MultiPassScan::new().check(&s, &CheckOptions::with_trace());
        let trace = report.trace.unwrap();
        assert_eq!(
            trace_line(&trace[0]),
            "  pass 1: P1 can execute (need [1, 2, 2]), work [1, 2, 2] -> [3, 2, 2]"
        );
    }
}
