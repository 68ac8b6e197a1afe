// Copyright 2026 the Lockstep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;

use crate::{DiffOp, DiffRecord, diff};

/// Renders the differences between two line sequences as a classic unified
/// diff report.
///
/// `label_a` and `label_b` become the `---`/`+++` file labels and `context`
/// is the number of unchanged lines shown around each change. Identical
/// inputs produce an empty report.
///
/// ```
/// use line_diff::unified;
///
/// let a = ["a", "b", "c"];
/// let b = ["a", "x", "c"];
/// let report = unified(&a, &b, "a.txt", "b.txt", 3);
/// assert!(report.starts_with("--- a.txt\n+++ b.txt\n@@ -1,3 +1,3 @@\n"));
/// assert!(report.contains("-b\n+x\n"));
/// ```
pub fn unified<T: AsRef<str> + Eq + Hash>(
    a: &[T],
    b: &[T],
    label_a: &str,
    label_b: &str,
    context: usize,
) -> String {
    let diffs = diff(a, b);
    if diffs.is_unchanged() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("--- {label_a}\n"));
    out.push_str(&format!("+++ {label_b}\n"));
    for group in group_records(diffs.records(), context) {
        let first = &group[0];
        let last = group.last().unwrap_or(first);
        out.push_str(&format!(
            "@@ -{} +{} @@\n",
            format_range(first.a.start, last.a.end),
            format_range(first.b.start, last.b.end),
        ));
        for record in &group {
            if record.op != DiffOp::Insert {
                let prefix = if record.op == DiffOp::Equal { ' ' } else { '-' };
                for line in &a[record.a.clone()] {
                    out.push_str(&format!("{prefix}{}\n", line.as_ref()));
                }
            }
            if record.op == DiffOp::Replace || record.op == DiffOp::Insert {
                for line in &b[record.b.clone()] {
                    out.push_str(&format!("+{}\n", line.as_ref()));
                }
            }
        }
    }
    out
}

/// Splits the record list into hunk groups, trimming equal runs to at most
/// `context` lines on each flank and starting a new group whenever an equal
/// run is too long to bridge.
fn group_records(records: &[DiffRecord], context: usize) -> Vec<Vec<DiffRecord>> {
    let mut codes: Vec<DiffRecord> = records.to_vec();
    if let Some(first) = codes.first_mut() {
        if first.op == DiffOp::Equal {
            first.a.start = first.a.start.max(first.a.end.saturating_sub(context));
            first.b.start = first.b.start.max(first.b.end.saturating_sub(context));
        }
    }
    if let Some(last) = codes.last_mut() {
        if last.op == DiffOp::Equal {
            last.a.end = last.a.end.min(last.a.start + context);
            last.b.end = last.b.end.min(last.b.start + context);
        }
    }

    let mut groups = Vec::new();
    let mut group: Vec<DiffRecord> = Vec::new();
    for code in codes {
        if code.op == DiffOp::Equal && code.a.len() > context * 2 {
            group.push(DiffRecord {
                op: DiffOp::Equal,
                a: code.a.start..(code.a.start + context).min(code.a.end),
                b: code.b.start..(code.b.start + context).min(code.b.end),
            });
            groups.push(core::mem::take(&mut group));
            group.push(DiffRecord {
                op: DiffOp::Equal,
                a: code.a.start.max(code.a.end - context)..code.a.end,
                b: code.b.start.max(code.b.end - context)..code.b.end,
            });
        } else {
            group.push(code);
        }
    }
    if !(group.is_empty() || (group.len() == 1 && group[0].op == DiffOp::Equal)) {
        groups.push(group);
    }
    groups
}

/// Formats one side of a hunk header, 1-based with the zero-length
/// convention of unified diffs.
fn format_range(start: usize, end: usize) -> String {
    let length = end - start;
    if length == 1 {
        return format!("{}", start + 1);
    }
    let beginning = if length == 0 { start } else { start + 1 };
    format!("{beginning},{length}")
}
