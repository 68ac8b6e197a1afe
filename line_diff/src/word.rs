// Copyright 2026 the Lockstep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use crate::{DiffOp, DiffRecord, Diffs, diff};

/// Tuning for [`word_diff`]'s refinement-skip heuristic.
///
/// On a near-total rewrite, word-level records highlight most of both lines
/// and add noise instead of signal, so refinement is skipped when a line
/// pair is both long and mostly different. The exact constants are a
/// noise/performance tradeoff, not a correctness contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordDiffConfig {
    /// Token count above which a mostly-different line pair is skipped:
    /// refinement is skipped when the longer side has more than this many
    /// tokens and the number of changed tokens exceeds half of it.
    pub max_tokens: usize,
}

impl Default for WordDiffConfig {
    fn default() -> Self {
        Self { max_tokens: 25 }
    }
}

/// Splits a line into fields: byte ranges of non-whitespace runs, each with
/// its trailing whitespace attached.
///
/// Leading whitespace forms a field of its own. The ranges partition the
/// whole line.
///
/// ```
/// use line_diff::tokenize;
///
/// let fields = tokenize("one two  three");
/// assert_eq!(fields.len(), 3);
/// assert_eq!(&"one two  three"[fields[1].clone()], "two  ");
/// ```
pub fn tokenize(line: &str) -> Vec<Range<usize>> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut prev_space = false;
    for (at, c) in line.char_indices() {
        if prev_space && !c.is_whitespace() && at > start {
            fields.push(start..at);
            start = at;
        }
        prev_space = c.is_whitespace();
    }
    if start < line.len() {
        fields.push(start..line.len());
    }
    fields
}

/// Diffs two lines at field-token granularity.
///
/// Used to refine a replace region line pair into word-level highlights.
/// Record ranges index the token lists produced by [`tokenize`]; map them
/// back to byte positions through those ranges. Returns `None` when the
/// pair fails the [`WordDiffConfig`] heuristic and should be shown as a
/// whole-line change.
pub fn word_diff(line_a: &str, line_b: &str, config: &WordDiffConfig) -> Option<Diffs> {
    let fields_a: Vec<&str> = tokenize(line_a)
        .into_iter()
        .map(|range| &line_a[range])
        .collect();
    let fields_b: Vec<&str> = tokenize(line_b)
        .into_iter()
        .map(|range| &line_b[range])
        .collect();
    let tokens = fields_a.len().max(fields_b.len());
    let diffs = diff(&fields_a, &fields_b);
    let changed: usize = diffs
        .iter()
        .filter(|record| record.op != DiffOp::Equal)
        .map(DiffRecord::rows)
        .sum();
    if tokens > config.max_tokens && changed > tokens / 2 {
        return None;
    }
    Some(diffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiffOp;
    use alloc::format;
    use alloc::string::String;

    fn fields(line: &str) -> Vec<&str> {
        tokenize(line).into_iter().map(|r| &line[r]).collect()
    }

    #[test]
    fn trailing_whitespace_attaches_to_preceding_field() {
        assert_eq!(fields("one two  three"), ["one ", "two  ", "three"]);
        assert_eq!(fields("one "), ["one "]);
        assert_eq!(fields(""), Vec::<&str>::new());
    }

    #[test]
    fn leading_whitespace_is_its_own_field() {
        assert_eq!(fields("  a b"), ["  ", "a ", "b"]);
        assert_eq!(fields("   "), ["   "]);
    }

    #[test]
    fn fields_partition_the_line() {
        let line = "\tlet x = y + 1;  // comment";
        let joined: String = fields(line).concat();
        assert_eq!(joined, line);
    }

    #[test]
    fn refines_a_replace_pair() {
        let diffs = word_diff(
            "let total = price * count;",
            "let total = price * quantity;",
            &WordDiffConfig::default(),
        )
        .unwrap();
        let changed: Vec<_> = diffs
            .iter()
            .filter(|record| record.op != DiffOp::Equal)
            .collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].op, DiffOp::Replace);
        // The changed token is the final of the six fields on each side.
        assert_eq!(changed[0].a, 5..6);
        assert_eq!(changed[0].b, 5..6);
    }

    #[test]
    fn skips_noisy_rewrites() {
        // Two long lines with no tokens in common.
        let a: String = (0..30).map(|i| format!("a{i} ")).collect();
        let b: String = (0..30).map(|i| format!("b{i} ")).collect();
        assert!(word_diff(&a, &b, &WordDiffConfig::default()).is_none());
        // A permissive config keeps the refinement.
        assert!(word_diff(&a, &b, &WordDiffConfig { max_tokens: 100 }).is_some());
    }
}
