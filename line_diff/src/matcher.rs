// Copyright 2026 the Lockstep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::{DiffOp, DiffRecord, Diffs};

/// A maximal run of identical items: `a[a..a + len] == b[b..b + len]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MatchBlock {
    a: usize,
    b: usize,
    len: usize,
}

/// Computes the edit script between two sequences of comparable items.
///
/// Items are compared by equality; for line diffs the items are lines, for
/// word diffs within a line they are field tokens. The result covers both
/// inputs exactly: every index of `a` and of `b` appears in exactly one
/// record.
///
/// The matcher repeatedly finds the longest run of identical items between
/// the unmatched stretches of the two sequences, preferring the earliest
/// such run when several tie. This makes the output fully deterministic:
/// identical inputs always yield an identical record list.
///
/// ```
/// use line_diff::{DiffOp, diff};
///
/// let a = ["a", "b", "c"];
/// let b = ["a", "x", "c"];
/// let diffs = diff(&a, &b);
/// assert_eq!(diffs.len(), 3);
/// assert_eq!(diffs[1].op, DiffOp::Replace);
/// assert_eq!((diffs[1].a.clone(), diffs[1].b.clone()), (1..2, 1..2));
/// ```
pub fn diff<T: Eq + Hash>(a: &[T], b: &[T]) -> Diffs {
    let blocks = matching_blocks(a, b);
    let mut records = Vec::new();
    let (mut i, mut j) = (0, 0);
    for block in blocks {
        let op = match (i < block.a, j < block.b) {
            (true, true) => Some(DiffOp::Replace),
            (true, false) => Some(DiffOp::Delete),
            (false, true) => Some(DiffOp::Insert),
            (false, false) => None,
        };
        if let Some(op) = op {
            records.push(DiffRecord {
                op,
                a: i..block.a,
                b: j..block.b,
            });
        }
        i = block.a + block.len;
        j = block.b + block.len;
        if block.len > 0 {
            records.push(DiffRecord {
                op: DiffOp::Equal,
                a: block.a..i,
                b: block.b..j,
            });
        }
    }
    Diffs(records)
}

/// Finds all maximal matching runs between `a` and `b`, in order, plus a
/// zero-length terminator block at the end of both sequences.
fn matching_blocks<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<MatchBlock> {
    // Index of item content to its positions in `b`, in ascending order.
    let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
    for (j, item) in b.iter().enumerate() {
        b2j.entry(item).or_default().push(j);
    }

    let mut queue = vec![(0, a.len(), 0, b.len())];
    let mut blocks = Vec::new();
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let m = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if m.len > 0 {
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.len < ahi && m.b + m.len < bhi {
                queue.push((m.a + m.len, ahi, m.b + m.len, bhi));
            }
            blocks.push(m);
        }
    }
    blocks.sort_unstable_by_key(|m| (m.a, m.b));

    // Coalesce adjacent blocks so each emitted run is maximal.
    let mut merged: Vec<MatchBlock> = Vec::with_capacity(blocks.len() + 1);
    for m in blocks {
        match merged.last_mut() {
            Some(last) if last.a + last.len == m.a && last.b + last.len == m.b => {
                last.len += m.len;
            }
            _ => merged.push(m),
        }
    }
    merged.push(MatchBlock {
        a: a.len(),
        b: b.len(),
        len: 0,
    });
    merged
}

/// Finds the longest block of items common to `a[alo..ahi]` and
/// `b[blo..bhi]`.
///
/// Of all maximal-length blocks, returns the one starting earliest in `a`,
/// and of those the one starting earliest in `b`.
fn longest_match<T: Eq + Hash>(
    a: &[T],
    b2j: &HashMap<&T, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchBlock {
    let mut best = MatchBlock {
        a: alo,
        b: blo,
        len: 0,
    };
    // j2len[j] is the length of the longest run ending with a[i - 1], b[j].
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for (i, item) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(item) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let len = match j.checked_sub(1) {
                    Some(prev) => j2len.get(&prev).copied().unwrap_or(0) + 1,
                    None => 1,
                };
                next.insert(j, len);
                if len > best.len {
                    best = MatchBlock {
                        a: i + 1 - len,
                        b: j + 1 - len,
                        len,
                    };
                }
            }
        }
        j2len = next;
    }
    best
}
