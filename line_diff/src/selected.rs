// Copyright 2026 the Lockstep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;
use core::hash::Hash;

use crate::{DiffOp, DiffRecord, Diffs, Error, diff};

/// Identifies one side of a diff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The A (left) side.
    A,
    /// The B (right) side.
    B,
}

/// One side's buffers and undo history.
#[derive(Clone, Debug)]
struct SideState<T> {
    orig: Vec<T>,
    edit: Vec<T>,
    /// Per-record length delta currently materialized in `edit`.
    deltas: Vec<isize>,
    undos: Vec<Undo<T>>,
}

#[derive(Clone, Debug)]
struct Undo<T> {
    region: usize,
    prior: Vec<T>,
    prior_delta: isize,
}

impl<T: Clone> SideState<T> {
    fn new(orig: Vec<T>, regions: usize) -> Self {
        Self {
            edit: orig.clone(),
            orig,
            deltas: vec![0; regions],
            undos: Vec::new(),
        }
    }

    /// The current range of `region` within `edit`, corrected for the
    /// length changes of earlier applied regions.
    fn current_range(&self, region: usize, range: &core::ops::Range<usize>) -> (usize, usize) {
        let shift: isize = self.deltas[..region].iter().sum();
        let start = add_delta(range.start, shift);
        let len = add_delta(range.len(), self.deltas[region]);
        (start, len)
    }

    fn splice(&mut self, start: usize, len: usize, lines: &[T]) -> Vec<T> {
        let prior: Vec<T> = self.edit[start..start + len].to_vec();
        self.edit.splice(start..start + len, lines.iter().cloned());
        prior
    }
}

fn add_delta(base: usize, delta: isize) -> usize {
    if delta < 0 {
        base - delta.unsigned_abs()
    } else {
        base + delta.unsigned_abs()
    }
}

/// Selective application of diff regions between two line sequences.
///
/// `Selected` owns an original and an editable copy of each side. Applying a
/// region copies the *other* side's original lines over the target side's
/// lines for that region; each apply is recorded on that side's undo stack.
/// A side is `Clean` until its first apply, `Modified` while its undo stack
/// is non-empty, and `Clean` again once every apply has been undone. There
/// is no redo.
///
/// Apply and undo never re-run the diff: record ranges address original
/// coordinates and are corrected for the cumulative length changes of
/// regions applied earlier on the same side.
///
/// ```
/// use line_diff::{Selected, Side};
///
/// let a = ["a", "b", "c"].map(String::from).to_vec();
/// let b = ["a", "x", "c"].map(String::from).to_vec();
/// let mut sel = Selected::new(a, b);
/// sel.apply_b_to_a(1).unwrap();
/// assert_eq!(sel.edit(Side::A), ["a", "x", "c"]);
/// sel.undo(Side::A).unwrap();
/// assert_eq!(sel.edit(Side::A), ["a", "b", "c"]);
/// ```
#[derive(Clone, Debug)]
pub struct Selected<T> {
    diffs: Diffs,
    a: SideState<T>,
    b: SideState<T>,
}

impl<T: Clone + Eq + Hash> Selected<T> {
    /// Diffs the two sequences and takes ownership of both as the original
    /// content for subsequent applies.
    pub fn new(a: Vec<T>, b: Vec<T>) -> Self {
        let diffs = diff(&a, &b);
        let regions = diffs.len();
        Self {
            diffs,
            a: SideState::new(a, regions),
            b: SideState::new(b, regions),
        }
    }
}

impl<T: Clone> Selected<T> {
    /// The records computed over the original sequences.
    pub fn diffs(&self) -> &Diffs {
        &self.diffs
    }

    /// The current (edited) lines for a side.
    pub fn edit(&self, side: Side) -> &[T] {
        &self.side(side).edit
    }

    /// The original lines for a side.
    pub fn orig(&self, side: Side) -> &[T] {
        &self.side(side).orig
    }

    /// Returns `true` while a side has applied regions that have not been
    /// undone.
    pub fn is_modified(&self, side: Side) -> bool {
        !self.side(side).undos.is_empty()
    }

    /// Applies region `region` from A over the corresponding B lines.
    pub fn apply_a_to_b(&mut self, region: usize) -> Result<(), Error> {
        let record = self.validate(region)?.clone();
        let lines = self.a.orig[record.a.clone()].to_vec();
        apply(&mut self.b, region, &record.b, &lines);
        Ok(())
    }

    /// Applies region `region` from B over the corresponding A lines.
    pub fn apply_b_to_a(&mut self, region: usize) -> Result<(), Error> {
        let record = self.validate(region)?.clone();
        let lines = self.b.orig[record.b.clone()].to_vec();
        apply(&mut self.a, region, &record.a, &lines);
        Ok(())
    }

    /// Undoes the most recent apply on `side`, restoring the lines it
    /// replaced.
    pub fn undo(&mut self, side: Side) -> Result<(), Error> {
        let record_range = |record: &DiffRecord| match side {
            Side::A => record.a.clone(),
            Side::B => record.b.clone(),
        };
        let state = match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        };
        let undo = state.undos.pop().ok_or(Error::empty_undo_stack(side))?;
        let range = record_range(&self.diffs[undo.region]);
        let (start, len) = state.current_range(undo.region, &range);
        state.splice(start, len, &undo.prior);
        state.deltas[undo.region] = undo.prior_delta;
        Ok(())
    }

    fn side(&self, side: Side) -> &SideState<T> {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    /// Checks that `region` exists and is applicable (not an equal region).
    fn validate(&self, region: usize) -> Result<&DiffRecord, Error> {
        let record = self
            .diffs
            .get(region)
            .ok_or(Error::invalid_region(region, self.diffs.len()))?;
        if record.op == DiffOp::Equal {
            return Err(Error::invalid_region(region, self.diffs.len()));
        }
        Ok(record)
    }
}

fn apply<T: Clone>(
    state: &mut SideState<T>,
    region: usize,
    range: &core::ops::Range<usize>,
    lines: &[T],
) {
    let (start, len) = state.current_range(region, range);
    let prior = state.splice(start, len, lines);
    state.undos.push(Undo {
        region,
        prior,
        prior_delta: state.deltas[region],
    });
    state.deltas[region] = lines.len() as isize - range.len() as isize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn lines(s: &str) -> Vec<String> {
        if s.is_empty() {
            Vec::new()
        } else {
            s.split(' ').map(String::from).collect()
        }
    }

    fn fixture() -> Selected<String> {
        // Regions: equal a, replace b/x, equal c, insert y z, equal d.
        Selected::new(lines("a b c d"), lines("a x c y z d"))
    }

    #[test]
    fn apply_copies_other_side() {
        let mut sel = fixture();
        sel.apply_b_to_a(1).unwrap();
        assert_eq!(sel.edit(Side::A), lines("a x c d"));
        assert_eq!(sel.edit(Side::B), lines("a x c y z d"));
        assert!(sel.is_modified(Side::A));
        assert!(!sel.is_modified(Side::B));
    }

    #[test]
    fn apply_insert_changes_length() {
        let mut sel = fixture();
        sel.apply_b_to_a(3).unwrap();
        assert_eq!(sel.edit(Side::A), lines("a b c y z d"));
        sel.apply_a_to_b(3).unwrap();
        assert_eq!(sel.edit(Side::B), lines("a x c d"));
    }

    #[test]
    fn later_regions_shift_after_earlier_applies() {
        let mut sel = fixture();
        // Applying the insert region first grows side A by two lines; the
        // replace region's range must still resolve correctly afterwards.
        sel.apply_b_to_a(3).unwrap();
        sel.apply_b_to_a(1).unwrap();
        assert_eq!(sel.edit(Side::A), lines("a x c y z d"));

        sel.undo(Side::A).unwrap();
        assert_eq!(sel.edit(Side::A), lines("a b c y z d"));
        sel.undo(Side::A).unwrap();
        assert_eq!(sel.edit(Side::A), lines("a b c d"));
        assert!(!sel.is_modified(Side::A));
    }

    #[test]
    fn apply_then_undo_is_identity() {
        let mut sel = fixture();
        let before = sel.edit(Side::B).to_vec();
        sel.apply_a_to_b(1).unwrap();
        assert_ne!(sel.edit(Side::B), before);
        sel.undo(Side::B).unwrap();
        assert_eq!(sel.edit(Side::B), before);
    }

    #[test]
    fn reapplying_a_region_stays_consistent() {
        let mut sel = fixture();
        sel.apply_b_to_a(3).unwrap();
        sel.apply_b_to_a(3).unwrap();
        assert_eq!(sel.edit(Side::A), lines("a b c y z d"));
        sel.undo(Side::A).unwrap();
        assert_eq!(sel.edit(Side::A), lines("a b c y z d"));
        sel.undo(Side::A).unwrap();
        assert_eq!(sel.edit(Side::A), lines("a b c d"));
    }

    #[test]
    fn equal_region_is_rejected() {
        let mut sel = fixture();
        let err = sel.apply_b_to_a(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRegion);
        assert_eq!(err.region(), 0);

        let err = sel.apply_a_to_b(9).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRegion);
        assert_eq!(err.regions(), sel.diffs().len());
    }

    #[test]
    fn undo_on_clean_side_is_rejected() {
        let mut sel = fixture();
        let err = sel.undo(Side::A).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyUndoStack);
        assert_eq!(err.side(), Some(Side::A));
    }

    #[test]
    fn clean_modified_clean_lifecycle() {
        let mut sel = fixture();
        assert!(!sel.is_modified(Side::A));
        sel.apply_b_to_a(1).unwrap();
        sel.apply_b_to_a(3).unwrap();
        assert!(sel.is_modified(Side::A));
        sel.undo(Side::A).unwrap();
        assert!(sel.is_modified(Side::A));
        sel.undo(Side::A).unwrap();
        assert!(!sel.is_modified(Side::A));
        assert_eq!(sel.edit(Side::A), sel.orig(Side::A));
    }
}
