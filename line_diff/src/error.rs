// Copyright 2026 the Lockstep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Side;

/// Rich error type for diff apply/undo operations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus contextual information about
/// the attempted operation. All conditions are recoverable; the caller is
/// expected to surface them as user-facing notices, never to abort.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The caller-provided region index, when relevant.
    region: usize,

    /// The number of regions at the time of failure.
    regions: usize,

    /// The side an undo was attempted on, when relevant.
    side: Option<Side>,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The region index provided by the caller.
    pub fn region(&self) -> usize {
        self.region
    }

    /// The number of diff regions at the time of the error.
    pub fn regions(&self) -> usize {
        self.regions
    }

    /// The side an undo was attempted on, if relevant.
    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub(crate) fn invalid_region(region: usize, regions: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRegion,
            region,
            regions,
            side: None,
        }
    }

    pub(crate) fn empty_undo_stack(side: Side) -> Self {
        Self {
            kind: ErrorKind::EmptyUndoStack,
            region: 0,
            regions: 0,
            side: Some(side),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidRegion => write!(
                f,
                "region {} is not applicable (of {} regions)",
                self.region, self.regions
            ),
            ErrorKind::EmptyUndoStack => {
                let side = match self.side {
                    Some(Side::A) => "A",
                    Some(Side::B) => "B",
                    None => "?",
                };
                write!(f, "no more edits to undo on side {side}")
            }
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The addressed region does not exist, or is an equal region where
    /// applying has no meaning.
    InvalidRegion,

    /// An undo was requested on a side with nothing applied.
    EmptyUndoStack,
}
