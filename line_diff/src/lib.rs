// Copyright 2026 the Lockstep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line-oriented diffing with side-by-side alignment.
//!
//! The crate computes a minimal edit script between two sequences of
//! comparable items and derives the structures a side-by-side diff editor
//! needs from it:
//!
//! - [`diff`] produces the [`DiffRecord`] list covering both sequences;
//! - [`align`] pads both sequences with blank rows so they display
//!   line-by-line in lockstep, and re-indexes the records into display
//!   coordinates ([`AlignedDiffs`]) for row lookup and region navigation;
//! - [`word_diff`] refines a replaced line pair at field-token granularity
//!   for word-level highlighting;
//! - [`Selected`] applies individual regions from one side onto the other
//!   and undoes them, per side;
//! - [`unified`] renders a classic unified-diff report.
//!
//! Items are compared by equality. Line storage, file I/O, and rendering
//! are the caller's concern: everything here is a synchronous, in-memory
//! transformation over slices, and results are plain values the caller
//! owns. Nothing is internally synchronized; publish results to other
//! threads only after the computation returns.
//!
//! ## Example
//!
//! ```
//! use line_diff::{DiffOp, align, diff};
//!
//! let a = ["a", "b", "c"];
//! let b = ["a", "x", "c"];
//! let diffs = diff(&a, &b);
//! assert_eq!(diffs[1].op, DiffOp::Replace);
//!
//! let aligned = align(&diffs, &a, &b);
//! assert_eq!(aligned.display_a.len(), aligned.display_b.len());
//! let (region, record) = aligned.diffs.diff_for_line(1).unwrap();
//! assert_eq!((region, record.op), (1, DiffOp::Replace));
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod align;
mod error;
mod matcher;
mod record;
mod selected;
mod unified;
mod word;


pub use align::{AlignedDiffs, Alignment, align};
pub use error::{Error, ErrorKind};
pub use matcher::diff;
pub use record::{DiffOp, DiffRecord, Diffs};
pub use selected::{Selected, Side};
pub use unified::unified;
pub use word::{WordDiffConfig, tokenize, word_diff};
