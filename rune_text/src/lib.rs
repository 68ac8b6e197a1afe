// Copyright 2026 the Lockstep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Styled text as flat rune sequences.
//!
//! [`Text`] represents rich text as an ordered sequence of spans, where each
//! span is a single flat `u32` rune sequence: a short prefix of sentinel
//! runes encoding the span's [`Style`], followed by the span's content runes.
//! The sentinel encoding keeps the whole document in plain rune storage while
//! still supporting span-level edits, offset lookup, and link annotations.
//!
//! ## Scope
//!
//! This crate is a pure data model: it defines the span representation and
//! its operations (append, split, restyle, offset indexing, link recovery,
//! whitespace re-splitting). It does not shape, lay out, or render text, and
//! it does not define a markup language; those are expected to live in
//! consuming layers.
//!
//! ## Offsets
//!
//! All offsets are expressed in **content runes**: style-prefix runes are
//! never counted. Valid offsets lie in `[0, len)`; anything else reports
//! [`ErrorKind::OffsetOutOfRange`].
//!
//! ## Example
//!
//! ```
//! use rune_text::{Slant, Style, Text};
//!
//! let mut text = Text::new();
//! text.add_span_str(&Style::new(), "The ");
//! text.add_span_str(
//!     &Style {
//!         slant: Slant::Italic,
//!         ..Style::new()
//!     },
//!     "lazy",
//! );
//! text.add_span_str(&Style::new(), " fox");
//!
//! assert_eq!(text.plain(), "The lazy fox");
//! // Splitting at a content offset preserves the containing span's style.
//! let span = text.split_span(6).unwrap();
//! assert_eq!(span, 2);
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

mod error;
mod style;
mod text;

#[cfg(test)]
mod tests;

pub use error::{Error, ErrorKind};
pub use style::{
    Decoration, Family, Slant, Special, Style, Weight, color_from_rune, color_to_rune,
};
pub use text::{Index, Link, Text};

/// RGBA color values used by [`Style`] foreground/background colors.
pub use peniko::color::Rgba8;
