// Copyright 2026 the Lockstep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    ErrorKind, Index, Rgba8, Slant, Special, Style, Text, Weight, color_from_rune, color_to_rune,
};
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

const RED: Rgba8 = Rgba8 {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

fn plain() -> Style {
    Style::new()
}

fn italic_red() -> Style {
    Style {
        slant: Slant::Italic,
        fill: Some(RED),
        ..Style::new()
    }
}

fn bold_big() -> Style {
    Style {
        weight: Weight::Bold,
        size: 1.5,
        ..Style::new()
    }
}

/// Builds the shared five-span fixture over a single source string.
fn fox_text() -> (&'static str, Text) {
    let src = "The lazy fox typed in some familiar text";
    let mut tx = Text::new();
    tx.add_span_str(&plain(), &src[..4]);
    tx.add_span_str(&italic_red(), &src[4..8]);
    tx.add_span_str(&plain(), &src[8..27]);
    tx.add_span_str(&bold_big(), &src[27..35]);
    tx.add_span_str(&plain(), &src[35..]);
    (src, tx)
}

#[test]
fn display_format() {
    let (_, tx) = fox_text();
    let trg = "[]: \"The \"\n\
               [italic fill-color]: \"lazy\"\n\
               []: \" fox typed in some \"\n\
               [1.50x bold]: \"familiar\"\n\
               []: \" text\"\n";
    assert_eq!(tx.to_string(), trg);
}

#[test]
fn join_round_trips_source() {
    let (src, tx) = fox_text();
    assert_eq!(tx.plain(), src);
    assert_eq!(tx.len(), src.chars().count());

    let joined = tx.join();
    for (i, c) in src.chars().enumerate() {
        assert_eq!(joined[i], c as u32);
        assert_eq!(tx.at(i).unwrap(), c as u32);
    }
    assert_eq!(tx.at(src.len()).unwrap_err().kind(), ErrorKind::OffsetOutOfRange);
}

#[test]
fn split_span_mid_span() {
    let (_, mut tx) = fox_text();
    let ssi = tx.split_span(12).unwrap();
    assert_eq!(ssi, 3);
    let trg = "[]: \"The \"\n\
               [italic fill-color]: \"lazy\"\n\
               []: \" fox\"\n\
               []: \" typed in some \"\n\
               [1.50x bold]: \"familiar\"\n\
               []: \" text\"\n";
    assert_eq!(tx.to_string(), trg);

    // Splitting at an existing span boundary is a lookup, not a split.
    assert_eq!(tx.split_span(4).unwrap(), 1);
    assert_eq!(tx.span_count(), 6);
}

#[test]
fn split_preserves_style() {
    // [plain:"The "] [italic:"lazy"] [plain:" fox"], split at content offset 7.
    let mut tx = Text::new();
    tx.add_span_str(&plain(), "The ");
    tx.add_span_str(
        &Style {
            slant: Slant::Italic,
            ..Style::new()
        },
        "lazy",
    );
    tx.add_span_str(&plain(), " fox");

    let ssi = tx.split_span(7).unwrap();
    assert_eq!(ssi, 2);
    assert_eq!(tx.span_style(1).unwrap().slant, Slant::Italic);
    assert_eq!(tx.span_style(2).unwrap().slant, Slant::Italic);
    let trg = "[]: \"The \"\n\
               [italic]: \"laz\"\n\
               [italic]: \"y\"\n\
               []: \" fox\"\n";
    assert_eq!(tx.to_string(), trg);
}

#[test]
fn index_counts_prefix_runes() {
    let (src, mut tx) = fox_text();
    tx.split_span(12).unwrap();

    // (offset, span, style_runes, rune): the plain style encodes as 2 prefix
    // runes, the italic+fill style as 3.
    let cases = [
        (0, 0, 2, 2),
        (2, 0, 2, 4),
        (4, 1, 3, 3),
        (7, 1, 3, 6),
        (8, 2, 2, 2),
        (9, 2, 2, 3),
        (11, 2, 2, 5),
        (16, 3, 2, 6),
    ];
    let sr: Vec<u32> = src.chars().map(|c| c as u32).collect();
    for (offset, span, style_runes, rune) in cases {
        let index = tx.index(offset).unwrap();
        assert_eq!(
            index,
            Index {
                span,
                style_runes,
                rune,
            },
            "offset {offset}"
        );
        assert_eq!(tx.at(offset).unwrap(), sr[offset]);
    }
}

#[test]
fn split_then_index_lands_on_content_start() {
    let (src, mut tx) = fox_text();
    for offset in [1, 5, 9, 13, 28, 36] {
        let span = tx.split_span(offset).unwrap();
        let index = tx.index(offset).unwrap();
        assert_eq!(index.span, span);
        assert_eq!(index.rune, index.style_runes);
    }
    assert_eq!(tx.plain(), src);
}

#[test]
fn set_span_style_keeps_content() {
    let (src, mut tx) = fox_text();
    tx.split_span(12).unwrap();
    tx.set_span_style(3, &italic_red()).unwrap();
    let trg = "[]: \"The \"\n\
               [italic fill-color]: \"lazy\"\n\
               []: \" fox\"\n\
               [italic fill-color]: \" typed in some \"\n\
               [1.50x bold]: \"familiar\"\n\
               []: \" text\"\n";
    assert_eq!(tx.to_string(), trg);
    assert_eq!(tx.plain(), src);

    let err = tx.set_span_style(6, &plain()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OffsetOutOfRange);
}

#[test]
fn links_recovered_with_global_ranges() {
    let src = "Pre link link text post link";
    let mut tx = Text::new();
    tx.add_span_str(&plain(), "Pre link ");
    tx.add_link(&italic_red(), "https://example.com", "link text");
    tx.add_span_str(&bold_big(), " post link");

    let trg = "[]: \"Pre link \"\n\
               [italic link [https://example.com] fill-color]: \"link text\"\n\
               [{end}]: \"\"\n\
               [1.50x bold]: \" post link\"\n";
    assert_eq!(tx.to_string(), trg);

    assert_eq!(tx.plain(), src);
    for (i, c) in src.chars().enumerate() {
        assert_eq!(tx.at(i).unwrap(), c as u32);
    }

    let links = tx.links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].range, 9..18);
    assert_eq!(links[0].label, "link text");
    assert_eq!(links[0].url, "https://example.com");
}

#[test]
fn links_survive_label_splits() {
    let mut tx = Text::new();
    tx.add_link(&plain(), "https://example.com", "link text");
    tx.split_span(4).unwrap();

    let links = tx.links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].range, 0..9);
    assert_eq!(links[0].label, "link text");
}

#[test]
fn split_spaces_one_field_per_span() {
    let mut tx = Text::new_plain("Pre link text post link ");
    tx.split_spaces();
    let trg = "[]: \"Pre \"\n\
               []: \"link \"\n\
               []: \"text \"\n\
               []: \"post \"\n\
               []: \"link \"\n";
    assert_eq!(tx.to_string(), trg);
    assert_eq!(tx.plain(), "Pre link text post link ");
}

#[test]
fn from_spans_validates_prefixes() {
    let (_, tx) = fox_text();
    let raw: Vec<Vec<u32>> = (0..tx.span_count())
        .map(|i| {
            let style = tx.span_style(i).unwrap();
            let mut span = style.to_runes();
            span.extend_from_slice(tx.iter().nth(i).unwrap().1);
            span
        })
        .collect();
    let rebuilt = Text::from_spans(raw).unwrap();
    assert_eq!(rebuilt, tx);

    // Content runes without a style marker do not parse as a span.
    let err = Text::from_spans(vec![vec!['h' as u32, 'i' as u32]]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedSpanEncoding);
    assert_eq!(err.span(), Some(0));
}

#[test]
fn color_rune_packing_is_reversible() {
    for r in (0_u8..=255).step_by(17) {
        for a in (0_u8..=255).step_by(51) {
            let c = Rgba8 {
                r,
                g: r.wrapping_mul(3),
                b: a,
                a,
            };
            assert_eq!(color_from_rune(color_to_rune(c)), c);
        }
    }
}

#[test]
fn end_marker_contributes_no_content() {
    let mut tx = Text::new();
    tx.add_link(&plain(), "https://example.com", "x");
    assert_eq!(tx.span_count(), 2);
    assert_eq!(tx.len(), 1);
    assert_eq!(tx.span_style(1).unwrap().special, Special::End);
}
