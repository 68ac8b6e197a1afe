// Copyright 2026 the Lockstep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use crate::{Error, Special, Style};

/// Maps a content offset to a position within a span.
///
/// Returned by [`Text::index`]. The `rune` field indexes into the span's
/// underlying rune slice and therefore includes the `style_runes` prefix:
/// the first content rune of a span has `rune == style_runes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Index {
    /// The index of the span containing the offset.
    pub span: usize,
    /// The number of style-prefix runes in that span.
    pub style_runes: usize,
    /// The rune index within the span's underlying slice, prefix included.
    pub rune: usize,
}

/// A hyperlink discovered in a [`Text`].
///
/// Links are recomputed on demand by [`Text::links`]; they are never stored
/// separately from the span sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// The content rune range covered by the link's label.
    pub range: Range<usize>,
    /// The visible label text.
    pub label: String,
    /// The link target.
    pub url: String,
}

/// Styled text stored as an ordered sequence of spans.
///
/// Each span is a flat `u32` rune sequence: a short sentinel-rune prefix
/// encoding the span's [`Style`], followed by the span's content runes.
/// Concatenating the content runes of all spans in order reproduces the
/// plain text exactly; see [`Text::join`].
///
/// Content offsets throughout this API count content runes only, never
/// prefix runes. Valid offsets are `[0, len)`; out-of-range offsets report
/// [`ErrorKind::OffsetOutOfRange`](crate::ErrorKind::OffsetOutOfRange).
///
/// A `Text` exclusively owns its spans. It is not internally synchronized;
/// share it across threads only after mutation has completed.
///
/// ```
/// use rune_text::{Slant, Style, Text};
///
/// let mut text = Text::new();
/// text.add_span_str(&Style::new(), "The ");
/// text.add_span_str(
///     &Style {
///         slant: Slant::Italic,
///         ..Style::new()
///     },
///     "lazy",
/// );
/// text.add_span_str(&Style::new(), " fox");
/// assert_eq!(text.plain(), "The lazy fox");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Text {
    spans: Vec<Vec<u32>>,
}

impl Text {
    /// Creates an empty text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a text holding `content` as a single default-styled span.
    pub fn new_plain(content: &str) -> Self {
        let mut text = Self::new();
        text.add_span_str(&Style::new(), content);
        text
    }

    /// Builds a text from raw span rune data, for example deserialized from
    /// storage.
    ///
    /// Every span's style prefix is validated; an undecodable prefix reports
    /// [`ErrorKind::MalformedSpanEncoding`](crate::ErrorKind::MalformedSpanEncoding)
    /// with the offending span index.
    pub fn from_spans(spans: Vec<Vec<u32>>) -> Result<Self, Error> {
        for (i, span) in spans.iter().enumerate() {
            Style::decode(span, Some(i))?;
        }
        Ok(Self { spans })
    }

    /// The number of spans.
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// The total content length in runes, excluding style prefixes.
    pub fn len(&self) -> usize {
        self.spans
            .iter()
            .map(|span| span.len() - content_start(span))
            .sum()
    }

    /// Returns `true` if the text has no content runes.
    ///
    /// A text consisting only of empty spans (such as marker spans) is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a span with the given style and content runes.
    ///
    /// Content runes are expected to be Unicode scalar values; anything else
    /// is preserved but reads back as U+FFFD from [`Text::plain`].
    ///
    /// Adjacent spans with identical styles are kept separate; no operation
    /// on `Text` depends on spans being merged.
    pub fn add_span(&mut self, style: &Style, content: &[u32]) -> &mut Self {
        let mut span = style.to_runes();
        span.extend_from_slice(content);
        self.spans.push(span);
        self
    }

    /// Appends a span with the given style and content string.
    pub fn add_span_str(&mut self, style: &Style, content: &str) -> &mut Self {
        let mut span = style.to_runes();
        span.extend(content.chars().map(|c| c as u32));
        self.spans.push(span);
        self
    }

    /// Appends a link span followed by its [`Special::End`] marker span.
    ///
    /// The link target and label are carried by a single span whose style is
    /// `style` with the special role and target set; the empty end-marker
    /// span terminates the link region so [`Text::links`] can recover it.
    pub fn add_link(&mut self, style: &Style, url: &str, label: &str) -> &mut Self {
        let link_style = Style {
            special: Special::Link,
            link: Some(url.into()),
            ..style.clone()
        };
        self.add_span_str(&link_style, label);
        self.add_span(&Style::end(), &[]);
        self
    }

    /// The content rune at `offset`.
    ///
    /// Equivalent to indexing the result of [`Text::join`], without
    /// materializing it.
    pub fn at(&self, offset: usize) -> Result<u32, Error> {
        let index = self.index(offset)?;
        Ok(self.spans[index.span][index.rune])
    }

    /// Maps a content `offset` to a span and a rune position within it.
    ///
    /// Consistent with [`Text::split_span`]: after splitting at `offset`,
    /// `index(offset)` addresses the first content rune of the span that
    /// begins there, i.e. `rune == style_runes`.
    pub fn index(&self, offset: usize) -> Result<Index, Error> {
        let mut cum = 0;
        for (i, span) in self.spans.iter().enumerate() {
            let start = content_start(span);
            let content_len = span.len() - start;
            if offset < cum + content_len {
                return Ok(Index {
                    span: i,
                    style_runes: start,
                    rune: start + (offset - cum),
                });
            }
            cum += content_len;
        }
        Err(Error::offset_out_of_range(offset, cum))
    }

    /// Splits the span containing content `offset` into two spans with
    /// identical styles, so that `offset` becomes the first content rune of
    /// the second. Returns the index of the span beginning at `offset`.
    ///
    /// When `offset` already begins a span, no split happens and that span's
    /// index is returned.
    pub fn split_span(&mut self, offset: usize) -> Result<usize, Error> {
        let index = self.index(offset)?;
        if index.rune == index.style_runes {
            return Ok(index.span);
        }
        let (style, _) = Style::decode(&self.spans[index.span], Some(index.span))
            .expect("spans are validated on construction");
        let mut tail = style.to_runes();
        tail.extend_from_slice(&self.spans[index.span][index.rune..]);
        self.spans[index.span].truncate(index.rune);
        self.spans.insert(index.span + 1, tail);
        Ok(index.span + 1)
    }

    /// Replaces the style of the span at `index`, leaving content untouched.
    pub fn set_span_style(&mut self, index: usize, style: &Style) -> Result<(), Error> {
        let Some(span) = self.spans.get_mut(index) else {
            return Err(Error::offset_out_of_range(index, self.spans.len()));
        };
        let start = content_start(span);
        let mut replacement = style.to_runes();
        replacement.extend_from_slice(&span[start..]);
        *span = replacement;
        Ok(())
    }

    /// The decoded style of the span at `index`.
    pub fn span_style(&self, index: usize) -> Result<Style, Error> {
        let Some(span) = self.spans.get(index) else {
            return Err(Error::offset_out_of_range(index, self.spans.len()));
        };
        Style::decode(span, Some(index)).map(|(style, _)| style)
    }

    /// Concatenates all spans' content runes in order, excluding prefixes.
    ///
    /// For a text built purely from [`Text::add_span_str`] calls over a
    /// source string, [`Text::plain`] on the result reproduces the source
    /// exactly.
    pub fn join(&self) -> Vec<u32> {
        let mut runes = Vec::with_capacity(self.len());
        for span in &self.spans {
            runes.extend_from_slice(&span[content_start(span)..]);
        }
        runes
    }

    /// The plain text content as a string.
    ///
    /// Content runes that are not Unicode scalar values render as U+FFFD.
    pub fn plain(&self) -> String {
        self.join()
            .iter()
            .map(|&r| char::from_u32(r).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    /// Iterates over `(style, content runes)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (Style, &[u32])> {
        self.spans.iter().enumerate().map(|(i, span)| {
            let (style, start) = Style::decode(span, Some(i))
                .expect("spans are validated on construction");
            (style, &span[start..])
        })
    }

    /// Scans the span sequence for links, in document order.
    ///
    /// A link starts at a [`Special::Link`] span and its label extends over
    /// consecutive link spans with the same target, up to (and not
    /// including) the next [`Special::End`] marker.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        let mut cum = 0;
        let mut open: Option<Link> = None;
        for (style, content) in self.iter() {
            match style.special {
                Special::Link => {
                    let url = style.link.unwrap_or_default();
                    let continues = matches!(&open, Some(link) if link.url == url);
                    if !continues {
                        if let Some(link) = open.take() {
                            links.push(link);
                        }
                        open = Some(Link {
                            range: cum..cum,
                            label: String::new(),
                            url,
                        });
                    }
                    if let Some(link) = open.as_mut() {
                        link.range.end = cum + content.len();
                        link.label.extend(
                            content
                                .iter()
                                .map(|&r| char::from_u32(r).unwrap_or(char::REPLACEMENT_CHARACTER)),
                        );
                    }
                }
                _ => {
                    if let Some(link) = open.take() {
                        links.push(link);
                    }
                }
            }
            cum += content.len();
        }
        if let Some(link) = open {
            links.push(link);
        }
        links
    }

    /// Re-splits every plain span at whitespace boundaries so each resulting
    /// span holds one field: a run of non-whitespace plus the whitespace
    /// trailing it. Used to prepare a text for line wrapping.
    ///
    /// Spans with a special role (links, markers) are left whole.
    pub fn split_spaces(&mut self) {
        let mut split = Vec::with_capacity(self.spans.len());
        for (i, span) in self.spans.iter().enumerate() {
            let (style, start) = Style::decode(span, Some(i))
                .expect("spans are validated on construction");
            let content = &span[start..];
            if style.special != Special::None {
                split.push(span.clone());
                continue;
            }
            let mut field_start = 0;
            for at in 1..content.len() {
                if is_space(content[at - 1]) && !is_space(content[at]) {
                    split.push(make_span(&style, &content[field_start..at]));
                    field_start = at;
                }
            }
            split.push(make_span(&style, &content[field_start..]));
        }
        self.spans = split;
    }
}

impl fmt::Display for Text {
    /// Writes one `[style]: "content"` line per span.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (style, content) in self.iter() {
            let content: String = content
                .iter()
                .map(|&r| char::from_u32(r).unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect();
            writeln!(f, "[{style}]: {content:?}")?;
        }
        Ok(())
    }
}

/// The index of the first content rune in a span's underlying slice.
fn content_start(span: &[u32]) -> usize {
    Style::prefix_len(span).expect("spans are validated on construction")
}

fn make_span(style: &Style, content: &[u32]) -> Vec<u32> {
    let mut span = style.to_runes();
    span.extend_from_slice(content);
    span
}

fn is_space(rune: u32) -> bool {
    char::from_u32(rune).is_some_and(char::is_whitespace)
}
