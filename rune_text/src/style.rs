// Copyright 2026 the Lockstep Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::BitOr;

use peniko::color::Rgba8;

use crate::Error;

/// Marker bit set on the first sentinel rune of every style prefix.
///
/// Unicode scalar values never exceed `0x10FFFF`, so a rune with the high bit
/// set can never be mistaken for content that originated as a `char`.
const STYLE_MARK: u32 = 1 << 31;

const WEIGHT_MASK: u32 = 0xF;
const SLANT_SHIFT: u32 = 4;
const FAMILY_SHIFT: u32 = 5;
const FAMILY_MASK: u32 = 0xF;
const SPECIAL_SHIFT: u32 = 9;
const SPECIAL_MASK: u32 = 0xF;
const DECORATION_SHIFT: u32 = 13;
const DECORATION_MASK: u32 = 0x3;
const FILL_BIT: u32 = 1 << 15;
const BACKGROUND_BIT: u32 = 1 << 16;

/// Visual weight class of a span, from thinnest to blackest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Weight {
    /// Thin (lightest) weight.
    Thin,
    /// Extra-light weight.
    ExtraLight,
    /// Light weight.
    Light,
    /// Normal (regular) weight. This is the default.
    #[default]
    Normal,
    /// Medium weight.
    Medium,
    /// Semi-bold weight.
    SemiBold,
    /// Bold weight.
    Bold,
    /// Extra-bold weight.
    ExtraBold,
    /// Black (heaviest) weight.
    Black,
}

impl Weight {
    fn from_bits(bits: u32) -> Option<Self> {
        Some(match bits {
            0 => Self::Thin,
            1 => Self::ExtraLight,
            2 => Self::Light,
            3 => Self::Normal,
            4 => Self::Medium,
            5 => Self::SemiBold,
            6 => Self::Bold,
            7 => Self::ExtraBold,
            8 => Self::Black,
            _ => return None,
        })
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Thin => "thin",
            Self::ExtraLight => "extra-light",
            Self::Light => "light",
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::SemiBold => "semi-bold",
            Self::Bold => "bold",
            Self::ExtraBold => "extra-bold",
            Self::Black => "black",
        })
    }
}

/// Slant of a span: upright or italic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Slant {
    /// Upright text. This is the default.
    #[default]
    Normal,
    /// Italic text.
    Italic,
}

/// Generic font family class for a span.
///
/// Concrete family resolution is a rendering concern and happens outside this
/// crate; spans only record the generic class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Family {
    /// Sans-serif family. This is the default.
    #[default]
    SansSerif,
    /// Serif family.
    Serif,
    /// Monospace family.
    Monospace,
    /// Cursive family.
    Cursive,
    /// Fantasy family.
    Fantasy,
    /// Math family.
    Math,
    /// Emoji family.
    Emoji,
}

impl Family {
    fn from_bits(bits: u32) -> Option<Self> {
        Some(match bits {
            0 => Self::SansSerif,
            1 => Self::Serif,
            2 => Self::Monospace,
            3 => Self::Cursive,
            4 => Self::Fantasy,
            5 => Self::Math,
            6 => Self::Emoji,
            _ => return None,
        })
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SansSerif => "sans-serif",
            Self::Serif => "serif",
            Self::Monospace => "monospace",
            Self::Cursive => "cursive",
            Self::Fantasy => "fantasy",
            Self::Math => "math",
            Self::Emoji => "emoji",
        })
    }
}

/// Special role markers for a span.
///
/// [`Special::Link`] spans carry a link target in their rune prefix, and are
/// terminated by a following empty [`Special::End`] marker span so that
/// multi-span link labels can be recovered by scanning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Special {
    /// No special role. This is the default.
    #[default]
    None,
    /// A hyperlink; the target URL is encoded in the span prefix.
    Link,
    /// Superscript.
    Super,
    /// Subscript.
    Sub,
    /// Inline math.
    MathInline,
    /// Display (block) math.
    MathDisplay,
    /// Terminates the preceding special region.
    End,
}

impl Special {
    fn from_bits(bits: u32) -> Option<Self> {
        Some(match bits {
            0 => Self::None,
            1 => Self::Link,
            2 => Self::Super,
            3 => Self::Sub,
            4 => Self::MathInline,
            5 => Self::MathDisplay,
            6 => Self::End,
            _ => return None,
        })
    }
}

/// Text decoration flags for a span.
///
/// Decorations combine with `|`:
///
/// ```
/// use rune_text::Decoration;
///
/// let deco = Decoration::UNDERLINE | Decoration::LINE_THROUGH;
/// assert!(deco.contains(Decoration::UNDERLINE));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Decoration(u8);

impl Decoration {
    /// No decorations.
    pub const NONE: Self = Self(0);

    /// Underline the span.
    pub const UNDERLINE: Self = Self(1);

    /// Strike through the span.
    pub const LINE_THROUGH: Self = Self(1 << 1);

    /// Returns `true` if all flags in `other` are set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no flags are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn from_bits(bits: u32) -> Self {
        // The bitfield width is enforced by the mask at the decode site.
        #[allow(
            clippy::cast_possible_truncation,
            reason = "masked to two bits at the decode site"
        )]
        Self(bits as u8)
    }
}

impl BitOr for Decoration {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Packs an RGBA color into a single rune.
///
/// The inverse of [`color_from_rune`]; round-trips every 32-bit RGBA value.
pub fn color_to_rune(color: Rgba8) -> u32 {
    u32::from_be_bytes([color.r, color.g, color.b, color.a])
}

/// Unpacks a rune produced by [`color_to_rune`] back into an RGBA color.
pub fn color_from_rune(rune: u32) -> Rgba8 {
    let [r, g, b, a] = rune.to_be_bytes();
    Rgba8 { r, g, b, a }
}

/// A style descriptor for one span of text.
///
/// `Style` is a plain value: construct it with a struct literal over
/// [`Style::new`] and copy it freely. Once encoded into a span it is never
/// shared or mutated in place; restyling a span replaces the whole prefix.
///
/// ```
/// use rune_text::{Slant, Style, Weight};
///
/// let emphasis = Style {
///     weight: Weight::Bold,
///     slant: Slant::Italic,
///     ..Style::new()
/// };
/// assert_eq!(emphasis.size, 1.0);
/// ```
///
/// ## Encoding
///
/// A style encodes to a short prefix of sentinel runes placed before a span's
/// content runes:
///
/// - rune 0: bit-packed weight, slant, family, special role, decoration
///   flags, and color-presence flags, with the high bit set as a marker
///   (no Unicode scalar value has it);
/// - rune 1: the IEEE-754 bits of the size factor;
/// - one rune per present color (fill, then background), packed with
///   [`color_to_rune`];
/// - for [`Special::Link`]: the link target's rune count, then its runes.
///
/// [`Style::from_runes`] is the exact inverse of [`Style::to_runes`].
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Weight class.
    pub weight: Weight,
    /// Upright or italic.
    pub slant: Slant,
    /// Generic font family class.
    pub family: Family,
    /// Size factor relative to the surrounding text; `1.0` is unscaled.
    pub size: f32,
    /// Special role marker.
    pub special: Special,
    /// Decoration flags.
    pub decoration: Decoration,
    /// Fill (foreground) color, if any.
    pub fill: Option<Rgba8>,
    /// Background color, if any.
    pub background: Option<Rgba8>,
    /// Link target; encoded only when `special` is [`Special::Link`].
    pub link: Option<String>,
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

impl Style {
    /// Creates the default style: normal weight and slant, sans-serif,
    /// unscaled, no special role, no decorations, no colors.
    pub fn new() -> Self {
        Self {
            weight: Weight::Normal,
            slant: Slant::Normal,
            family: Family::SansSerif,
            size: 1.0,
            special: Special::None,
            decoration: Decoration::NONE,
            fill: None,
            background: None,
            link: None,
        }
    }

    /// Creates a [`Special::End`] marker style, terminating a special region.
    pub fn end() -> Self {
        Self {
            special: Special::End,
            ..Self::new()
        }
    }

    /// Encodes this style as a prefix of sentinel runes.
    pub fn to_runes(&self) -> Vec<u32> {
        let mut bits = STYLE_MARK;
        bits |= self.weight as u32;
        bits |= (self.slant as u32) << SLANT_SHIFT;
        bits |= (self.family as u32) << FAMILY_SHIFT;
        bits |= (self.special as u32) << SPECIAL_SHIFT;
        bits |= (self.decoration.0 as u32) << DECORATION_SHIFT;
        if self.fill.is_some() {
            bits |= FILL_BIT;
        }
        if self.background.is_some() {
            bits |= BACKGROUND_BIT;
        }

        let mut runes = Vec::with_capacity(4);
        runes.push(bits);
        runes.push(self.size.to_bits());
        if let Some(fill) = self.fill {
            runes.push(color_to_rune(fill));
        }
        if let Some(background) = self.background {
            runes.push(color_to_rune(background));
        }
        if self.special == Special::Link {
            let url = self.link.as_deref().unwrap_or("");
            let start = runes.len();
            runes.push(0);
            runes.extend(url.chars().map(|c| c as u32));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "a link target longer than u32::MAX runes is not representable"
            )]
            {
                runes[start] = (runes.len() - start - 1) as u32;
            }
        }
        runes
    }

    /// Decodes a style prefix from the start of a span's rune slice.
    ///
    /// Returns the decoded style and the number of prefix runes consumed.
    /// The slice may extend past the prefix into content runes.
    pub fn from_runes(runes: &[u32]) -> Result<(Self, usize), Error> {
        Self::decode(runes, None)
    }

    pub(crate) fn decode(runes: &[u32], span: Option<usize>) -> Result<(Self, usize), Error> {
        let [bits, size_bits, ..] = *runes else {
            return Err(Error::malformed(span, "truncated style prefix"));
        };
        if bits & STYLE_MARK == 0 {
            return Err(Error::malformed(span, "missing style marker"));
        }
        let weight = Weight::from_bits(bits & WEIGHT_MASK)
            .ok_or(Error::malformed(span, "invalid weight bits"))?;
        let slant = if bits & (1 << SLANT_SHIFT) != 0 {
            Slant::Italic
        } else {
            Slant::Normal
        };
        let family = Family::from_bits((bits >> FAMILY_SHIFT) & FAMILY_MASK)
            .ok_or(Error::malformed(span, "invalid family bits"))?;
        let special = Special::from_bits((bits >> SPECIAL_SHIFT) & SPECIAL_MASK)
            .ok_or(Error::malformed(span, "invalid special bits"))?;
        let decoration = Decoration::from_bits((bits >> DECORATION_SHIFT) & DECORATION_MASK);
        let size = f32::from_bits(size_bits);
        if !size.is_finite() {
            return Err(Error::malformed(span, "non-finite size"));
        }

        let mut at = 2;
        let mut next_color = |runes: &[u32]| -> Result<Rgba8, Error> {
            let rune = *runes
                .get(at)
                .ok_or(Error::malformed(span, "truncated color runes"))?;
            at += 1;
            Ok(color_from_rune(rune))
        };
        let fill = (bits & FILL_BIT != 0)
            .then(|| next_color(runes))
            .transpose()?;
        let background = (bits & BACKGROUND_BIT != 0)
            .then(|| next_color(runes))
            .transpose()?;

        let link = if special == Special::Link {
            let url_len = *runes
                .get(at)
                .ok_or(Error::malformed(span, "truncated link target"))? as usize;
            at += 1;
            let url_runes = runes
                .get(at..at + url_len)
                .ok_or(Error::malformed(span, "truncated link target"))?;
            at += url_len;
            let url: Option<String> = url_runes.iter().map(|&r| char::from_u32(r)).collect();
            Some(url.ok_or(Error::malformed(span, "link target is not valid text"))?)
        } else {
            None
        };

        Ok((
            Self {
                weight,
                slant,
                family,
                size,
                special,
                decoration,
                fill,
                background,
                link,
            },
            at,
        ))
    }

    /// Returns the number of prefix runes a span starting with `runes` carries.
    ///
    /// This is cheaper than [`Style::from_runes`] as it never materializes the
    /// link target.
    pub fn prefix_len(runes: &[u32]) -> Result<usize, Error> {
        let [bits, _size, ..] = *runes else {
            return Err(Error::malformed(None, "truncated style prefix"));
        };
        if bits & STYLE_MARK == 0 {
            return Err(Error::malformed(None, "missing style marker"));
        }
        let mut len = 2;
        len += (bits & FILL_BIT != 0) as usize;
        len += (bits & BACKGROUND_BIT != 0) as usize;
        if (bits >> SPECIAL_SHIFT) & SPECIAL_MASK == Special::Link as u32 {
            let url_len = *runes
                .get(len)
                .ok_or(Error::malformed(None, "truncated link target"))? as usize;
            len += 1 + url_len;
        }
        if len > runes.len() {
            return Err(Error::malformed(None, "truncated style prefix"));
        }
        Ok(len)
    }
}

impl fmt::Display for Style {
    /// Writes the non-default properties as a space-separated list, e.g.
    /// `1.50x bold italic link [https://example.com] fill-color`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.special == Special::End {
            return f.write_str("{end}");
        }
        let mut parts: Vec<String> = Vec::new();
        if self.size != 1.0 {
            parts.push(format!("{:.2}x", self.size));
        }
        if self.weight != Weight::Normal {
            parts.push(format!("{}", self.weight));
        }
        if self.slant == Slant::Italic {
            parts.push("italic".into());
        }
        if self.family != Family::SansSerif {
            parts.push(format!("{}", self.family));
        }
        match self.special {
            Special::None | Special::End => {}
            Special::Link => {
                parts.push(format!("link [{}]", self.link.as_deref().unwrap_or("")));
            }
            Special::Super => parts.push("super".into()),
            Special::Sub => parts.push("sub".into()),
            Special::MathInline => parts.push("math-inline".into()),
            Special::MathDisplay => parts.push("math-display".into()),
        }
        if self.decoration.contains(Decoration::UNDERLINE) {
            parts.push("underline".into());
        }
        if self.decoration.contains(Decoration::LINE_THROUGH) {
            parts.push("line-through".into());
        }
        if self.fill.is_some() {
            parts.push("fill-color".into());
        }
        if self.background.is_some() {
            parts.push("background".into());
        }
        f.write_str(&parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use alloc::string::ToString;

    #[test]
    fn color_round_trip() {
        let c = Rgba8 {
            r: 22,
            g: 55,
            b: 77,
            a: 255,
        };
        assert_eq!(color_from_rune(color_to_rune(c)), c);
        // Byte-boundary values.
        for v in [0x0000_0000, 0xFFFF_FFFF, 0x0102_03FF, 0x8000_0001] {
            assert_eq!(color_to_rune(color_from_rune(v)), v);
        }
    }

    #[test]
    fn style_round_trip() {
        let s = Style {
            family: Family::Math,
            special: Special::MathInline,
            background: Some(Rgba8 {
                r: 0,
                g: 0,
                b: 255,
                a: 255,
            }),
            ..Style::new()
        };
        let runes = s.to_runes();
        assert_eq!(runes.len(), 3);

        let (decoded, consumed) = Style::from_runes(&runes).unwrap();
        assert_eq!(consumed, runes.len());
        assert_eq!(decoded, s);
        assert_eq!(Style::prefix_len(&runes).unwrap(), runes.len());
    }

    #[test]
    fn link_round_trip() {
        let s = Style {
            slant: Slant::Italic,
            special: Special::Link,
            link: Some("https://example.com".to_string()),
            ..Style::new()
        };
        let runes = s.to_runes();
        // Base prefix + length rune + 19 URL runes.
        assert_eq!(runes.len(), 2 + 1 + 19);
        let (decoded, consumed) = Style::from_runes(&runes).unwrap();
        assert_eq!(consumed, runes.len());
        assert_eq!(decoded, s);
    }

    #[test]
    fn decode_rejects_missing_marker() {
        let err = Style::from_runes(&['a' as u32, 'b' as u32]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedSpanEncoding);
        assert_eq!(err.reason(), Some("missing style marker"));
    }

    #[test]
    fn decode_rejects_truncation() {
        let full = Style {
            fill: Some(Rgba8 {
                r: 1,
                g: 2,
                b: 3,
                a: 4,
            }),
            ..Style::new()
        }
        .to_runes();
        let err = Style::from_runes(&full[..2]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedSpanEncoding);
        assert_eq!(err.reason(), Some("truncated color runes"));

        let err = Style::from_runes(&full[..1]).unwrap_err();
        assert_eq!(err.reason(), Some("truncated style prefix"));
    }

    #[test]
    fn display_lists_non_default_properties() {
        let s = Style {
            weight: Weight::Bold,
            size: 1.5,
            ..Style::new()
        };
        assert_eq!(s.to_string(), "1.50x bold");
        assert_eq!(Style::new().to_string(), "");
        assert_eq!(Style::end().to_string(), "{end}");
    }
}
