//! Template compiler.
//!
//! Scans a template once, left to right, and splits it into literal segments
//! (byte ranges into the source) and one [`PlaceholderSpec`] per directive.
//!
//! Grammar: `%[flags][width][.precision][length]conversion`
//!
//! - flags: any of `- + space 0 #`, any order, repeats allowed
//! - width, precision: literal decimal digits (`.` alone means precision 0)
//! - length: `h hh l ll L j q t z`, consumed and ignored since argument types
//!   are known at render time
//! - conversion: `d i u x X o e E f F g G a A c C s S p`
//!
//! `%%` stays inside the surrounding literal segment and renders as `%`.

use core::ops::Range;
use core::str::FromStr;

use crate::error::{FormatError, MalformedReason};
use crate::spec::{
    ConversionKind, DEFAULT_FLOAT_PRECISION, Family, Flags, FloatNotation, MAX_FIELD,
    POINTER_BYTES, PlaceholderSpec, Precision,
};

/// A compiled template: literal segments interleaved with placeholders.
///
/// Immutable once built; share it freely across threads and render calls.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Template {
    source: String,
    /// `placeholders.len() + 1` ranges into `source`.
    literals: Vec<Range<usize>>,
    placeholders: Vec<PlaceholderSpec>,
    /// Rendered length of all literal segments, `%%` counted once.
    literal_len: usize,
}

impl Template {
    /// Compile `text`.
    pub fn compile(text: &str) -> Result<Self, FormatError> {
        Self::new(text)
    }

    /// Compile an owned template string without copying it.
    pub fn new(text: impl Into<String>) -> Result<Self, FormatError> {
        let source = text.into();
        let scan = scan(&source)?;
        Ok(Self {
            source,
            literals: scan.literals,
            placeholders: scan.placeholders,
            literal_len: scan.literal_len,
        })
    }

    /// The template text this was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn placeholders(&self) -> &[PlaceholderSpec] {
        &self.placeholders
    }

    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }

    /// Literal segments as written in the source (`%%` not yet collapsed).
    pub fn literal_segments(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.literals.iter().map(|r| &self.source[r.clone()])
    }

    /// Bytes the literal segments contribute to every rendering.
    #[must_use]
    pub fn literal_len(&self) -> usize {
        self.literal_len
    }

    pub(crate) fn literal_bytes(&self, index: usize) -> &[u8] {
        &self.source.as_bytes()[self.literals[index].clone()]
    }
}

impl FromStr for Template {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl TryFrom<&str> for Template {
    type Error = FormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::compile(value)
    }
}

impl TryFrom<String> for Template {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

struct Scan {
    literals: Vec<Range<usize>>,
    placeholders: Vec<PlaceholderSpec>,
    literal_len: usize,
}

fn scan(text: &str) -> Result<Scan, FormatError> {
    let fmt = text.as_bytes();
    if fmt.is_empty() {
        return Err(FormatError::malformed(0, MalformedReason::EmptyTemplate));
    }
    let len = fmt.len();
    let mut out = Scan {
        literals: Vec::new(),
        placeholders: Vec::new(),
        literal_len: 0,
    };
    let mut pos = 0;
    let mut segment_start = 0;

    loop {
        // Literal run up to the next directive-opening '%'.
        let mut directive = None;
        while pos < len {
            if fmt[pos] == b'%' {
                if pos + 1 < len && fmt[pos + 1] == b'%' {
                    out.literal_len += 1;
                    pos += 2;
                    continue;
                }
                directive = Some(pos);
                break;
            }
            out.literal_len += 1;
            pos += 1;
        }

        let Some(at) = directive else {
            out.literals.push(segment_start..len);
            return Ok(out);
        };
        out.literals.push(segment_start..at);
        let (spec, next) = parse_directive(text, at + 1)?;
        out.placeholders.push(spec);
        pos = next;
        segment_start = next;
    }
}

/// Parse one directive. `pos` is the first byte after the opening `%`.
/// Returns the spec and the offset just past the conversion character.
fn parse_directive(text: &str, mut pos: usize) -> Result<(PlaceholderSpec, usize), FormatError> {
    let fmt = text.as_bytes();
    let len = fmt.len();

    // --- flags ---
    let mut flags = Flags::default();
    while pos < len {
        match fmt[pos] {
            b'-' => flags.left_align = true,
            b'+' => flags.force_sign = true,
            b' ' => flags.space_sign = true,
            b'0' => flags.zero_pad = true,
            b'#' => flags.alternate_form = true,
            _ => break,
        }
        pos += 1;
    }

    // --- width ---
    let start = pos;
    while pos < len && fmt[pos].is_ascii_digit() {
        pos += 1;
    }
    let width = parse_field(&fmt[start..pos], start)?;

    // --- precision ---
    let mut precision = Precision::None;
    if pos < len && fmt[pos] == b'.' {
        pos += 1;
        let start = pos;
        while pos < len && fmt[pos].is_ascii_digit() {
            pos += 1;
        }
        precision = Precision::Fixed(parse_field(&fmt[start..pos], start)?);
    }

    // --- length modifier (ignored) ---
    if pos < len {
        match fmt[pos] {
            first @ (b'h' | b'l') => {
                pos += 1;
                if pos < len && fmt[pos] == first {
                    pos += 1;
                }
                if pos < len && is_length_byte(fmt[pos]) {
                    return Err(FormatError::malformed(
                        pos,
                        MalformedReason::MismatchedLengthModifier,
                    ));
                }
            }
            b'L' | b'j' | b'q' | b't' | b'z' => pos += 1,
            _ => {}
        }
    }

    // --- conversion ---
    if pos >= len {
        return Err(FormatError::malformed(
            len,
            MalformedReason::TruncatedDirective,
        ));
    }
    let Some(conversion) = ConversionKind::from_byte(fmt[pos]) else {
        // Everything consumed so far is ASCII, so `pos` is a char boundary.
        let ch = text[pos..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
        return Err(FormatError::malformed(
            pos,
            MalformedReason::UnknownConversion(ch),
        ));
    };
    pos += 1;

    // Classic printf: '+' overrides ' ', '-' overrides '0'.
    if flags.force_sign {
        flags.space_sign = false;
    }
    if flags.left_align {
        flags.zero_pad = false;
    }

    let precision = match conversion.family() {
        Family::Integer(_) => {
            if matches!(precision, Precision::Fixed(p) if p > 0) {
                flags.zero_pad = false;
            }
            precision
        }
        // Hex floats without a precision print the shortest exact fraction.
        Family::Float(FloatNotation::Hex) => precision,
        Family::Float(_) => match precision {
            Precision::None => Precision::Fixed(DEFAULT_FLOAT_PRECISION),
            fixed => fixed,
        },
        // Addresses always print at full width.
        Family::Pointer => Precision::Fixed(2 * POINTER_BYTES),
        Family::Char | Family::Str => precision,
    };

    Ok((
        PlaceholderSpec {
            flags,
            width,
            precision,
            conversion,
        },
        pos,
    ))
}

fn is_length_byte(b: u8) -> bool {
    matches!(b, b'h' | b'l' | b'L' | b'j' | b'q' | b't' | b'z')
}

fn parse_field(digits: &[u8], at: usize) -> Result<usize, FormatError> {
    let mut result = 0_usize;
    for &d in digits {
        result = result
            .saturating_mul(10)
            .saturating_add(usize::from(d - b'0'));
    }
    if result > MAX_FIELD {
        return Err(FormatError::malformed(at, MalformedReason::FieldOverflow));
    }
    Ok(result)
}
