//! String and character conversions.
//!
//! Width and precision count UTF-8 bytes. A precision cut never splits a
//! character: it backs up to the previous boundary.

use core::fmt::Write as _;

use crate::arg::TextOperand;
use crate::buf::{Measure, SliceWriter, clip, fill, put};
use crate::spec::PlaceholderSpec;

pub(crate) fn write_text(
    buf: &mut [u8],
    pos: usize,
    text: TextOperand<'_>,
    spec: &PlaceholderSpec,
) -> usize {
    let limit = spec.precision.fixed().unwrap_or(usize::MAX);
    match text {
        TextOperand::Str(s) => {
            let head = clip(s, limit);
            let pad = spec.width.saturating_sub(head.len());
            let mut pos = pos;
            if !spec.flags.left_align {
                pos = fill(buf, pos, b' ', pad);
            }
            pos = put(buf, pos, head.as_bytes());
            if spec.flags.left_align {
                pos = fill(buf, pos, b' ', pad);
            }
            pos
        }
        TextOperand::Display(value) => {
            let mut measure = Measure::new(limit);
            let _ = write!(measure, "{value}");
            let pad = spec.width.saturating_sub(measure.bytes);
            let mut pos = pos;
            if !spec.flags.left_align {
                pos = fill(buf, pos, b' ', pad);
            }
            let mut w = SliceWriter::new(buf, pos).with_byte_limit(limit);
            let _ = write!(w, "{value}");
            pos = w.position();
            if spec.flags.left_align {
                pos = fill(buf, pos, b' ', pad);
            }
            pos
        }
    }
}

/// Exact byte length [`write_text`] produces.
pub(crate) fn text_len(text: TextOperand<'_>, spec: &PlaceholderSpec) -> usize {
    let limit = spec.precision.fixed().unwrap_or(usize::MAX);
    let bytes = match text {
        TextOperand::Str(s) => clip(s, limit).len(),
        TextOperand::Display(value) => {
            let mut measure = Measure::new(limit);
            let _ = write!(measure, "{value}");
            measure.bytes
        }
    };
    spec.width.max(bytes)
}

/// One character, padded with spaces. Precision does not apply.
pub(crate) fn write_char(buf: &mut [u8], pos: usize, c: char, spec: &PlaceholderSpec) -> usize {
    let mut encoded = [0u8; 4];
    let bytes = c.encode_utf8(&mut encoded).as_bytes();
    let pad = spec.width.saturating_sub(bytes.len());
    let mut pos = pos;
    if !spec.flags.left_align {
        pos = fill(buf, pos, b' ', pad);
    }
    pos = put(buf, pos, bytes);
    if spec.flags.left_align {
        pos = fill(buf, pos, b' ', pad);
    }
    pos
}
