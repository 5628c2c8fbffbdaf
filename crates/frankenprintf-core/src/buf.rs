//! Bounds-checked writes into the pre-sized render buffer.
//!
//! Every helper takes the write offset and returns the next one. Indexing is
//! checked, so an estimate that came up short panics instead of corrupting
//! memory.

use core::fmt;

#[inline]
pub(crate) fn put(buf: &mut [u8], pos: usize, bytes: &[u8]) -> usize {
    let end = pos + bytes.len();
    buf[pos..end].copy_from_slice(bytes);
    end
}

#[inline]
pub(crate) fn fill(buf: &mut [u8], pos: usize, byte: u8, count: usize) -> usize {
    let end = pos + count;
    buf[pos..end].fill(byte);
    end
}

/// Pad the already-written field `buf[start..end]` out to `width`.
///
/// Left-aligned fields get trailing spaces. Otherwise the field moves right
/// by the pad count: with `zeros_at` set, only `buf[zeros_at..end]` moves and
/// the gap is filled with `'0'` (so a sign before `zeros_at` stays in front);
/// without it the whole field moves and the gap is filled with spaces.
pub(crate) fn pad_field(
    buf: &mut [u8],
    start: usize,
    end: usize,
    width: usize,
    left_align: bool,
    zeros_at: Option<usize>,
) -> usize {
    let written = end - start;
    if written >= width {
        return end;
    }
    let pad = width - written;
    if left_align {
        return fill(buf, end, b' ', pad);
    }
    let (gap, byte) = match zeros_at {
        Some(at) => (at, b'0'),
        None => (start, b' '),
    };
    // Source and destination overlap whenever the field is longer than `pad`.
    buf.copy_within(gap..end, gap + pad);
    fill(buf, gap, byte, pad);
    end + pad
}

/// Longest prefix of `s` that fits in `limit` bytes without splitting a
/// UTF-8 sequence.
pub(crate) fn clip(s: &str, limit: usize) -> &str {
    if limit >= s.len() {
        return s;
    }
    let mut at = limit;
    while !s.is_char_boundary(at) {
        at -= 1;
    }
    &s[..at]
}

/// `fmt::Write` adapter writing straight into the render buffer, optionally
/// stopping after a byte budget.
pub(crate) struct SliceWriter<'b> {
    buf: &'b mut [u8],
    pos: usize,
    bytes_left: usize,
}

impl<'b> SliceWriter<'b> {
    pub(crate) fn new(buf: &'b mut [u8], pos: usize) -> Self {
        Self {
            buf,
            pos,
            bytes_left: usize::MAX,
        }
    }

    pub(crate) fn with_byte_limit(mut self, limit: usize) -> Self {
        self.bytes_left = limit;
        self
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }
}

/// Charge `s` against `bytes_left`. A cut ends the text: later chunks are
/// dropped even if a shorter character would still fit.
fn take<'s>(s: &'s str, bytes_left: &mut usize) -> &'s str {
    let head = clip(s, *bytes_left);
    *bytes_left = if head.len() < s.len() {
        0
    } else {
        *bytes_left - head.len()
    };
    head
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let head = take(s, &mut self.bytes_left);
        self.pos = put(self.buf, self.pos, head.as_bytes());
        Ok(())
    }
}

/// `fmt::Write` sink that only counts what a `SliceWriter` with the same
/// limit would write.
pub(crate) struct Measure {
    pub bytes: usize,
    bytes_left: usize,
}

impl Measure {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            bytes: 0,
            bytes_left: limit,
        }
    }
}

impl fmt::Write for Measure {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.bytes += take(s, &mut self.bytes_left).len();
        Ok(())
    }
}
