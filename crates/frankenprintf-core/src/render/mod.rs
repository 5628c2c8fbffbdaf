//! Render driver.
//!
//! Validates arity, sizes the output with [`estimate`], allocates one zeroed
//! buffer, then interleaves literal segments with placeholder renderings and
//! truncates to the cursor. The buffer never grows.

pub(crate) mod float;
pub(crate) mod int;
pub(crate) mod text;

use std::io;

use crate::arg::{Arg, Operand, operand};
use crate::buf::put;
use crate::compile::Template;
use crate::error::{FormatError, WriteError};
use crate::estimate::estimate;
use crate::spec::PlaceholderSpec;

impl Template {
    /// Upper bound on the rendered length for `args`; the exact size of the
    /// buffer [`Template::render_bytes`] allocates.
    pub fn estimated_len(&self, args: &[Arg<'_>]) -> Result<usize, FormatError> {
        self.check_arity(args)?;
        checked_total(
            self.literal_len(),
            self.placeholders()
                .iter()
                .zip(args)
                .map(|(spec, arg)| estimate(spec, arg)),
        )
    }

    /// Render into freshly allocated bytes.
    pub fn render_bytes(&self, args: &[Arg<'_>]) -> Result<Vec<u8>, FormatError> {
        let capacity = self.estimated_len(args)?;
        let mut buf = vec![0u8; capacity];

        let mut pos = write_literal(&mut buf, 0, self.literal_bytes(0));
        for (index, (spec, arg)) in self.placeholders().iter().zip(args).enumerate() {
            let start = pos;
            pos = write_placeholder(&mut buf, pos, spec, arg);
            debug_assert!(
                pos - start <= estimate(spec, arg),
                "placeholder {index} ({spec}) wrote {} bytes, estimated {}",
                pos - start,
                estimate(spec, arg),
            );
            pos = write_literal(&mut buf, pos, self.literal_bytes(index + 1));
        }

        buf.truncate(pos);
        Ok(buf)
    }

    /// Render into a `String`.
    pub fn render(&self, args: &[Arg<'_>]) -> Result<String, FormatError> {
        let bytes = self.render_bytes(args)?;
        // Text comes from `str` and is only cut on char boundaries; generated
        // bytes are ASCII.
        let text = String::from_utf8(bytes);
        debug_assert!(text.is_ok(), "rendered bytes are not UTF-8: {text:?}");
        Ok(text.unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
    }

    /// Render and write the bytes to `writer`. Returns the byte count.
    pub fn render_to<W: io::Write>(
        &self,
        writer: &mut W,
        args: &[Arg<'_>],
    ) -> Result<usize, WriteError> {
        let bytes = self.render_bytes(args)?;
        writer.write_all(&bytes)?;
        Ok(bytes.len())
    }

    fn check_arity(&self, args: &[Arg<'_>]) -> Result<(), FormatError> {
        let expected = self.placeholder_count();
        if args.len() != expected {
            return Err(FormatError::ArityMismatch {
                expected,
                actual: args.len(),
            });
        }
        Ok(())
    }
}

/// Sum of the literal bytes and the per-placeholder bounds.
fn checked_total(
    literal: usize,
    bounds: impl IntoIterator<Item = usize>,
) -> Result<usize, FormatError> {
    bounds
        .into_iter()
        .try_fold(literal, usize::checked_add)
        .ok_or(FormatError::OutputTooLarge)
}

/// Copy a literal segment, collapsing each `%%` to `%`.
fn write_literal(buf: &mut [u8], mut pos: usize, literal: &[u8]) -> usize {
    let mut rest = literal;
    while let Some(at) = rest.iter().position(|&b| b == b'%') {
        // Segments only ever hold doubled '%'.
        pos = put(buf, pos, &rest[..=at]);
        rest = rest.get(at + 2..).unwrap_or_default();
    }
    put(buf, pos, rest)
}

fn write_placeholder(buf: &mut [u8], pos: usize, spec: &PlaceholderSpec, arg: &Arg<'_>) -> usize {
    match operand(spec.conversion, arg) {
        Operand::Int(value) => int::write_int(buf, pos, value, spec),
        Operand::Float(value, _) => float::write_float(buf, pos, value, spec),
        Operand::Char(c) => text::write_char(buf, pos, c, spec),
        Operand::Text(text) => text::write_text(buf, pos, text, spec),
        Operand::Pointer(addr) => int::write_pointer(buf, pos, addr, spec),
    }
}
