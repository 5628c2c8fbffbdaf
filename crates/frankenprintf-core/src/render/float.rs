//! Float conversions (`f F e E g G a A`).
//!
//! The decimal primitive writes the unpadded rendering in place; width is
//! applied afterwards by shifting it right inside the buffer.

use crate::buf::{pad_field, put};
use crate::decimal::{parse_exponent, write_exp, write_fixed, write_hex, write_sign};
use crate::spec::{DEFAULT_FLOAT_PRECISION, Family, FloatNotation, PlaceholderSpec};

const DECIMAL_POINT: u8 = b'.';

pub(crate) fn write_float(buf: &mut [u8], pos: usize, value: f64, spec: &PlaceholderSpec) -> usize {
    let flags = spec.flags;
    let upper = spec.conversion.is_upper();
    let notation = match spec.conversion.family() {
        Family::Float(notation) => notation,
        _ => FloatNotation::Fixed,
    };

    if !value.is_finite() {
        return write_non_finite(buf, pos, value, spec);
    }

    let precision = spec.precision.fixed();
    let end = match notation {
        FloatNotation::Fixed => write_fixed(
            buf,
            pos,
            value,
            flags.force_sign,
            flags.space_sign,
            flags.alternate_form,
            precision.unwrap_or(DEFAULT_FLOAT_PRECISION),
            DECIMAL_POINT,
        ),
        FloatNotation::Exponent => write_exp(
            buf,
            pos,
            value,
            flags.force_sign,
            flags.space_sign,
            flags.alternate_form,
            precision.unwrap_or(DEFAULT_FLOAT_PRECISION),
            if upper { b'E' } else { b'e' },
            DECIMAL_POINT,
        ),
        FloatNotation::General => write_general(
            buf,
            pos,
            value,
            spec,
            precision.unwrap_or(DEFAULT_FLOAT_PRECISION),
        ),
        FloatNotation::Hex => write_hex(
            buf,
            pos,
            value,
            flags.force_sign,
            flags.space_sign,
            flags.alternate_form,
            precision,
            upper,
        ),
    };

    let zeros_at = flags.zero_pad.then(|| {
        let signed = value.is_sign_negative() || flags.force_sign || flags.space_sign;
        let radix_prefix = if notation == FloatNotation::Hex { 2 } else { 0 };
        pos + usize::from(signed) + radix_prefix
    });
    pad_field(buf, pos, end, spec.width, flags.left_align, zeros_at)
}

/// `%g`: the shorter of `%e` and `%f` at `precision` significant digits.
fn write_general(
    buf: &mut [u8],
    pos: usize,
    value: f64,
    spec: &PlaceholderSpec,
    precision: usize,
) -> usize {
    let flags = spec.flags;
    let p = precision.max(1);
    let exponent_char = if spec.conversion.is_upper() { b'E' } else { b'e' };

    // Exponential form first: its exponent is the one after rounding to
    // `p` significant digits.
    let end = write_exp(
        buf,
        pos,
        value,
        flags.force_sign,
        flags.space_sign,
        flags.alternate_form,
        p - 1,
        exponent_char,
        DECIMAL_POINT,
    );
    let e_at = buf[pos..end]
        .iter()
        .rposition(|&b| b == exponent_char)
        .map_or(end, |i| pos + i);
    let x = i64::from(parse_exponent(&buf[e_at..end]));

    if x < -4 || x >= p as i64 {
        if flags.alternate_form {
            return end;
        }
        let mantissa_end = trim_fraction(buf, pos, e_at);
        let exponent_len = end - e_at;
        buf.copy_within(e_at..end, mantissa_end);
        return mantissa_end + exponent_len;
    }

    let fraction_digits = (p as i64 - 1 - x) as usize;
    let end = write_fixed(
        buf,
        pos,
        value,
        flags.force_sign,
        flags.space_sign,
        flags.alternate_form,
        fraction_digits,
        DECIMAL_POINT,
    );
    if flags.alternate_form {
        end
    } else {
        trim_fraction(buf, pos, end)
    }
}

/// Drop trailing fractional zeros, and the decimal point if nothing is left
/// after it. Returns the new end.
fn trim_fraction(buf: &[u8], start: usize, end: usize) -> usize {
    let Some(dot) = buf[start..end].iter().position(|&b| b == DECIMAL_POINT) else {
        return end;
    };
    let dot = start + dot;
    let mut end = end;
    while end > dot + 1 && buf[end - 1] == b'0' {
        end -= 1;
    }
    if end == dot + 1 {
        end = dot;
    }
    end
}

/// `inf`/`nan` with sign rules; padded with spaces only.
fn write_non_finite(buf: &mut [u8], pos: usize, value: f64, spec: &PlaceholderSpec) -> usize {
    let flags = spec.flags;
    let upper = spec.conversion.is_upper();
    let text: &[u8] = match (value.is_nan(), upper) {
        (true, false) => b"nan",
        (true, true) => b"NAN",
        (false, false) => b"inf",
        (false, true) => b"INF",
    };
    let end = write_sign(
        buf,
        pos,
        value.is_sign_negative(),
        flags.force_sign,
        flags.space_sign,
    );
    let end = put(buf, end, text);
    pad_field(buf, pos, end, spec.width, flags.left_align, None)
}
