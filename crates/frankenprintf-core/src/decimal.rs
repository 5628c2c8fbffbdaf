//! Float digit generation.
//!
//! The primitive the float renderer delegates to: each writer emits sign,
//! digits, decimal point and exponent for one value, unpadded, starting at
//! `pos`, and returns the next offset. Decimal digits come from `core::fmt`,
//! which rounds the exact binary value correctly (ties to even), so
//! `%.2f` of `2.675` is `2.67` as in C.
//!
//! Callers handle non-finite values before reaching these writers.

use core::fmt::Write as _;

use crate::buf::{SliceWriter, put};

/// Hex digits of the 52-bit f64 fraction.
const FRACTION_NIBBLES: usize = 13;
const FRACTION_BITS: u32 = 52;

const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";
const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Write the sign character, if any.
pub(crate) fn write_sign(
    buf: &mut [u8],
    pos: usize,
    negative: bool,
    force_sign: bool,
    space_sign: bool,
) -> usize {
    if negative {
        put(buf, pos, b"-")
    } else if force_sign {
        put(buf, pos, b"+")
    } else if space_sign {
        put(buf, pos, b" ")
    } else {
        pos
    }
}

/// Fixed notation: `[-]ddd.ddd` with `precision` fractional digits.
#[allow(clippy::too_many_arguments)]
pub fn write_fixed(
    buf: &mut [u8],
    pos: usize,
    value: f64,
    force_sign: bool,
    space_sign: bool,
    alternate_form: bool,
    precision: usize,
    decimal_point: u8,
) -> usize {
    let digits_at = write_sign(buf, pos, value.is_sign_negative(), force_sign, space_sign);
    let mut w = SliceWriter::new(buf, digits_at);
    // SliceWriter never fails; a short buffer panics on the slice index.
    let _ = write!(w, "{:.*}", precision, value.abs());
    let mut end = w.position();
    if precision == 0 {
        if alternate_form {
            end = put(buf, end, &[decimal_point]);
        }
    } else if decimal_point != b'.' {
        replace_point(&mut buf[digits_at..end], decimal_point);
    }
    end
}

/// Exponential notation: `[-]d.ddde±dd` with `precision` fractional digits
/// and at least two exponent digits.
#[allow(clippy::too_many_arguments)]
pub fn write_exp(
    buf: &mut [u8],
    pos: usize,
    value: f64,
    force_sign: bool,
    space_sign: bool,
    alternate_form: bool,
    precision: usize,
    exponent_char: u8,
    decimal_point: u8,
) -> usize {
    let digits_at = write_sign(buf, pos, value.is_sign_negative(), force_sign, space_sign);
    let mut w = SliceWriter::new(buf, digits_at);
    let _ = write!(w, "{:.*e}", precision, value.abs());
    let end = w.position();

    // core::fmt spells the exponent `e3` / `e-7`; rewrite it C style.
    let e_at = buf[digits_at..end]
        .iter()
        .rposition(|&b| b == b'e')
        .map_or(end, |i| digits_at + i);
    let exponent = parse_exponent(&buf[e_at..end]);
    if precision > 0 && decimal_point != b'.' {
        replace_point(&mut buf[digits_at..e_at], decimal_point);
    }

    let mut pos = e_at;
    if precision == 0 && alternate_form {
        pos = put(buf, pos, &[decimal_point]);
    }
    write_exponent(buf, pos, exponent_char, exponent, 2)
}

/// Hexadecimal notation (`%a`): `[-]0xh.hhhp±d`.
///
/// With `precision` unset the fraction has as many digits as needed to be
/// exact. Otherwise it is rounded half-to-even to `precision` digits; a carry
/// out of the fraction bumps the leading digit (`0x1.f8p+0` at precision 1
/// becomes `0x2.0p+0`), as glibc does.
#[allow(clippy::too_many_arguments)]
pub fn write_hex(
    buf: &mut [u8],
    pos: usize,
    value: f64,
    force_sign: bool,
    space_sign: bool,
    alternate_form: bool,
    precision: Option<usize>,
    upper: bool,
) -> usize {
    let table = if upper { UPPER_DIGITS } else { LOWER_DIGITS };
    let bits = value.to_bits();
    let biased = ((bits >> FRACTION_BITS) & 0x7ff) as i32;
    let mut fraction = bits & ((1_u64 << FRACTION_BITS) - 1);

    let (mut lead, exponent) = match (biased, fraction) {
        (0, 0) => (0_u64, 0),
        (0, _) => (0, -1022),
        _ => (1, biased - 1023),
    };

    let digits = match precision {
        None => {
            if fraction == 0 {
                0
            } else {
                FRACTION_NIBBLES - (fraction.trailing_zeros() / 4) as usize
            }
        }
        Some(p) if p < FRACTION_NIBBLES => {
            let shift = 4 * (FRACTION_NIBBLES - p) as u32;
            let rest = fraction & ((1_u64 << shift) - 1);
            let half = 1_u64 << (shift - 1);
            fraction >>= shift;
            let odd = if p == 0 { lead & 1 == 1 } else { fraction & 1 == 1 };
            if rest > half || (rest == half && odd) {
                fraction += 1;
                if fraction >> (4 * p) != 0 {
                    fraction &= (1_u64 << (4 * p)) - 1;
                    lead += 1;
                }
            }
            p
        }
        Some(p) => p,
    };

    let mut pos = write_sign(buf, pos, value.is_sign_negative(), force_sign, space_sign);
    pos = put(buf, pos, if upper { b"0X" } else { b"0x" });
    pos = put(buf, pos, &[table[lead as usize]]);
    if digits > 0 || alternate_form {
        pos = put(buf, pos, b".");
    }
    // Nibbles of the (possibly rounded) fraction, most significant first.
    let kept = digits.min(FRACTION_NIBBLES);
    let kept_bits = if precision.is_some_and(|p| p < FRACTION_NIBBLES) {
        4 * kept
    } else {
        4 * FRACTION_NIBBLES
    };
    for i in 0..kept {
        let shift = kept_bits - 4 * (i + 1);
        pos = put(buf, pos, &[table[((fraction >> shift) & 0xf) as usize]]);
    }
    for _ in kept..digits {
        pos = put(buf, pos, b"0");
    }
    write_exponent(buf, pos, if upper { b'P' } else { b'p' }, exponent, 1)
}

/// Decimal exponent of an exponential rendering (`…e-07`, `…E+12`, `…e3`).
pub(crate) fn parse_exponent(tail: &[u8]) -> i32 {
    let mut negative = false;
    let mut value = 0_i32;
    for &b in tail {
        match b {
            b'-' => negative = true,
            b'0'..=b'9' => value = value * 10 + i32::from(b - b'0'),
            _ => {}
        }
    }
    if negative { -value } else { value }
}

fn write_exponent(buf: &mut [u8], pos: usize, marker: u8, exponent: i32, min_digits: usize) -> usize {
    let sign = if exponent < 0 { b'-' } else { b'+' };
    let mut pos = put(buf, pos, &[marker, sign]);
    let mut digits = [0u8; 10];
    let mut n = exponent.unsigned_abs();
    let mut count = 0;
    loop {
        digits[digits.len() - 1 - count] = b'0' + (n % 10) as u8;
        count += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    while count < min_digits {
        digits[digits.len() - 1 - count] = b'0';
        count += 1;
    }
    pos = put(buf, pos, &digits[digits.len() - count..]);
    pos
}

fn replace_point(digits: &mut [u8], decimal_point: u8) {
    if let Some(dot) = digits.iter_mut().find(|b| **b == b'.') {
        *dot = decimal_point;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(value: f64, precision: usize) -> String {
        let mut buf = [0u8; 400];
        let end = write_fixed(&mut buf, 0, value, false, false, false, precision, b'.');
        String::from_utf8(buf[..end].to_vec()).unwrap()
    }

    fn exp(value: f64, precision: usize) -> String {
        let mut buf = [0u8; 400];
        let end = write_exp(&mut buf, 0, value, false, false, false, precision, b'e', b'.');
        String::from_utf8(buf[..end].to_vec()).unwrap()
    }

    fn hex(value: f64, precision: Option<usize>) -> String {
        let mut buf = [0u8; 64];
        let end = write_hex(&mut buf, 0, value, false, false, false, precision, false);
        String::from_utf8(buf[..end].to_vec()).unwrap()
    }

    #[test]
    fn test_fixed_basic() {
        assert_eq!(fixed(3.14159, 2), "3.14");
        assert_eq!(fixed(1.0, 6), "1.000000");
        assert_eq!(fixed(-0.5, 3), "-0.500");
        assert_eq!(fixed(42.0, 0), "42");
    }

    #[test]
    fn test_fixed_negative_zero_keeps_sign() {
        assert_eq!(fixed(-0.0, 1), "-0.0");
    }

    #[test]
    fn test_fixed_largest_double() {
        let s = fixed(f64::MAX, 0);
        assert_eq!(s.len(), 309);
        assert!(s.starts_with("17976931348623157"));
    }

    #[test]
    fn test_fixed_flags_and_point() {
        let mut buf = [0u8; 32];
        let end = write_fixed(&mut buf, 0, 2.5, true, false, false, 1, b',');
        assert_eq!(&buf[..end], b"+2,5");
        let end = write_fixed(&mut buf, 0, 7.0, false, true, true, 0, b'.');
        assert_eq!(&buf[..end], b" 7.");
    }

    #[test]
    fn test_exp_rewrites_exponent() {
        assert_eq!(exp(1234.5, 2), "1.23e+03");
        assert_eq!(exp(0.000123, 1), "1.2e-04");
        assert_eq!(exp(0.0, 6), "0.000000e+00");
        assert_eq!(exp(1e300, 0), "1e+300");
        assert_eq!(exp(5e-324, 2), "4.94e-324");
    }

    #[test]
    fn test_exp_alternate_form_and_point() {
        let mut buf = [0u8; 32];
        let end = write_exp(&mut buf, 0, 3.0, false, false, true, 0, b'E', b'.');
        assert_eq!(&buf[..end], b"3.E+00");
        let end = write_exp(&mut buf, 0, -1.5, false, false, false, 1, b'e', b',');
        assert_eq!(&buf[..end], b"-1,5e+00");
    }

    #[test]
    fn test_hex_shortest() {
        assert_eq!(hex(1.0, None), "0x1p+0");
        assert_eq!(hex(0.5, None), "0x1p-1");
        assert_eq!(hex(10.0, None), "0x1.4p+3");
        assert_eq!(hex(0.0, None), "0x0p+0");
        assert_eq!(hex(-2.0, None), "-0x1p+1");
        assert_eq!(hex(f64::MAX, None), "0x1.fffffffffffffp+1023");
        assert_eq!(hex(5e-324, None), "0x0.0000000000001p-1022");
    }

    #[test]
    fn test_hex_precision_rounds() {
        assert_eq!(hex(1.0, Some(3)), "0x1.000p+0");
        assert_eq!(hex(1.5, Some(0)), "0x2p+0");
        assert_eq!(hex(1.96875, Some(1)), "0x2.0p+0"); // 0x1.f8p+0
        assert_eq!(hex(1.0 + 1.0 / 32.0, Some(1)), "0x1.0p+0"); // tie, even
        assert_eq!(hex(1.0 + 3.0 / 32.0, Some(1)), "0x1.2p+0"); // tie, odd
        assert_eq!(hex(1.0, Some(15)), "0x1.000000000000000p+0");
    }

    #[test]
    fn test_hex_upper_and_alt() {
        let mut buf = [0u8; 32];
        let end = write_hex(&mut buf, 0, 255.0, true, false, true, None, true);
        assert_eq!(&buf[..end], b"+0X1.FEP+7");
        let end = write_hex(&mut buf, 0, 1.0, false, false, true, None, false);
        assert_eq!(&buf[..end], b"0x1.p+0");
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse_exponent(b"e-07"), -7);
        assert_eq!(parse_exponent(b"E+12"), 12);
        assert_eq!(parse_exponent(b"e3"), 3);
    }
}
