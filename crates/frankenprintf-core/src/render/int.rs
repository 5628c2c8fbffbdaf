//! Integer and pointer conversions.

use crate::arg::IntOperand;
use crate::buf::{fill, put};
use crate::spec::{ConversionKind, Family, Flags, IntRadix, PlaceholderSpec, Precision};

const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";
const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Enough for a `u64` in base 8 (22 digits).
const DIGIT_BUF: usize = 24;

/// Render an integer conversion (`d i u o x X`).
pub(crate) fn write_int(
    buf: &mut [u8],
    pos: usize,
    value: IntOperand,
    spec: &PlaceholderSpec,
) -> usize {
    let radix = match spec.conversion.family() {
        Family::Integer(radix) => radix,
        _ => IntRadix::Signed,
    };
    write_field(buf, pos, value, spec, radix, false)
}

/// Render `%p`: lowercase hex, `0x` prefix even for null, always zero-extended
/// to the full address width. An explicit precision is ignored.
pub(crate) fn write_pointer(buf: &mut [u8], pos: usize, addr: usize, spec: &PlaceholderSpec) -> usize {
    let hex = PlaceholderSpec {
        flags: Flags {
            alternate_form: true,
            zero_pad: false,
            ..spec.flags
        },
        width: spec.width,
        precision: Precision::Fixed(pointer_digits()),
        conversion: ConversionKind::HexLower,
    };
    let value = IntOperand {
        negative: false,
        magnitude: addr as u64,
    };
    write_field(buf, pos, value, &hex, IntRadix::Hex, true)
}

/// Hex digits in a full-width address.
pub(crate) const fn pointer_digits() -> usize {
    2 * crate::spec::POINTER_BYTES
}

/// Number of digits `value` needs in `base` (at least one).
pub(crate) fn digit_count(mut value: u64, base: u64) -> usize {
    let mut n = 1;
    while value >= base {
        value /= base;
        n += 1;
    }
    n
}

fn write_field(
    buf: &mut [u8],
    pos: usize,
    value: IntOperand,
    spec: &PlaceholderSpec,
    radix: IntRadix,
    always_prefix: bool,
) -> usize {
    let flags = spec.flags;
    let mut digits = [0u8; DIGIT_BUF];
    let (digit_slice, suppress_zero) = {
        let n = render_digits(value.magnitude, radix.base(), spec.conversion.is_upper(), &mut digits);
        // Explicit precision 0 with value 0 prints no digits.
        let suppress = value.magnitude == 0 && spec.precision == Precision::Fixed(0);
        (&digits[DIGIT_BUF - n..], suppress)
    };
    let digit_len = if suppress_zero { 0 } else { digit_slice.len() };

    let sign: &[u8] = match radix {
        IntRadix::Signed if value.negative => b"-",
        IntRadix::Signed if flags.force_sign => b"+",
        IntRadix::Signed if flags.space_sign => b" ",
        _ => b"",
    };

    let prefix: &[u8] = match radix {
        IntRadix::Hex if flags.alternate_form && (value.magnitude != 0 || always_prefix) => {
            if spec.conversion.is_upper() { b"0X" } else { b"0x" }
        }
        _ => b"",
    };

    let mut zero_fill = spec.precision.fixed().unwrap_or(0).saturating_sub(digit_len);
    // `%#o` guarantees the first digit is 0.
    if radix == IntRadix::Octal
        && flags.alternate_form
        && zero_fill == 0
        && (suppress_zero || digit_slice.first() != Some(&b'0'))
    {
        zero_fill = 1;
    }

    let content = sign.len() + prefix.len() + zero_fill + digit_len;
    let pad = spec.width.saturating_sub(content);

    let mut pos = pos;
    if !flags.left_align && !flags.zero_pad {
        pos = fill(buf, pos, b' ', pad);
    }
    pos = put(buf, pos, sign);
    pos = put(buf, pos, prefix);
    if !flags.left_align && flags.zero_pad {
        pos = fill(buf, pos, b'0', pad);
    }
    pos = fill(buf, pos, b'0', zero_fill);
    if !suppress_zero {
        pos = put(buf, pos, digit_slice);
    }
    if flags.left_align {
        pos = fill(buf, pos, b' ', pad);
    }
    pos
}

/// Render `value` in `base` into the END of `out`, most significant digit
/// first. Returns the number of digits written.
fn render_digits(mut value: u64, base: u64, uppercase: bool, out: &mut [u8; DIGIT_BUF]) -> usize {
    let table = if uppercase { UPPER_DIGITS } else { LOWER_DIGITS };
    let mut at = DIGIT_BUF;
    loop {
        at -= 1;
        out[at] = table[(value % base) as usize];
        value /= base;
        if value == 0 {
            break;
        }
    }
    DIGIT_BUF - at
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_spec(conversion: ConversionKind) -> PlaceholderSpec {
        PlaceholderSpec::new(conversion)
    }

    fn render(value: i64, spec: &PlaceholderSpec) -> String {
        let operand = IntOperand {
            negative: value < 0,
            magnitude: value.unsigned_abs(),
        };
        let mut buf = [0u8; 64];
        let end = write_int(&mut buf, 0, operand, spec);
        String::from_utf8(buf[..end].to_vec()).unwrap()
    }

    #[test]
    fn test_format_signed_basic() {
        let spec = int_spec(ConversionKind::SignedDecimal);
        assert_eq!(render(42, &spec), "42");
        assert_eq!(render(-123, &spec), "-123");
        assert_eq!(render(0, &spec), "0");
    }

    #[test]
    fn test_format_signed_width_pad() {
        let spec = PlaceholderSpec {
            width: 5,
            ..int_spec(ConversionKind::SignedDecimal)
        };
        assert_eq!(render(42, &spec), "   42");
    }

    #[test]
    fn test_format_signed_left_justify() {
        let spec = PlaceholderSpec {
            flags: Flags {
                left_align: true,
                ..Flags::default()
            },
            width: 5,
            ..int_spec(ConversionKind::SignedDecimal)
        };
        assert_eq!(render(42, &spec), "42   ");
    }

    #[test]
    fn test_format_signed_zero_pad() {
        let spec = PlaceholderSpec {
            flags: Flags {
                zero_pad: true,
                ..Flags::default()
            },
            width: 5,
            ..int_spec(ConversionKind::SignedDecimal)
        };
        assert_eq!(render(-3, &spec), "-0003");
        assert_eq!(render(42, &spec), "00042");
    }

    #[test]
    fn test_precision_fills_digits() {
        let spec = PlaceholderSpec {
            precision: Precision::Fixed(5),
            ..int_spec(ConversionKind::SignedDecimal)
        };
        assert_eq!(render(3, &spec), "00003");
        let spec = PlaceholderSpec { width: 8, ..spec };
        assert_eq!(render(3, &spec), "   00003");
        assert_eq!(render(-3, &spec), "  -00003");
    }

    #[test]
    fn test_precision_zero_int() {
        let spec = PlaceholderSpec {
            precision: Precision::Fixed(0),
            width: 3,
            ..int_spec(ConversionKind::SignedDecimal)
        };
        assert_eq!(render(0, &spec), "   ");
        assert_eq!(render(7, &spec), "  7");
    }

    #[test]
    fn test_force_and_space_sign() {
        let plus = PlaceholderSpec {
            flags: Flags {
                force_sign: true,
                ..Flags::default()
            },
            ..int_spec(ConversionKind::SignedDecimal)
        };
        assert_eq!(render(5, &plus), "+5");
        assert_eq!(render(0, &plus), "+0");
        let space = PlaceholderSpec {
            flags: Flags {
                space_sign: true,
                ..Flags::default()
            },
            ..int_spec(ConversionKind::SignedDecimal)
        };
        assert_eq!(render(5, &space), " 5");
        assert_eq!(render(-5, &space), "-5");
    }

    #[test]
    fn test_sign_flags_ignored_for_unsigned() {
        let spec = PlaceholderSpec {
            flags: Flags {
                force_sign: true,
                ..Flags::default()
            },
            ..int_spec(ConversionKind::UnsignedDecimal)
        };
        assert_eq!(render(5, &spec), "5");
    }

    #[test]
    fn test_i64_min() {
        let spec = int_spec(ConversionKind::SignedDecimal);
        assert_eq!(render(i64::MIN, &spec), "-9223372036854775808");
    }

    #[test]
    fn test_format_unsigned_hex() {
        let alt = Flags {
            alternate_form: true,
            ..Flags::default()
        };
        let lower = PlaceholderSpec {
            flags: alt,
            ..int_spec(ConversionKind::HexLower)
        };
        assert_eq!(render(255, &lower), "0xff");
        assert_eq!(render(0, &lower), "0");
        let upper = PlaceholderSpec {
            flags: alt,
            ..int_spec(ConversionKind::HexUpper)
        };
        assert_eq!(render(255, &upper), "0XFF");
        let zero_padded = PlaceholderSpec {
            flags: Flags {
                zero_pad: true,
                ..alt
            },
            width: 8,
            ..int_spec(ConversionKind::HexLower)
        };
        assert_eq!(render(0xbeef, &zero_padded), "0x00beef");
    }

    #[test]
    fn test_format_unsigned_octal() {
        let spec = PlaceholderSpec {
            flags: Flags {
                alternate_form: true,
                ..Flags::default()
            },
            ..int_spec(ConversionKind::Octal)
        };
        assert_eq!(render(8, &spec), "010");
        assert_eq!(render(0, &spec), "0");
        let with_precision = PlaceholderSpec {
            precision: Precision::Fixed(4),
            ..spec
        };
        assert_eq!(render(8, &with_precision), "0010");
        let empty = PlaceholderSpec {
            precision: Precision::Fixed(0),
            ..spec
        };
        assert_eq!(render(0, &empty), "0");
        assert_eq!(render(8, &int_spec(ConversionKind::Octal)), "10");
    }

    #[test]
    fn test_unsigned_max() {
        let spec = int_spec(ConversionKind::Octal);
        let operand = IntOperand {
            negative: false,
            magnitude: u64::MAX,
        };
        let mut buf = [0u8; 32];
        let end = write_int(&mut buf, 0, operand, &spec);
        assert_eq!(&buf[..end], b"1777777777777777777777");
    }

    #[test]
    fn test_format_pointer() {
        let spec = PlaceholderSpec::new(ConversionKind::Pointer);
        let mut buf = [0u8; 40];
        let end = write_pointer(&mut buf, 0, 0, &spec);
        let expected = format!("0x{}", "0".repeat(pointer_digits()));
        assert_eq!(&buf[..end], expected.as_bytes());

        let end = write_pointer(&mut buf, 0, 0x1000, &spec);
        let expected = format!("0x{:0width$x}", 0x1000, width = pointer_digits());
        assert_eq!(&buf[..end], expected.as_bytes());
    }

    #[test]
    fn test_pointer_ignores_explicit_precision() {
        let mut buf = [0u8; 40];
        for precision in [0, 4] {
            let spec = PlaceholderSpec {
                precision: Precision::Fixed(precision),
                ..PlaceholderSpec::new(ConversionKind::Pointer)
            };
            let end = write_pointer(&mut buf, 0, 0, &spec);
            let expected = format!("0x{}", "0".repeat(pointer_digits()));
            assert_eq!(&buf[..end], expected.as_bytes());

            let end = write_pointer(&mut buf, 0, 0x1000, &spec);
            let expected = format!("0x{:0width$x}", 0x1000, width = pointer_digits());
            assert_eq!(&buf[..end], expected.as_bytes());
        }
    }

    #[test]
    fn test_pointer_width_pads_with_spaces() {
        let spec = PlaceholderSpec {
            flags: Flags {
                left_align: true,
                ..Flags::default()
            },
            width: pointer_digits() + 4,
            ..PlaceholderSpec::new(ConversionKind::Pointer)
        };
        let mut buf = [0u8; 40];
        let end = write_pointer(&mut buf, 0, 0xab, &spec);
        let text = std::str::from_utf8(&buf[..end]).unwrap();
        assert!(text.starts_with("0x"));
        assert!(text.ends_with("ab  "));
        assert_eq!(text.len(), pointer_digits() + 4);
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0, 10), 1);
        assert_eq!(digit_count(9, 10), 1);
        assert_eq!(digit_count(10, 10), 2);
        assert_eq!(digit_count(u64::MAX, 8), 22);
        assert_eq!(digit_count(u64::MAX, 16), 16);
        assert_eq!(digit_count(u64::MAX, 10), 20);
    }
}
