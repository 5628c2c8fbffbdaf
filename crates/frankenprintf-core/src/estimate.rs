//! Upper bounds on rendered length.
//!
//! [`estimate`] never under-counts what the renderer writes for the same
//! spec and argument. The driver sums these bounds, allocates once, and
//! never grows the buffer.

use crate::arg::{Arg, FloatWidth, Operand, operand};
use crate::render::int::{digit_count, pointer_digits};
use crate::render::text::text_len;
use crate::spec::{DEFAULT_FLOAT_PRECISION, Family, IntRadix, PlaceholderSpec};

/// Worst-case float rendering beyond its precision for an `f32`: sign,
/// 39 integer digits, decimal point, and exponent, with room to spare.
pub const F32_WORST_LEN: usize = 48;

/// Worst-case float rendering beyond its precision for an `f64`: sign,
/// 309 integer digits (`%f` of `f64::MAX`), decimal point, and exponent.
pub const F64_WORST_LEN: usize = 328;

/// Budget for a sign character.
const SIGN_LEN: usize = 1;
/// Budget for an alternate-form prefix (`0x`, or octal's leading `0`).
const PREFIX_LEN: usize = 2;

/// Safe upper bound on the bytes `spec` renders for `arg`.
#[must_use]
pub fn estimate(spec: &PlaceholderSpec, arg: &Arg<'_>) -> usize {
    match operand(spec.conversion, arg) {
        Operand::Int(value) => {
            let base = match spec.conversion.family() {
                Family::Integer(radix) => radix.base(),
                _ => IntRadix::Signed.base(),
            };
            let digits = digit_count(value.magnitude, base);
            let body = spec.precision.fixed().unwrap_or(0).max(digits);
            spec.width.max(SIGN_LEN + PREFIX_LEN + body)
        }
        Operand::Float(_, width) => {
            let worst = match width {
                FloatWidth::F32 => F32_WORST_LEN,
                FloatWidth::F64 => F64_WORST_LEN,
            };
            let precision = spec.precision.fixed().unwrap_or(DEFAULT_FLOAT_PRECISION);
            spec.width.max(precision + worst)
        }
        Operand::Char(c) => spec.width.max(c.len_utf8()),
        Operand::Text(text) => text_len(text, spec),
        Operand::Pointer(_) => spec.width.max(PREFIX_LEN + pointer_digits()),
    }
}
