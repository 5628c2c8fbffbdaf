//! Render arguments.
//!
//! Arguments carry their own type, so length modifiers in the template are
//! ignored. Integer arguments remember their source width so that unsigned
//! conversions of negative values reinterpret in two's complement at that
//! width, the way C does after default promotion.

use core::fmt;

use crate::spec::{ConversionKind, Family, IntRadix};

/// Typed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<'a> {
    Signed { value: i64, bits: u32 },
    Unsigned { value: u64, bits: u32 },
    F32(f32),
    F64(f64),
    Char(char),
    Str(&'a str),
    /// Pre-rendered text of an arbitrary `Display` value.
    Text(String),
    Pointer(usize),
}

impl Arg<'_> {
    /// Capture the `Display` text of any value for `%s`.
    pub fn display(value: &impl fmt::Display) -> Self {
        Arg::Text(value.to_string())
    }

    /// Address argument for `%p`.
    pub fn pointer<T: ?Sized>(ptr: *const T) -> Self {
        Arg::Pointer(ptr.cast::<()>().addr())
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Arg<'_> {
            fn from(value: $t) -> Self {
                Arg::Signed { value: value as i64, bits: <$t>::BITS }
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Arg<'_> {
            fn from(value: $t) -> Self {
                Arg::Unsigned { value: value as u64, bits: <$t>::BITS }
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Arg<'_> {
    fn from(value: f32) -> Self {
        Arg::F32(value)
    }
}

impl From<f64> for Arg<'_> {
    fn from(value: f64) -> Self {
        Arg::F64(value)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Arg::Char(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Str(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Arg::Str(value.as_str())
    }
}

impl From<String> for Arg<'_> {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Arg::Str(if value { "true" } else { "false" })
    }
}

impl<T> From<*const T> for Arg<'_> {
    fn from(value: *const T) -> Self {
        Arg::pointer(value)
    }
}

impl<T> From<*mut T> for Arg<'_> {
    fn from(value: *mut T) -> Self {
        Arg::pointer(value.cast_const())
    }
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Signed { value, .. } => fmt::Display::fmt(value, f),
            Arg::Unsigned { value, .. } => fmt::Display::fmt(value, f),
            Arg::F32(v) => fmt::Display::fmt(v, f),
            Arg::F64(v) => fmt::Display::fmt(v, f),
            Arg::Char(c) => fmt::Display::fmt(c, f),
            Arg::Str(s) => f.write_str(s),
            Arg::Text(s) => f.write_str(s),
            Arg::Pointer(p) => write!(f, "{p:#x}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Operands: an argument resolved against a conversion family
// ---------------------------------------------------------------------------

/// Sign and magnitude of an integer operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IntOperand {
    pub negative: bool,
    pub magnitude: u64,
}

/// Source width of a float, which bounds its rendered length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FloatWidth {
    F32,
    F64,
}

#[derive(Clone, Copy)]
pub(crate) enum TextOperand<'r> {
    Str(&'r str),
    Display(&'r dyn fmt::Display),
}

/// What a renderer receives after coercion.
#[derive(Clone, Copy)]
pub(crate) enum Operand<'r> {
    Int(IntOperand),
    Float(f64, FloatWidth),
    Char(char),
    Text(TextOperand<'r>),
    Pointer(usize),
}

/// Resolve `arg` for `kind`. Pairings with no numeric meaning fall back to
/// the argument's text under string rules, which keeps rendering total.
pub(crate) fn operand<'r>(kind: ConversionKind, arg: &'r Arg<'_>) -> Operand<'r> {
    match kind.family() {
        Family::Integer(radix) => match int_operand(radix, arg) {
            Some(v) => Operand::Int(v),
            None => text_operand(arg),
        },
        Family::Float(_) => match *arg {
            Arg::F32(v) => Operand::Float(f64::from(v), FloatWidth::F32),
            Arg::F64(v) => Operand::Float(v, FloatWidth::F64),
            Arg::Signed { value, .. } => Operand::Float(value as f64, FloatWidth::F64),
            Arg::Unsigned { value, .. } => Operand::Float(value as f64, FloatWidth::F64),
            _ => text_operand(arg),
        },
        Family::Char => match *arg {
            Arg::Char(c) => Operand::Char(c),
            Arg::Signed { value, .. } => scalar(u32::try_from(value).ok(), arg),
            Arg::Unsigned { value, .. } => scalar(u32::try_from(value).ok(), arg),
            _ => text_operand(arg),
        },
        Family::Str => text_operand(arg),
        Family::Pointer => match *arg {
            Arg::Pointer(p) => Operand::Pointer(p),
            Arg::Unsigned { value, .. } => Operand::Pointer(value as usize),
            Arg::Signed { value, .. } => Operand::Pointer(value as usize),
            _ => text_operand(arg),
        },
    }
}

fn int_operand(radix: IntRadix, arg: &Arg<'_>) -> Option<IntOperand> {
    let (negative, magnitude) = match *arg {
        Arg::Signed { value, .. } if radix == IntRadix::Signed => (value < 0, value.unsigned_abs()),
        Arg::Signed { value, bits } => (false, value as u64 & width_mask(bits)),
        Arg::Unsigned { value, .. } => (false, value),
        Arg::Char(c) => (false, u64::from(c)),
        Arg::Pointer(p) => (false, p as u64),
        _ => return None,
    };
    Some(IntOperand {
        negative,
        magnitude,
    })
}

fn width_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1_u64 << bits) - 1
    }
}

fn scalar<'r>(code: Option<u32>, arg: &'r Arg<'_>) -> Operand<'r> {
    match code.and_then(char::from_u32) {
        Some(c) => Operand::Char(c),
        None => text_operand(arg),
    }
}

fn text_operand<'r>(arg: &'r Arg<'_>) -> Operand<'r> {
    Operand::Text(match arg {
        Arg::Str(s) => TextOperand::Str(s),
        Arg::Text(s) => TextOperand::Str(s.as_str()),
        other => TextOperand::Display(other),
    })
}
