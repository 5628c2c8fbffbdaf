//! Placeholder specifications.
//!
//! A [`PlaceholderSpec`] is the parsed form of one `%`-directive: flags, width,
//! precision and the conversion it renders with. Family defaults (float
//! precision 6, integer zero-pad suppression) are resolved by the compiler, so
//! renderers read a spec without re-deriving anything.

use core::fmt;

/// Largest width or precision a directive may carry (C's `INT_MAX`).
pub const MAX_FIELD: usize = i32::MAX as usize;

/// Precision used by float conversions when the directive gives none.
pub const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Size of a pointer on this target, in bytes.
pub const POINTER_BYTES: usize = core::mem::size_of::<usize>();

// ---------------------------------------------------------------------------
// Flags, precision
// ---------------------------------------------------------------------------

/// Flags parsed from a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    pub left_align: bool,     // '-'
    pub force_sign: bool,     // '+'
    pub space_sign: bool,     // ' '
    pub zero_pad: bool,       // '0'
    pub alternate_form: bool, // '#'
}

/// Precision specification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precision {
    /// No precision given (the `-1` sentinel of classic printf).
    #[default]
    None,
    Fixed(usize),
}

impl Precision {
    /// The explicit precision, if any.
    #[must_use]
    pub const fn fixed(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Fixed(p) => Some(p),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion kinds
// ---------------------------------------------------------------------------

/// Which value family and notation a placeholder renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConversionKind {
    SignedDecimal,     // d i
    UnsignedDecimal,   // u
    Octal,             // o
    HexLower,          // x
    HexUpper,          // X
    FixedFloat,        // f
    FixedFloatUpper,   // F
    ExpFloatLower,     // e
    ExpFloatUpper,     // E
    GeneralFloatLower, // g
    GeneralFloatUpper, // G
    HexFloatLower,     // a
    HexFloatUpper,     // A
    Char,              // c C
    String,            // s S
    Pointer,           // p
}

/// Integer conversions, by base and signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntRadix {
    Signed,
    Unsigned,
    Octal,
    Hex,
}

/// Float notations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatNotation {
    Fixed,
    Exponent,
    General,
    Hex,
}

/// Renderer family a conversion dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Integer(IntRadix),
    Float(FloatNotation),
    Char,
    Str,
    Pointer,
}

impl ConversionKind {
    /// Map a conversion character to its kind. `None` for anything outside
    /// the accepted set `d i u x X o e E f F g G a A c C s S p`.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b'd' | b'i' => Self::SignedDecimal,
            b'u' => Self::UnsignedDecimal,
            b'o' => Self::Octal,
            b'x' => Self::HexLower,
            b'X' => Self::HexUpper,
            b'f' => Self::FixedFloat,
            b'F' => Self::FixedFloatUpper,
            b'e' => Self::ExpFloatLower,
            b'E' => Self::ExpFloatUpper,
            b'g' => Self::GeneralFloatLower,
            b'G' => Self::GeneralFloatUpper,
            b'a' => Self::HexFloatLower,
            b'A' => Self::HexFloatUpper,
            b'c' | b'C' => Self::Char,
            b's' | b'S' => Self::String,
            b'p' => Self::Pointer,
            _ => return None,
        })
    }

    /// Canonical conversion character.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::SignedDecimal => b'd',
            Self::UnsignedDecimal => b'u',
            Self::Octal => b'o',
            Self::HexLower => b'x',
            Self::HexUpper => b'X',
            Self::FixedFloat => b'f',
            Self::FixedFloatUpper => b'F',
            Self::ExpFloatLower => b'e',
            Self::ExpFloatUpper => b'E',
            Self::GeneralFloatLower => b'g',
            Self::GeneralFloatUpper => b'G',
            Self::HexFloatLower => b'a',
            Self::HexFloatUpper => b'A',
            Self::Char => b'c',
            Self::String => b's',
            Self::Pointer => b'p',
        }
    }

    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Self::SignedDecimal => Family::Integer(IntRadix::Signed),
            Self::UnsignedDecimal => Family::Integer(IntRadix::Unsigned),
            Self::Octal => Family::Integer(IntRadix::Octal),
            Self::HexLower | Self::HexUpper => Family::Integer(IntRadix::Hex),
            Self::FixedFloat | Self::FixedFloatUpper => Family::Float(FloatNotation::Fixed),
            Self::ExpFloatLower | Self::ExpFloatUpper => Family::Float(FloatNotation::Exponent),
            Self::GeneralFloatLower | Self::GeneralFloatUpper => {
                Family::Float(FloatNotation::General)
            }
            Self::HexFloatLower | Self::HexFloatUpper => Family::Float(FloatNotation::Hex),
            Self::Char => Family::Char,
            Self::String => Family::Str,
            Self::Pointer => Family::Pointer,
        }
    }

    /// True for the kinds spelled with an uppercase conversion character.
    #[must_use]
    pub const fn is_upper(self) -> bool {
        matches!(
            self,
            Self::HexUpper
                | Self::FixedFloatUpper
                | Self::ExpFloatUpper
                | Self::GeneralFloatUpper
                | Self::HexFloatUpper
        )
    }
}

impl IntRadix {
    #[must_use]
    pub const fn base(self) -> u64 {
        match self {
            Self::Signed | Self::Unsigned => 10,
            Self::Octal => 8,
            Self::Hex => 16,
        }
    }
}

// ---------------------------------------------------------------------------
// PlaceholderSpec
// ---------------------------------------------------------------------------

/// A compiled `%`-directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceholderSpec {
    pub flags: Flags,
    /// Minimum field width; 0 means none.
    pub width: usize,
    pub precision: Precision,
    pub conversion: ConversionKind,
}

impl PlaceholderSpec {
    /// A spec with no flags, width or precision.
    #[must_use]
    pub const fn new(conversion: ConversionKind) -> Self {
        Self {
            flags: Flags {
                left_align: false,
                force_sign: false,
                space_sign: false,
                zero_pad: false,
                alternate_form: false,
            },
            width: 0,
            precision: Precision::None,
            conversion,
        }
    }

    /// The directive in C syntax with `length` inserted before the conversion
    /// character (e.g. `"ll"`). Flags print in the order `-+ #0`.
    #[must_use]
    pub fn c_directive(&self, length: &str) -> String {
        let mut out = String::from("%");
        let f = &self.flags;
        for (set, ch) in [
            (f.left_align, '-'),
            (f.force_sign, '+'),
            (f.space_sign, ' '),
            (f.alternate_form, '#'),
            (f.zero_pad, '0'),
        ] {
            if set {
                out.push(ch);
            }
        }
        if self.width > 0 {
            out.push_str(&self.width.to_string());
        }
        if let Precision::Fixed(p) = self.precision {
            out.push('.');
            out.push_str(&p.to_string());
        }
        out.push_str(length);
        out.push(char::from(self.conversion.as_byte()));
        out
    }
}

impl fmt::Display for PlaceholderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.c_directive(""))
    }
}
