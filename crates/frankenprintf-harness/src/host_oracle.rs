//! Host C library parity oracle.
//!
//! Renders a compiled template through the host `snprintf` so the runner can
//! compare engine output against classic printf. Only templates with at most
//! one placeholder are oracle-checked, and only argument pairings C can
//! express without ambiguity: integers are passed as 64-bit (`ll`), floats as
//! `double`, chars and strings only when ASCII. Everything else yields `None`.

use std::ffi::CString;

use frankenprintf_core::spec::{Family, IntRadix};
use frankenprintf_core::{Arg, PlaceholderSpec, Template};

/// A value in the form it crosses the C variadic boundary.
#[derive(Debug, Clone, PartialEq)]
enum CValue {
    Signed(i64),
    Unsigned(u64),
    Double(f64),
    Char(u8),
    Str(CString),
}

/// Render `template` with `args` through the host `snprintf`, or `None` when
/// the pairing is outside what the oracle checks.
#[must_use]
pub fn host_render(template: &Template, args: &[Arg<'_>]) -> Option<String> {
    if template.placeholder_count() > 1 || args.len() != template.placeholder_count() {
        return None;
    }
    let mut segments = template.literal_segments();
    let mut format = String::from(segments.next()?);
    let value = match (template.placeholders().first(), args.first()) {
        (None, None) => None,
        (Some(spec), Some(arg)) => {
            let (value, length) = c_value(spec, arg)?;
            format.push_str(&spec.c_directive(length));
            format.push_str(segments.next()?);
            Some(value)
        }
        _ => return None,
    };
    let format = CString::new(format).ok()?;
    let bytes = snprintf(&format, value.as_ref())?;
    String::from_utf8(bytes).ok()
}

/// The C-side value and length modifier for one placeholder, if the oracle
/// covers the pairing.
fn c_value(spec: &PlaceholderSpec, arg: &Arg<'_>) -> Option<(CValue, &'static str)> {
    match spec.conversion.family() {
        Family::Integer(radix) => match *arg {
            Arg::Signed { value, .. } if radix == IntRadix::Signed => {
                Some((CValue::Signed(value), "ll"))
            }
            Arg::Signed { value, bits } => Some((CValue::Unsigned(value as u64 & mask(bits)), "ll")),
            // `%lld` would reinterpret values above i64::MAX.
            Arg::Unsigned { value, .. } if radix == IntRadix::Signed => {
                i64::try_from(value).ok().map(|v| (CValue::Signed(v), "ll"))
            }
            Arg::Unsigned { value, .. } => Some((CValue::Unsigned(value), "ll")),
            _ => None,
        },
        Family::Float(_) => match *arg {
            Arg::F32(v) => Some((CValue::Double(f64::from(v)), "")),
            Arg::F64(v) => Some((CValue::Double(v), "")),
            _ => None,
        },
        Family::Char => match *arg {
            Arg::Char(c) if c.is_ascii() && c != '\0' => Some((CValue::Char(c as u8), "")),
            _ => None,
        },
        Family::Str => match arg {
            Arg::Str(s) if s.is_ascii() => Some((CValue::Str(CString::new(*s).ok()?), "")),
            Arg::Text(s) if s.is_ascii() => Some((CValue::Str(CString::new(s.as_str()).ok()?), "")),
            _ => None,
        },
        Family::Pointer => None,
    }
}

fn mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1_u64 << bits) - 1
    }
}

/// Two-pass `snprintf`: measure, then render into an exact buffer.
fn snprintf(format: &CString, value: Option<&CValue>) -> Option<Vec<u8>> {
    let needed = call(format, value, std::ptr::null_mut(), 0);
    let len = usize::try_from(needed).ok()?;
    let mut buf = vec![0u8; len + 1];
    let written = call(format, value, buf.as_mut_ptr().cast(), buf.len());
    if usize::try_from(written).ok()? != len {
        return None;
    }
    buf.truncate(len);
    Some(buf)
}

fn call(
    format: &CString,
    value: Option<&CValue>,
    out: *mut libc::c_char,
    size: usize,
) -> libc::c_int {
    let fmt = format.as_ptr();
    // SAFETY: `fmt` is NUL-terminated and holds at most one directive whose
    // conversion and length modifier match the variadic argument passed with
    // it. `out` is either null with `size == 0` (measure only) or points to
    // `size` writable bytes.
    unsafe {
        match value {
            None => libc::snprintf(out, size, fmt),
            Some(CValue::Signed(v)) => libc::snprintf(out, size, fmt, *v as libc::c_longlong),
            Some(CValue::Unsigned(v)) => libc::snprintf(out, size, fmt, *v as libc::c_ulonglong),
            Some(CValue::Double(v)) => libc::snprintf(out, size, fmt, *v as libc::c_double),
            Some(CValue::Char(c)) => libc::snprintf(out, size, fmt, libc::c_int::from(*c)),
            Some(CValue::Str(s)) => libc::snprintf(out, size, fmt, s.as_ptr()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(text: &str, args: &[Arg<'_>]) -> Option<String> {
        host_render(&Template::compile(text).unwrap(), args)
    }

    #[test]
    fn literal_templates_render_through_host() {
        assert_eq!(host("100%% done", &[]).as_deref(), Some("100% done"));
    }

    #[test]
    fn integer_and_float_parity() {
        assert_eq!(host("[%05d]", &[Arg::from(-3)]).as_deref(), Some("[-0003]"));
        assert_eq!(host("%#x", &[Arg::from(-1_i32)]).as_deref(), Some("0xffffffff"));
        assert_eq!(host("%.2f", &[Arg::from(3.14159)]).as_deref(), Some("3.14"));
        assert_eq!(host("%-6s|", &[Arg::from("ab")]).as_deref(), Some("ab    |"));
    }

    #[test]
    fn unsupported_pairings_are_skipped() {
        assert_eq!(host("%p", &[Arg::Pointer(0)]), None);
        assert_eq!(host("%s", &[Arg::from("héllo")]), None);
        assert_eq!(host("%d", &[Arg::from(u64::MAX)]), None);
        assert_eq!(host("%d %d", &[Arg::from(1), Arg::from(2)]), None);
        assert_eq!(host("%d", &[Arg::from("text")]), None);
    }
}
