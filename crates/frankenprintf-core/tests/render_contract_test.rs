//! Integration test: rendering contract matrix.
//!
//! Each row pairs a template and its arguments with the exact expected bytes.
//! Rows follow classic printf output except where noted.
//!
//! Run: cargo test -p frankenprintf-core --test render_contract_test

use frankenprintf_core::{Arg, FormatError, MalformedReason, Template, sprintf};

struct Case {
    template: &'static str,
    args: Vec<Arg<'static>>,
    expected: &'static str,
}

fn case(template: &'static str, args: Vec<Arg<'static>>, expected: &'static str) -> Case {
    Case {
        template,
        args,
        expected,
    }
}

fn matrix() -> Vec<Case> {
    vec![
        // Integers
        case("%5d", vec![Arg::from(42)], "   42"),
        case("%-5d", vec![Arg::from(42)], "42   "),
        case("%05d", vec![Arg::from(-3)], "-0003"),
        case("%.5d", vec![Arg::from(3)], "00003"),
        case("%8.5d", vec![Arg::from(3)], "   00003"),
        case("%+d", vec![Arg::from(7)], "+7"),
        case("% d", vec![Arg::from(7)], " 7"),
        case("%i", vec![Arg::from(i64::MIN)], "-9223372036854775808"),
        case("%u", vec![Arg::from(u64::MAX)], "18446744073709551615"),
        case("%#o", vec![Arg::from(8)], "010"),
        case("%#x", vec![Arg::from(255)], "0xff"),
        case("%#X", vec![Arg::from(255)], "0XFF"),
        case("%#x", vec![Arg::from(0)], "0"),
        case("%x", vec![Arg::from(-1_i32)], "ffffffff"),
        case("%hhx", vec![Arg::from(-1_i8)], "ff"),
        case("%lld", vec![Arg::from(1_i64 << 40)], "1099511627776"),
        case("%.0d", vec![Arg::from(0)], ""),
        case("[%5.0d]", vec![Arg::from(0)], "[     ]"),
        case("%-08d|", vec![Arg::from(5)], "5       |"),
        case("%d", vec![Arg::from('A')], "65"),
        // Floats
        case("%.2f", vec![Arg::from(3.14159)], "3.14"),
        case("%f", vec![Arg::from(1.0)], "1.000000"),
        case("%.0f", vec![Arg::from(2.5)], "2"),
        case("%.0f", vec![Arg::from(3.5)], "4"),
        case("%#.0f", vec![Arg::from(3.0)], "3."),
        case("%010.3f", vec![Arg::from(-1.5)], "-00001.500"),
        case("%+.1f", vec![Arg::from(0.25)], "+0.2"),
        case("%e", vec![Arg::from(12345.678)], "1.234568e+04"),
        case("%E", vec![Arg::from(0.0)], "0.000000E+00"),
        case("%.3e", vec![Arg::from(-1e-10)], "-1.000e-10"),
        case("%g", vec![Arg::from(0.0001)], "0.0001"),
        case("%g", vec![Arg::from(123456789.0)], "1.23457e+08"),
        case("%G", vec![Arg::from(1e-5)], "1E-05"),
        case("%#g", vec![Arg::from(1.0)], "1.00000"),
        case("%a", vec![Arg::from(1.0)], "0x1p+0"),
        case("%A", vec![Arg::from(-0.5)], "-0X1P-1"),
        case("%.1a", vec![Arg::from(1.96875)], "0x2.0p+0"),
        case("%f", vec![Arg::from(f64::INFINITY)], "inf"),
        case("%F", vec![Arg::from(f64::NEG_INFINITY)], "-INF"),
        case("%05f", vec![Arg::from(f64::NAN)], "  nan"),
        case("%.1f", vec![Arg::from(0.1_f32)], "0.1"),
        case("%.2f", vec![Arg::from(3_u8)], "3.00"),
        // Strings and chars
        case("%.3s", vec![Arg::from("hello")], "hel"),
        case("%7s|", vec![Arg::from("hi")], "     hi|"),
        case("%-7s|", vec![Arg::from("hi")], "hi     |"),
        case("%3s", vec![Arg::from("héé!")], "héé!"),
        case("%5s|", vec![Arg::from("日本")], "日本|"),
        case("%7s|", vec![Arg::from("日本")], " 日本|"),
        case("%-4s|", vec![Arg::from("éé")], "éé|"),
        case("%.3s|", vec![Arg::from("héllo")], "hé|"),
        case("%.4s|", vec![Arg::from("日本")], "日|"),
        case("%2c|", vec![Arg::from('é')], "é|"),
        case("%c%c", vec![Arg::from('o'), Arg::from('k')], "ok"),
        case("%-3c|", vec![Arg::from('x')], "x  |"),
        case("%c", vec![Arg::from(0x41_u8)], "A"),
        case("%s", vec![Arg::from(true)], "true"),
        case("%s", vec![Arg::from(2.5)], "2.5"),
        case("%s", vec![Arg::from(-17)], "-17"),
        case("%s", vec![Arg::display(&'λ')], "λ"),
        // Mismatched pairings render as text
        case("%d", vec![Arg::from("abc")], "abc"),
        case("%5.2d", vec![Arg::from("abc")], "   ab"),
        case("%f", vec![Arg::from('q')], "q"),
        // Escapes and literals
        case("100%%", vec![], "100%"),
        case("%d%%", vec![Arg::from(50)], "50%"),
        case("no placeholders", vec![], "no placeholders"),
        case("é%d→", vec![Arg::from(1)], "é1→"),
    ]
}

#[test]
fn contract_matrix_renders_exactly() {
    let mut failures = Vec::new();
    for case in matrix() {
        let out = sprintf(case.template, &case.args)
            .unwrap_or_else(|err| panic!("{:?} failed: {err}", case.template));
        if out != case.expected {
            failures.push(format!(
                "{:?}: expected {:?}, got {:?}",
                case.template, case.expected, out
            ));
        }
    }
    assert!(failures.is_empty(), "contract failures:\n{}", failures.join("\n"));
}

#[test]
fn every_rendering_fits_its_estimate() {
    for case in matrix() {
        let template = Template::compile(case.template).unwrap();
        let estimate = template.estimated_len(&case.args).unwrap();
        let bytes = template.render_bytes(&case.args).unwrap();
        assert!(
            bytes.len() <= estimate,
            "{:?}: {} bytes > estimate {}",
            case.template,
            bytes.len(),
            estimate
        );
    }
}

#[test]
fn pointers_are_zero_extended_hex() {
    let digits = 2 * std::mem::size_of::<usize>();
    let null = sprintf("%p", &[Arg::pointer(std::ptr::null::<u8>())]).unwrap();
    assert_eq!(null, format!("0x{}", "0".repeat(digits)));

    let value = 17_u64;
    let ptr: *const u64 = &value;
    let out = sprintf("%p", &[Arg::from(ptr)]).unwrap();
    assert_eq!(out, format!("0x{:0digits$x}", ptr.addr()));
}

#[test]
fn pointer_precision_cannot_shorten_the_address() {
    let digits = 2 * std::mem::size_of::<usize>();
    for text in ["%.0p", "%.4p", "%.1p"] {
        assert_eq!(
            sprintf(text, &[Arg::Pointer(0)]).unwrap(),
            format!("0x{}", "0".repeat(digits)),
            "{text}"
        );
        assert_eq!(
            sprintf(text, &[Arg::Pointer(0x1000)]).unwrap(),
            format!("0x{:0digits$x}", 0x1000),
            "{text}"
        );
    }
}

#[test]
fn arity_mismatch_is_reported() {
    assert_eq!(
        sprintf("%d and %d", &[Arg::from(1)]),
        Err(FormatError::ArityMismatch {
            expected: 2,
            actual: 1
        })
    );
    assert_eq!(
        sprintf("none", &[Arg::from(1)]),
        Err(FormatError::ArityMismatch {
            expected: 0,
            actual: 1
        })
    );
}

#[test]
fn malformed_templates_never_render() {
    let cases = [
        ("", 0, MalformedReason::EmptyTemplate),
        ("50%", 3, MalformedReason::TruncatedDirective),
        ("%q", 2, MalformedReason::TruncatedDirective),
        ("%5y", 2, MalformedReason::UnknownConversion('y')),
        ("%*d", 1, MalformedReason::UnknownConversion('*')),
        ("%hlx", 2, MalformedReason::MismatchedLengthModifier),
    ];
    for (text, position, reason) in cases {
        assert_eq!(
            Template::compile(text),
            Err(FormatError::MalformedTemplate { position, reason }),
            "{text:?}"
        );
    }
}

#[test]
fn error_messages_name_the_problem() {
    let err = Template::compile("ab%k").unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed template at byte 3: unknown conversion character 'k'"
    );
    let err = sprintf("%s%s", &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "argument count mismatch: template expects 2 argument(s), got 0"
    );
}
