//! Host fixture capture.
//!
//! Renders a built-in grid of single-placeholder cases through the host
//! `snprintf` and records the output as a fixture set. The captured set is
//! then verified against the engine like any hand-written fixture.

use frankenprintf_core::Template;

use crate::fixtures::{FixtureArg, FixtureCase, FixtureSet, Parity};
use crate::host_oracle::host_render;
use crate::structured_log::now_utc;

/// Templates and arguments captured by default.
fn capture_grid() -> Vec<(&'static str, Vec<FixtureArg>)> {
    let ints = || {
        vec![
            FixtureArg::I32(0),
            FixtureArg::I32(42),
            FixtureArg::I32(-42),
            FixtureArg::I64(i64::MIN),
            FixtureArg::U64(u64::MAX),
        ]
    };
    let floats = || {
        vec![
            FixtureArg::F64(0.0),
            FixtureArg::F64(-1.5),
            FixtureArg::F64(3.14159),
            FixtureArg::F64(1.0e-5),
            FixtureArg::F64(123_456_789.0),
        ]
    };
    let text = || {
        vec![
            FixtureArg::Str(String::new()),
            FixtureArg::Str(String::from("printf")),
        ]
    };

    let mut grid = Vec::new();
    for template in ["%d", "%+d", "% d", "%5d", "%-5d|", "%05d", "%.3d", "%x", "%#X", "%#o", "%u"] {
        grid.push((template, ints()));
    }
    for template in ["%f", "%.2f", "%10.3f", "%+e", "%.3E", "%g", "%#g", "%.2G", "%012.4f"] {
        grid.push((template, floats()));
    }
    for template in ["%s", "%8s", "%-8s|", "%.3s"] {
        grid.push((template, text()));
    }
    grid.push(("[%c]", vec![FixtureArg::Char('A'), FixtureArg::Char('~')]));
    grid
}

/// Capture the built-in grid. Pairings the host oracle does not cover are
/// skipped.
#[must_use]
pub fn capture_host_fixtures() -> FixtureSet {
    let mut cases = Vec::new();
    for (template_text, args) in capture_grid() {
        let Ok(template) = Template::compile(template_text) else {
            continue;
        };
        for (index, arg) in args.into_iter().enumerate() {
            let Ok(engine_arg) = arg.to_arg() else {
                continue;
            };
            let Some(output) = host_render(&template, &[engine_arg]) else {
                continue;
            };
            cases.push(FixtureCase {
                name: format!("host_{}_{index}", slug(template_text)),
                template: template_text.to_string(),
                args: vec![arg],
                expected_output: Some(output),
                expected_error: None,
                reference: String::from("host snprintf"),
                parity: Parity::Host,
            });
        }
    }
    FixtureSet {
        version: String::from("v1"),
        family: String::from("printf/host-capture"),
        captured_at: now_utc(),
        cases,
    }
}

/// Identifier-safe name for a template.
fn slug(template: &str) -> String {
    template
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' => c,
            '+' => 'p',
            '-' => 'm',
            '#' => 'h',
            '.' => 'd',
            ' ' => 's',
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_identifier_safe() {
        assert_eq!(slug("%-5d|"), "_m5d_");
        assert_eq!(slug("%#.3x"), "_hd3x");
    }

    #[test]
    fn grid_templates_compile() {
        for (template, args) in capture_grid() {
            let t = Template::compile(template).unwrap();
            assert_eq!(t.placeholder_count(), 1, "{template}");
            assert!(!args.is_empty());
        }
    }

    #[test]
    fn captured_cases_are_host_parity() {
        let set = capture_host_fixtures();
        assert_eq!(set.family, "printf/host-capture");
        assert!(set.cases.iter().all(|c| c.parity == Parity::Host));
        assert!(set.cases.iter().all(|c| c.expected_output.is_some()));
    }
}
