//! Diff rendering for fixture comparison.

/// Render a diff between expected and actual output.
///
/// Renderings are usually a single line, so besides the per-line `-`/`+`
/// pairs the first differing byte is marked with a caret.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    let expected_lines: Vec<&str> = expected.split('\n').collect();
    let actual_lines: Vec<&str> = actual.split('\n').collect();
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let e = expected_lines.get(i).copied();
        let a = actual_lines.get(i).copied();
        if e == a {
            continue;
        }
        out.push_str(&format!("@@ line {} @@\n", i + 1));
        if let Some(e) = e {
            out.push_str(&format!("-{e:?}\n"));
        }
        if let Some(a) = a {
            out.push_str(&format!("+{a:?}\n"));
        }
        if let (Some(e), Some(a)) = (e, a) {
            let at = first_difference(e, a);
            out.push_str(&format!(" {}^ byte {at}\n", " ".repeat(debug_offset(e, at))));
        }
    }
    out
}

fn first_difference(a: &str, b: &str) -> usize {
    a.bytes()
        .zip(b.bytes())
        .position(|(x, y)| x != y)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// Column of byte `at` of `line` inside its `{:?}` rendering.
fn debug_offset(line: &str, at: usize) -> usize {
    let prefix = line.get(..at).unwrap_or(line);
    format!("{prefix:?}").len() - 1
}
