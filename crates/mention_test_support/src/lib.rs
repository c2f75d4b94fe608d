//! Golden-fixture plumbing shared by the mention crates' integration tests.
//!
//! Fixtures are TOML files with a `format` header and a `[[cases]]` array;
//! every case carries an `id` that failures are reported under.

mod fixtures;

pub use fixtures::{FIXTURE_FORMAT_V1, FixtureCase, case_filter, fixture_path, load_fixture};

/// Render `text` with control characters escaped, for one-line failure output.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\u{00A0}' => out.push_str("\\u{A0}"),
            '\u{200B}' => out.push_str("\\u{200B}"),
            ch if ch < ' ' => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Side-by-side report of the first difference between two id lists.
pub fn diff_ids(expected: &[&str], actual: &[String]) -> String {
    use std::fmt::Write;
    let mut out = String::new();
    let missing = "<missing>";
    let max = expected.len().max(actual.len());
    let first = (0..max).find(|&i| expected.get(i).copied() != actual.get(i).map(String::as_str));
    if let Some(i) = first {
        let _ = writeln!(&mut out, "first mismatch at position {i}:");
        for idx in i.saturating_sub(1)..(i + 2).min(max) {
            let left = expected.get(idx).copied().unwrap_or(missing);
            let right = actual.get(idx).map(String::as_str).unwrap_or(missing);
            let marker = if idx == i { ">" } else { " " };
            let _ = writeln!(&mut out, "{marker} {idx:>3}  expected: {left}");
            let _ = writeln!(&mut out, "{marker} {idx:>3}    actual: {right}");
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} ids, actual {} ids",
        expected.len(),
        actual.len()
    );
    out
}
