//! Helpers for integration tests: TOML page fixtures and readable line diffs.

mod fixture;

pub use fixture::{BuiltPage, Expectations, NodeSpec, PAGE_FIXTURE_FORMAT_V1, PageFixture};
pub use fixture::{build_page, load_fixture, parse_fixture};

pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;

    fn line(lines: &[String], i: usize) -> &str {
        lines.get(i).map(String::as_str).unwrap_or("<missing>")
    }

    let max = expected.len().max(actual.len());

    let mut out = String::new();
    let mismatch = (0..max).find(|&i| line(expected, i) != line(actual, i));
    match mismatch {
        Some(i) => {
            let start = i.saturating_sub(2);
            let end = (i + 3).min(max);
            let _ = writeln!(
                &mut out,
                "first mismatch at line {} (showing {}..={}):",
                i + 1,
                start + 1,
                end
            );
            for idx in start..end {
                let marker = if idx == i { ">" } else { " " };
                let _ = writeln!(&mut out, "{marker} {:>4}  expected: {}", idx + 1, line(expected, idx));
                let _ = writeln!(&mut out, "{marker} {:>4}    actual: {}", idx + 1, line(actual, idx));
            }
        }
        None if expected.len() != actual.len() => {
            let _ = writeln!(&mut out, "prefix matched but lengths differ");
        }
        None => {}
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}
