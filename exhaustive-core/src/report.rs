//! Output formatting - plaintext and JSON.
//!
//! Rendering is pure formatting: violations arrive already ordered and are
//! written to any `io::Write` sink.

use serde_json::json;
use std::io::{self, Write};
use std::path::Path;

use crate::program::Position;
use crate::switches::Violation;

/// First line of a non-empty plain report.
pub const BANNER: &str = "The following switch statements are missing constants:";

/// `file` relative to `base`, or unchanged when `base` is not a prefix.
fn display_path(base: &Path, file: &str) -> String {
    match Path::new(file).strip_prefix(base) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
        _ => file.to_string(),
    }
}

/// Formats `file:line:column` relative to `base`.
pub fn format_position(base: &Path, file: &str, position: Position) -> String {
    format!("{}:{}:{}", display_path(base, file), position.line, position.column)
}

/// Writes violations as plain text. Writes nothing when there are none.
pub fn write_plain<W: Write>(out: &mut W, violations: &[Violation], base: &Path) -> io::Result<()> {
    if violations.is_empty() {
        return Ok(());
    }

    writeln!(out, "{}", BANNER)?;
    for v in violations {
        let names: Vec<&str> = v.missing.iter().map(|c| c.name.as_str()).collect();
        writeln!(
            out,
            "\t{}: {}",
            format_position(base, &v.file, v.position),
            names.join(", ")
        )?;
    }
    Ok(())
}

/// Writes violations as a JSON document (always, even when empty).
pub fn write_json<W: Write>(out: &mut W, violations: &[Violation], base: &Path) -> io::Result<()> {
    let entries: Vec<_> = violations
        .iter()
        .map(|v| {
            json!({
                "file": display_path(base, &v.file),
                "line": v.position.line,
                "column": v.position.column,
                "missing": v.missing.iter().map(|c| &c.name).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &json!({ "violations": entries }))?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constset::Constant;
    use crate::program::{ConstValue, NamedType};

    fn constant(name: &str, order: usize) -> Constant {
        Constant {
            name: name.into(),
            ty: NamedType::new("example", "Day"),
            value: ConstValue::Int(order as i128),
            order,
            file: "example.go".into(),
            position: Position::new(10 + order as u32, 2),
        }
    }

    fn violation(file: &str, line: u32, names: &[&str]) -> Violation {
        Violation {
            file: file.into(),
            position: Position::new(line, 2),
            missing: names
                .iter()
                .enumerate()
                .map(|(i, n)| constant(n, i))
                .collect(),
        }
    }

    #[test]
    fn test_empty_renders_nothing() {
        let mut out = Vec::new();
        write_plain(&mut out, &[], Path::new("/work")).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_plain_report() {
        let violations = vec![
            violation("/work/examples/example/example.go", 17, &["Sunday"]),
            violation("/work/cal/month.go", 40, &["March", "April"]),
        ];
        let mut out = Vec::new();
        write_plain(&mut out, &violations, Path::new("/work")).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "The following switch statements are missing constants:\n\
             \texamples/example/example.go:17:2: Sunday\n\
             \tcal/month.go:40:2: March, April\n"
        );
    }

    #[test]
    fn test_position_outside_base_is_unchanged() {
        assert_eq!(
            format_position(Path::new("/work"), "/elsewhere/a.go", Position::new(3, 4)),
            "/elsewhere/a.go:3:4"
        );
        assert_eq!(
            format_position(Path::new("/work"), "rel/a.go", Position::new(3, 4)),
            "rel/a.go:3:4"
        );
        // A sibling directory sharing a name prefix is not stripped
        assert_eq!(
            format_position(Path::new("/work"), "/workshop/a.go", Position::new(1, 1)),
            "/workshop/a.go:1:1"
        );
    }

    #[test]
    fn test_json_report() {
        let violations = vec![violation("/work/a.go", 5, &["Saturday", "Sunday"])];
        let mut out = Vec::new();
        write_json(&mut out, &violations, Path::new("/work")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["violations"][0]["file"], "a.go");
        assert_eq!(value["violations"][0]["line"], 5);
        assert_eq!(value["violations"][0]["missing"][1], "Sunday");
    }

    #[test]
    fn test_json_report_empty() {
        let mut out = Vec::new();
        write_json(&mut out, &[], Path::new(".")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["violations"].as_array().map(Vec::len), Some(0));
    }
}
