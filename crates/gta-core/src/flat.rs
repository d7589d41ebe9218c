//! Flat sequence files: one value per line, no header.

use std::path::Path;

use gta_common::{Error, Result};
use tracing::debug;

use crate::logging::{event_names, Stage};

/// Parse a flat sequence. Blank lines are skipped; anything else must be a
/// finite number.
pub fn parse_flat(text: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let field = line.trim();
        if field.is_empty() {
            continue;
        }
        let value = field
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::InvalidValue {
                line_no: idx + 1,
                value: field.to_string(),
            })?;
        values.push(value);
    }
    Ok(values)
}

/// Read and parse a flat sequence file.
pub fn load_flat(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let values = parse_flat(&text)?;
    debug!(
        event = event_names::SEQUENCE_LOADED,
        stage = %Stage::Parse,
        path = %path.display(),
        len = values.len(),
        "flat sequence loaded"
    );
    Ok(values)
}

/// Render one value per line in shortest round-trip form.
pub fn render_flat(values: &[f64]) -> String {
    let mut out = String::with_capacity(values.len() * 8);
    for v in values {
        out.push_str(&format!("{v:?}\n"));
    }
    out
}

pub fn write_flat(path: &Path, values: &[f64]) -> Result<()> {
    std::fs::write(path, render_flat(values)).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_lines() {
        let values = parse_flat("1.5\n\n  -2\n0.001\r\n\n").unwrap();
        assert_eq!(values, vec![1.5, -2.0, 0.001]);
    }

    #[test]
    fn test_parse_reports_line_number() {
        match parse_flat("1.0\n\nabc\n").unwrap_err() {
            Error::InvalidValue { line_no, value } => {
                assert_eq!(line_no, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        for text in ["NaN\n", "inf\n", "1.0\n-infinity\n"] {
            assert!(matches!(parse_flat(text), Err(Error::InvalidValue { .. })), "{text}");
        }
    }

    #[test]
    fn test_render_keeps_decimal_point() {
        assert_eq!(render_flat(&[1.0, 0.001, -3.25]), "1.0\n0.001\n-3.25\n");
        assert_eq!(render_flat(&[]), "");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seq.flat");
        let values = vec![0.1 + 0.2, -7.0, 1e-9];
        write_flat(&path, &values).unwrap();
        assert_eq!(load_flat(&path).unwrap(), values);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_flat(Path::new("/definitely/not/here.flat")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
