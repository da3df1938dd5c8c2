use std::fs;
use std::path::Path;

use log::debug;
use symmetra_core::{Matrix, Result, SymmetraError};

/// Parses a dataset with one point per line.
///
/// Components may be separated by commas, whitespace, or both. Blank lines
/// are skipped. Every non-blank line must have the same number of components.
///
/// # Errors
///
/// - [`SymmetraError::Parse`] if a component is not a number (`line` is 1-based)
/// - [`SymmetraError::ShapeMismatch`] if rows differ in length
/// - [`SymmetraError::EmptyData`] if there are no points
pub fn parse_dataset(text: &str) -> Result<Matrix> {
    let mut values = Vec::new();
    let mut n = 0;
    let mut d = 0;

    for (lineno, line) in text.lines().enumerate() {
        let tokens: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            continue;
        }

        if n == 0 {
            d = tokens.len();
        } else if tokens.len() != d {
            return Err(SymmetraError::ShapeMismatch {
                expected: format!("{} components per point", d),
                got: format!("{} on line {}", tokens.len(), lineno + 1),
            });
        }

        for token in tokens {
            let v = token.parse::<f64>().map_err(|e| SymmetraError::Parse {
                line: lineno + 1,
                message: format!("`{}`: {}", token, e),
            })?;
            values.push(v);
        }
        n += 1;
    }

    if n == 0 {
        return Err(SymmetraError::EmptyData);
    }

    Ok(Matrix::from_row_slice(n, d, &values))
}

/// Reads and parses the dataset file at `path`. See [`parse_dataset`].
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let x = parse_dataset(&text)?;
    debug!("read {} x {} dataset from {}", x.nrows(), x.ncols(), path.display());
    Ok(x)
}

/// Renders `m` one row per line, entries as `{:.4}` joined by commas.
pub fn format_matrix(m: &Matrix) -> String {
    m.row_iter()
        .map(|row| {
            row.iter()
                .map(|v| format!("{:.4}", v))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_labels(labels: &[usize]) -> String {
    labels
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_comma_separated() {
        let x = parse_dataset("1,2,3\n4,5,6\n7,8,9\n").unwrap();
        assert_eq!(x, Matrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]));
    }

    #[test]
    fn test_parse_whitespace_and_blank_lines() {
        let x = parse_dataset("0.1 0.2\t0.1\n\n   \n0.1, 0.1, 0.1\n").unwrap();
        assert_eq!(x.shape(), (2, 3));
        assert_eq!(x[(1, 1)], 0.1);
    }

    #[test]
    fn test_parse_ragged_rows() {
        assert!(matches!(
            parse_dataset("1,2,3\n4,5\n"),
            Err(SymmetraError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_bad_number_reports_line() {
        assert!(matches!(
            parse_dataset("1,2\n\n3,abc\n"),
            Err(SymmetraError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(parse_dataset("\n \n"), Err(SymmetraError::EmptyData)));
    }

    #[test]
    fn test_read_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.5,1.5").unwrap();
        writeln!(file, "2.5,3.5").unwrap();

        let x = read_dataset(file.path()).unwrap();
        assert_eq!(x, Matrix::from_row_slice(2, 2, &[0.5, 1.5, 2.5, 3.5]));
    }

    #[test]
    fn test_read_dataset_missing_file() {
        assert!(matches!(
            read_dataset("/nonexistent/symmetra/input.txt"),
            Err(SymmetraError::Io(_))
        ));
    }

    #[test]
    fn test_format_matrix_and_labels() {
        let m = Matrix::from_row_slice(2, 2, &[1.0, 0.123456, 0.0, 2.5]);
        assert_eq!(format_matrix(&m), "1.0000,0.1235\n0.0000,2.5000");
        assert_eq!(format_labels(&[0, 2, 1]), "0,2,1");
    }
}
