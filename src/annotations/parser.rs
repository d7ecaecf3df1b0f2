//! Raven selection table parsing.
//!
//! Selection tables are tab-separated text files with one row per
//! annotation; `.csv` tables are parsed comma-separated. The label column
//! name is configurable, so columns are resolved from the header row
//! instead of a fixed deserialization struct. Uses the `csv` crate for
//! robust parsing (quoting, BOM, trimming).

use std::path::Path;

use crate::constants::raven;
use crate::error::{Error, Result};

use super::Annotation;

/// Resolved column indices for one annotation table.
struct ColumnIndices {
    begin: usize,
    end: usize,
    low_freq: Option<usize>,
    high_freq: Option<usize>,
    label: usize,
}

/// Parse an annotation table into a list of annotations.
///
/// Labels are trimmed and lowercased. Fails fast, naming every row with
/// an empty label cell, rather than silently dropping rows.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the label column (or a
/// required time column) is missing, a value cannot be parsed, a row has
/// `end <= begin`, or any row has an empty label.
pub fn load_annotation_table(path: &Path, label_column: &str) -> Result<Vec<Annotation>> {
    let delimiter = if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")) {
        b','
    } else {
        b'\t'
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::AnnotationRead {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let headers = reader
        .headers()
        .map_err(|e| Error::AnnotationRead {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?
        .clone();

    let columns = resolve_columns(&headers, label_column, path)?;

    let mut annotations = Vec::new();
    let mut empty_label_lines = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        // Header occupies line 1
        let line = row_idx + 2;

        let record = result.map_err(|e| Error::AnnotationParse {
            path: path.to_path_buf(),
            message: format!("line {line}: {e}"),
        })?;

        let begin_time = parse_seconds(&record, columns.begin, raven::BEGIN_TIME, line, path)?;
        let end_time = parse_seconds(&record, columns.end, raven::END_TIME, line, path)?;

        if end_time <= begin_time {
            return Err(Error::AnnotationParse {
                path: path.to_path_buf(),
                message: format!(
                    "line {line}: end time ({end_time}) must be greater than begin time ({begin_time})"
                ),
            });
        }

        let label = record
            .get(columns.label)
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        if label.is_empty() {
            empty_label_lines.push(line);
            continue;
        }

        annotations.push(Annotation {
            begin_time,
            end_time,
            low_freq: parse_optional_freq(&record, columns.low_freq),
            high_freq: parse_optional_freq(&record, columns.high_freq),
            label,
        });
    }

    if !empty_label_lines.is_empty() {
        return Err(Error::MissingLabel {
            path: path.to_path_buf(),
            lines: empty_label_lines,
        });
    }

    Ok(annotations)
}

fn resolve_columns(
    headers: &csv::StringRecord,
    label_column: &str,
    path: &Path,
) -> Result<ColumnIndices> {
    let find = |name: &str| headers.iter().position(|h| h == name);

    let label = find(label_column).ok_or_else(|| Error::MissingLabelColumn {
        path: path.to_path_buf(),
        column: label_column.to_string(),
    })?;

    let begin = find(raven::BEGIN_TIME).ok_or_else(|| Error::AnnotationParse {
        path: path.to_path_buf(),
        message: format!("missing '{}' column", raven::BEGIN_TIME),
    })?;

    let end = find(raven::END_TIME).ok_or_else(|| Error::AnnotationParse {
        path: path.to_path_buf(),
        message: format!("missing '{}' column", raven::END_TIME),
    })?;

    Ok(ColumnIndices {
        begin,
        end,
        low_freq: find(raven::LOW_FREQ),
        high_freq: find(raven::HIGH_FREQ),
        label,
    })
}

fn parse_seconds(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
    line: usize,
    path: &Path,
) -> Result<f64> {
    let raw = record.get(index).unwrap_or_default();
    raw.parse::<f64>().map_err(|_| Error::AnnotationParse {
        path: path.to_path_buf(),
        message: format!("line {line}: '{raw}' in '{column}' is not a number"),
    })
}

fn parse_optional_freq(record: &csv::StringRecord, index: Option<usize>) -> Option<f64> {
    index
        .and_then(|i| record.get(i))
        .and_then(|raw| raw.parse::<f64>().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_table(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".selections.txt").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_simple_table() {
        let file = write_table(
            "Selection\tBegin Time (s)\tEnd Time (s)\tLow Freq (Hz)\tHigh Freq (Hz)\tAnnotation\n\
             1\t0.5\t2.5\t1000\t4000\tWOTH\n\
             2\t6.0\t8.0\t500\t2000\tEATO\n",
        );

        let annotations = load_annotation_table(file.path(), "Annotation").unwrap();
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].begin_time, 0.5);
        assert_eq!(annotations[0].end_time, 2.5);
        assert_eq!(annotations[0].low_freq, Some(1000.0));
        assert_eq!(annotations[0].label, "woth");
        assert_eq!(annotations[1].label, "eato");
    }

    #[test]
    fn test_labels_are_lowercased_and_trimmed() {
        let file = write_table(
            "Begin Time (s)\tEnd Time (s)\tAnnotation\n\
             0.0\t1.0\t  Wood Thrush \n",
        );

        let annotations = load_annotation_table(file.path(), "Annotation").unwrap();
        assert_eq!(annotations[0].label, "wood thrush");
    }

    #[test]
    fn test_missing_label_column() {
        let file = write_table(
            "Begin Time (s)\tEnd Time (s)\tSpecies\n\
             0.0\t1.0\twoth\n",
        );

        let result = load_annotation_table(file.path(), "Annotation");
        assert!(matches!(result, Err(Error::MissingLabelColumn { .. })));
    }

    #[test]
    fn test_empty_labels_reported_with_lines() {
        let file = write_table(
            "Begin Time (s)\tEnd Time (s)\tAnnotation\n\
             0.0\t1.0\twoth\n\
             1.0\t2.0\t\n\
             2.0\t3.0\teato\n\
             3.0\t4.0\t\n",
        );

        let result = load_annotation_table(file.path(), "Annotation");
        match result {
            Err(Error::MissingLabel { lines, .. }) => assert_eq!(lines, vec![3, 5]),
            other => panic!("expected MissingLabel, got {other:?}"),
        }
    }

    #[test]
    fn test_inverted_time_range_rejected() {
        let file = write_table(
            "Begin Time (s)\tEnd Time (s)\tAnnotation\n\
             5.0\t3.0\twoth\n",
        );

        let result = load_annotation_table(file.path(), "Annotation");
        assert!(matches!(result, Err(Error::AnnotationParse { .. })));
    }

    #[test]
    fn test_non_numeric_time_rejected() {
        let file = write_table(
            "Begin Time (s)\tEnd Time (s)\tAnnotation\n\
             abc\t3.0\twoth\n",
        );

        let result = load_annotation_table(file.path(), "Annotation");
        assert!(matches!(result, Err(Error::AnnotationParse { .. })));
    }

    #[test]
    fn test_missing_freq_columns_tolerated() {
        let file = write_table(
            "Begin Time (s)\tEnd Time (s)\tAnnotation\n\
             0.0\t1.0\twoth\n",
        );

        let annotations = load_annotation_table(file.path(), "Annotation").unwrap();
        assert_eq!(annotations[0].low_freq, None);
        assert_eq!(annotations[0].high_freq, None);
    }

    #[test]
    fn test_csv_extension_parsed_comma_separated() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        file.write_all(b"Begin Time (s),End Time (s),Annotation\n0.0,1.0,woth\n")
            .unwrap();
        file.flush().unwrap();

        let annotations = load_annotation_table(file.path(), "Annotation").unwrap();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].label, "woth");
    }

    #[test]
    fn test_header_only_returns_empty_vec() {
        let file = write_table("Begin Time (s)\tEnd Time (s)\tAnnotation\n");
        let annotations = load_annotation_table(file.path(), "Annotation").unwrap();
        assert!(annotations.is_empty());
    }
}
