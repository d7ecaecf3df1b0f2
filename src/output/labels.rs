//! Combined label table assembly and CSV output.

use std::path::Path;

use crate::constants::LABELS_FILE_COLUMN;
use crate::error::{Error, Result};
use crate::split::ClassSet;

/// One row of the combined label table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRow {
    /// Output clip filename the row is keyed by.
    pub file: String,
    /// Binary presence per class, in class-set column order.
    pub presence: Vec<bool>,
}

/// Combined label table indexed by output clip filename.
///
/// Rows are appended in visit order (recording order, then ascending
/// window order) and never mutated afterward.
#[derive(Debug, Clone)]
pub struct LabelTable {
    classes: ClassSet,
    rows: Vec<LabelRow>,
}

impl LabelTable {
    /// Create an empty table with the given label columns.
    pub fn new(classes: ClassSet) -> Self {
        Self {
            classes,
            rows: Vec::new(),
        }
    }

    /// Append one clip's row.
    pub fn push(&mut self, file: String, presence: Vec<bool>) {
        debug_assert_eq!(presence.len(), self.classes.len());
        self.rows.push(LabelRow { file, presence });
    }

    /// The table's class columns.
    pub fn classes(&self) -> &ClassSet {
        &self.classes
    }

    /// Rows in emission order.
    pub fn rows(&self) -> &[LabelRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV: a `file` column followed by one binary
    /// column per class.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| Error::LabelsWrite {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        let header: Vec<&str> =
            std::iter::once(LABELS_FILE_COLUMN).chain(self.classes.iter()).collect();
        writer.write_record(&header).map_err(|e| Error::LabelsWrite {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        for row in &self.rows {
            let record: Vec<&str> = std::iter::once(row.file.as_str())
                .chain(row.presence.iter().map(|&p| if p { "1" } else { "0" }))
                .collect();
            writer.write_record(&record).map_err(|e| Error::LabelsWrite {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;
        }

        writer.flush().map_err(|e| Error::LabelsWrite {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }
}
