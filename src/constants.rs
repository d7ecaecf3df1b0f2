//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "ravensplit";

/// Default clip overlap in seconds.
pub const DEFAULT_CLIP_OVERLAP: f64 = 0.0;

/// Default minimum annotation/window overlap in seconds.
///
/// At 0.0 any positive overlap marks a class as present.
pub const DEFAULT_MIN_LABEL_LENGTH: f64 = 0.0;

/// Default name of the label column in Raven selection tables.
pub const DEFAULT_LABEL_COLUMN: &str = "Annotation";

/// Filename of the combined label table written to the output directory.
pub const LABELS_FILENAME: &str = "labels.csv";

/// Header of the filename column in the combined label table.
pub const LABELS_FILE_COLUMN: &str = "file";

/// Minimum decimal places for window bounds in clip filenames.
pub const CLIP_NAME_DECIMALS: usize = 1;

/// Upper bound on decimal places in clip filenames.
pub const MAX_CLIP_NAME_DECIMALS: usize = 9;

/// Raven selection table column headers.
pub mod raven {
    /// Begin time column header.
    pub const BEGIN_TIME: &str = "Begin Time (s)";
    /// End time column header.
    pub const END_TIME: &str = "End Time (s)";
    /// Low frequency column header.
    pub const LOW_FREQ: &str = "Low Freq (Hz)";
    /// High frequency column header.
    pub const HIGH_FREQ: &str = "High Freq (Hz)";
    /// Suffix Raven appends to selection table filenames, after the
    /// `.Table.N` marker and before the extension.
    pub const SELECTIONS_SUFFIX: &str = ".selections";
    /// Marker preceding the table number in Raven filenames.
    pub const TABLE_MARKER: &str = ".Table.";
    /// Suffix appended to annotation files whose labels were lowercased.
    pub const LOWERCASE_MARKER: &str = ".lower";
}

/// Supported annotation table file extensions.
pub const ANNOTATION_EXTENSIONS: &[&str] = &["txt", "csv"];

/// Supported audio file extensions for matching.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "mp3", "aac"];
