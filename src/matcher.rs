//! Annotation/audio file pairing.
//!
//! Each annotation table is matched to an audio file by base filename
//! stem, ignoring the annotation extension, Raven's `.Table.N.selections`
//! suffix, and the `.lower` lowercase-marker suffix. Unmatched files on
//! either side are reported and skipped; zero matches is fatal.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::constants::{ANNOTATION_EXTENSIONS, AUDIO_EXTENSIONS, raven};
use crate::error::{Error, Result};

/// One annotation table paired with its source recording.
#[derive(Debug, Clone)]
pub struct RecordingPair {
    /// Shared filename stem.
    pub stem: String,
    /// Path to the annotation table.
    pub annotation_path: PathBuf,
    /// Path to the audio file.
    pub audio_path: PathBuf,
}

/// Outcome of pairing an annotation directory with an audio directory.
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// Matched pairs, sorted by stem.
    pub pairs: Vec<RecordingPair>,
    /// Annotation files with no matching audio.
    pub unmatched_annotations: Vec<PathBuf>,
    /// Audio files with no matching annotation table.
    pub unmatched_audio: Vec<PathBuf>,
}

impl MatchReport {
    /// Human-readable matching summary.
    pub fn summary(&self) -> String {
        format!(
            "{} matched out of {} annotation files and {} audio files",
            self.pairs.len(),
            self.pairs.len() + self.unmatched_annotations.len(),
            self.pairs.len() + self.unmatched_audio.len(),
        )
    }
}

/// Pair annotation tables with audio files by filename stem.
///
/// Partial mismatches are logged at warn level and excluded; zero matched
/// pairs is an error.
///
/// # Errors
///
/// Returns an error if either directory cannot be read or no pair matches.
pub fn match_files(annotation_dir: &Path, audio_dir: &Path) -> Result<MatchReport> {
    let mut annotations: BTreeMap<String, PathBuf> = BTreeMap::new();
    for path in list_files(annotation_dir, is_annotation_file)? {
        if let Some(stem) = annotation_stem(&path) {
            annotations.insert(stem, path);
        }
    }

    let mut audio: BTreeMap<String, PathBuf> = BTreeMap::new();
    for path in list_files(audio_dir, is_audio_file)? {
        if let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) {
            audio.insert(stem, path);
        }
    }

    let mut pairs = Vec::new();
    let mut unmatched_annotations = Vec::new();

    for (stem, annotation_path) in annotations {
        if let Some(audio_path) = audio.remove(&stem) {
            pairs.push(RecordingPair {
                stem,
                annotation_path,
                audio_path,
            });
        } else {
            warn!(
                "No audio file matches annotation table {}",
                annotation_path.display()
            );
            unmatched_annotations.push(annotation_path);
        }
    }

    let unmatched_audio: Vec<PathBuf> = audio.into_values().collect();
    for path in &unmatched_audio {
        warn!("No annotation table matches audio file {}", path.display());
    }

    if pairs.is_empty() {
        return Err(Error::NoMatch);
    }

    Ok(MatchReport {
        pairs,
        unmatched_annotations,
        unmatched_audio,
    })
}

/// Collect files in a directory that satisfy a predicate, non-recursive.
fn list_files(dir: &Path, keep: fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && keep(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

/// Base filename stem of an annotation table.
///
/// `rec1.Table.1.selections.txt` -> `rec1`, and a trailing `.lower`
/// marker (written by annotation-lowercasing tools) is stripped as well.
fn annotation_stem(path: &Path) -> Option<String> {
    let mut stem = path.file_stem()?.to_string_lossy().into_owned();

    if let Some(s) = stem.strip_suffix(raven::LOWERCASE_MARKER) {
        stem = s.to_string();
    }
    if let Some(s) = stem.strip_suffix(raven::SELECTIONS_SUFFIX) {
        stem = s.to_string();
    }
    if let Some(pos) = stem.rfind(raven::TABLE_MARKER) {
        let tail = &stem[pos + raven::TABLE_MARKER.len()..];
        if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
            stem.truncate(pos);
        }
    }

    Some(stem)
}

fn is_annotation_file(path: &Path) -> bool {
    has_extension_in(path, ANNOTATION_EXTENSIONS)
}

fn is_audio_file(path: &Path) -> bool {
    has_extension_in(path, AUDIO_EXTENSIONS)
}

fn has_extension_in(path: &Path, extensions: &[&str]) -> bool {
    path.extension().is_some_and(|ext| {
        extensions
            .iter()
            .any(|e| ext.eq_ignore_ascii_case(OsStr::new(e)))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_stem_raven_table() {
        let stem = annotation_stem(Path::new("rec1.Table.1.selections.txt"));
        assert_eq!(stem.as_deref(), Some("rec1"));
    }

    #[test]
    fn test_annotation_stem_lowercase_marker() {
        let stem = annotation_stem(Path::new("rec1.Table.1.selections.lower.txt"));
        assert_eq!(stem.as_deref(), Some("rec1"));
    }

    #[test]
    fn test_annotation_stem_plain_name() {
        let stem = annotation_stem(Path::new("rec1.txt"));
        assert_eq!(stem.as_deref(), Some("rec1"));
    }

    #[test]
    fn test_annotation_stem_keeps_non_numeric_table_marker() {
        // ".Table." followed by non-digits is part of the name
        let stem = annotation_stem(Path::new("rec1.Table.notes.txt"));
        assert_eq!(stem.as_deref(), Some("rec1.Table.notes"));
    }

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("rec.wav")));
        assert!(is_audio_file(Path::new("rec.FLAC")));
        assert!(!is_audio_file(Path::new("rec.txt")));
    }

    #[test]
    fn test_match_files_pairs_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let ann_dir = dir.path().join("annotations");
        let audio_dir = dir.path().join("audio");
        std::fs::create_dir_all(&ann_dir).unwrap();
        std::fs::create_dir_all(&audio_dir).unwrap();

        for name in ["rec1.Table.1.selections.txt", "rec2.Table.1.selections.txt"] {
            std::fs::write(ann_dir.join(name), "").unwrap();
        }
        std::fs::write(audio_dir.join("rec1.wav"), "").unwrap();
        std::fs::write(audio_dir.join("rec3.wav"), "").unwrap();

        let report = match_files(&ann_dir, &audio_dir).unwrap();
        assert_eq!(report.pairs.len(), 1);
        assert_eq!(report.pairs[0].stem, "rec1");
        assert_eq!(report.unmatched_annotations.len(), 1);
        assert_eq!(report.unmatched_audio.len(), 1);
    }

    #[test]
    fn test_match_files_zero_matches_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let ann_dir = dir.path().join("annotations");
        let audio_dir = dir.path().join("audio");
        std::fs::create_dir_all(&ann_dir).unwrap();
        std::fs::create_dir_all(&audio_dir).unwrap();

        std::fs::write(ann_dir.join("rec1.Table.1.selections.txt"), "").unwrap();
        std::fs::write(audio_dir.join("other.wav"), "").unwrap();

        let result = match_files(&ann_dir, &audio_dir);
        assert!(matches!(result, Err(Error::NoMatch)));
    }

    #[test]
    fn test_summary_counts() {
        let report = MatchReport {
            pairs: vec![
                RecordingPair {
                    stem: "a".to_string(),
                    annotation_path: PathBuf::from("a.txt"),
                    audio_path: PathBuf::from("a.wav"),
                },
                RecordingPair {
                    stem: "b".to_string(),
                    annotation_path: PathBuf::from("b.txt"),
                    audio_path: PathBuf::from("b.wav"),
                },
            ],
            unmatched_annotations: vec![PathBuf::from("c.txt")],
            unmatched_audio: vec![],
        };
        assert_eq!(
            report.summary(),
            "2 matched out of 3 annotation files and 2 audio files"
        );
    }
}
