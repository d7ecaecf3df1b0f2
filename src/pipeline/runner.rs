//! Whole-run driver.
//!
//! Sequential processing: annotation tables are loaded and validated up
//! front, recordings are then processed one at a time in stem order,
//! windows in ascending time order. Label table rows follow that visit
//! order.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::annotations::{Annotation, load_annotation_table};
use crate::config::{OnAudioError, SplitConfig, validate_split_config};
use crate::constants::LABELS_FILENAME;
use crate::error::{Error, Result};
use crate::matcher::{RecordingPair, match_files};
use crate::output::{ClipWriter, LabelTable, progress};
use crate::split::ClassSet;

use super::process_recording;

/// One split run: input directories plus the validated options.
#[derive(Debug, Clone)]
pub struct SplitRequest {
    /// Directory of annotation tables.
    pub annotation_dir: PathBuf,
    /// Directory of source audio files.
    pub audio_dir: PathBuf,
    /// Destination directory for clips and `labels.csv`.
    pub output_dir: PathBuf,
    /// Split options.
    pub config: SplitConfig,
    /// Show a progress bar while processing.
    pub progress: bool,
}

/// Counters and the assembled label table for one run.
#[derive(Debug, Clone)]
pub struct SplitSummary {
    /// Matched annotation/audio pairs.
    pub matched: usize,
    /// Annotation files with no matching audio.
    pub unmatched_annotations: usize,
    /// Audio files with no matching annotation table.
    pub unmatched_audio: usize,
    /// Recordings fully processed.
    pub recordings_processed: usize,
    /// Recordings skipped because their audio could not be decoded.
    pub recordings_skipped: usize,
    /// Clip files written (zero in dry runs).
    pub clips_written: usize,
    /// The combined label table, in emission order.
    pub labels: LabelTable,
}

/// Run a complete split.
///
/// Validates the configuration, matches files, loads every annotation
/// table (failing fast on label problems before any audio is touched),
/// then processes each matched recording and writes `labels.csv` unless
/// this is a dry run.
///
/// # Errors
///
/// Returns an error on invalid configuration, zero matched pairs,
/// annotation label problems, or any audio/write failure not covered by
/// the skip-bad-audio policy.
pub fn run_split(request: &SplitRequest) -> Result<SplitSummary> {
    validate_split_config(&request.config)?;

    let report = match_files(&request.annotation_dir, &request.audio_dir)?;
    info!("{}", report.summary());

    // All tables are loaded before any audio so label errors surface
    // before anything is written.
    let loaded = load_all_annotations(&report.pairs, &request.config.label_column)?;

    let classes = request.config.species.as_ref().map_or_else(
        || ClassSet::from_annotations(loaded.iter().flat_map(|(_, anns)| anns.iter())),
        |species| ClassSet::from_labels(species.iter().cloned()),
    );
    info!(
        "Labeling {} class(es): {}",
        classes.len(),
        classes.iter().collect::<Vec<_>>().join(", ")
    );

    let writer = if request.config.dry_run {
        info!("Dry run: no files will be written");
        None
    } else {
        Some(ClipWriter::new(request.output_dir.clone())?)
    };

    let pb = progress::create_recording_progress(loaded.len(), request.progress);

    let mut table = LabelTable::new(classes.clone());
    let mut processed = 0;
    let mut skipped = 0;
    let mut clips_written = 0;

    for (pair, annotations) in &loaded {
        match process_recording(
            pair,
            annotations,
            &classes,
            &request.config,
            writer.as_ref(),
            &mut table,
        ) {
            Ok(outcome) => {
                processed += 1;
                clips_written += outcome.clips_written;
            }
            Err(e) if is_audio_error(&e) && request.config.on_audio_error == OnAudioError::Skip => {
                warn!("Skipping {}: {e}", pair.audio_path.display());
                skipped += 1;
            }
            Err(e) => {
                progress::finish_progress(pb, "Failed");
                return Err(e);
            }
        }
        progress::inc_progress(pb.as_ref());
    }

    progress::finish_progress(pb, "Complete");

    if !request.config.dry_run {
        let labels_path = request.output_dir.join(LABELS_FILENAME);
        table.write_csv(&labels_path)?;
        info!(
            "Wrote {} label row(s) to {}",
            table.len(),
            labels_path.display()
        );
    }

    Ok(SplitSummary {
        matched: report.pairs.len(),
        unmatched_annotations: report.unmatched_annotations.len(),
        unmatched_audio: report.unmatched_audio.len(),
        recordings_processed: processed,
        recordings_skipped: skipped,
        clips_written,
        labels: table,
    })
}

/// Load each matched pair's annotation table.
fn load_all_annotations(
    pairs: &[RecordingPair],
    label_column: &str,
) -> Result<Vec<(RecordingPair, Vec<Annotation>)>> {
    pairs
        .iter()
        .map(|pair| {
            let annotations = load_annotation_table(&pair.annotation_path, label_column)?;
            Ok((pair.clone(), annotations))
        })
        .collect()
}

/// Whether an error is one the skip-bad-audio policy covers.
fn is_audio_error(error: &Error) -> bool {
    matches!(
        error,
        Error::AudioOpen { .. }
            | Error::AudioDecode { .. }
            | Error::NoAudioTracks { .. }
            | Error::Resample { .. }
    )
}
