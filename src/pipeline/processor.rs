//! Single recording processing.

use tracing::{debug, info};

use crate::annotations::Annotation;
use crate::audio::{decode_audio_file, extract_window, resample};
use crate::config::SplitConfig;
use crate::error::Result;
use crate::matcher::RecordingPair;
use crate::output::{ClipWriter, LabelTable, clip_filename, clip_name_decimals};
use crate::split::{ClassSet, label_window, windows};

/// Per-recording processing counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordingOutcome {
    /// Windows labeled (before the labeled-clips-only filter).
    pub windows_labeled: usize,
    /// Windows dropped by the labeled-clips-only filter.
    pub windows_filtered: usize,
    /// Clip files written (zero in dry runs).
    pub clips_written: usize,
}

/// Process one matched recording: decode, resample, segment, label,
/// filter, and write.
///
/// Label rows are appended to `table` in ascending window order. When
/// `writer` is `None` (dry run) no audio is written but labeling
/// proceeds identically.
///
/// # Errors
///
/// Returns an error if the audio cannot be decoded or resampled, or a
/// clip file cannot be written.
pub fn process_recording(
    pair: &RecordingPair,
    annotations: &[Annotation],
    classes: &ClassSet,
    config: &SplitConfig,
    writer: Option<&ClipWriter>,
    table: &mut LabelTable,
) -> Result<RecordingOutcome> {
    info!("Processing: {}", pair.audio_path.display());

    let decoded = decode_audio_file(&pair.audio_path)?;
    debug!(
        "Decoded {:.1}s at {} Hz",
        decoded.duration_secs(),
        decoded.sample_rate
    );

    let sample_rate = config.sample_rate.unwrap_or(decoded.sample_rate);
    let samples = if sample_rate == decoded.sample_rate {
        decoded.samples
    } else {
        debug!(
            "Resampling from {} Hz to {} Hz",
            decoded.sample_rate, sample_rate
        );
        resample(decoded.samples, decoded.sample_rate, sample_rate)?
    };

    #[allow(clippy::cast_precision_loss)]
    let duration = samples.len() as f64 / f64::from(sample_rate);

    let decimals = clip_name_decimals(config.clip_duration - config.clip_overlap);
    let mut outcome = RecordingOutcome::default();

    for window in windows(
        duration,
        config.clip_duration,
        config.clip_overlap,
        config.final_clip,
    ) {
        let presence = label_window(&window, annotations, classes, config.min_label_length);
        outcome.windows_labeled += 1;

        if config.labeled_clips_only && !presence.iter().any(|&p| p) {
            outcome.windows_filtered += 1;
            continue;
        }

        let filename = clip_filename(&pair.stem, &window, decimals);

        if let Some(writer) = writer {
            let clip = extract_window(&samples, sample_rate, &window);
            writer.write_clip(&clip, sample_rate, &filename)?;
            outcome.clips_written += 1;
        }

        table.push(filename, presence);
    }

    debug!(
        "{}: {} windows, {} filtered, {} clips written",
        pair.stem, outcome.windows_labeled, outcome.windows_filtered, outcome.clips_written
    );

    Ok(outcome)
}
