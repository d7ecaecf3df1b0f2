//! WAV sub-clip writing.
//!
//! Writes extracted clip windows as 16-bit mono WAV files under the
//! destination directory, with deterministic names encoding the source
//! stem and window bounds.

use std::fs;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter as HoundWriter};

use crate::constants::{CLIP_NAME_DECIMALS, MAX_CLIP_NAME_DECIMALS};
use crate::error::{Error, Result};
use crate::split::ClipWindow;

/// Writes clip windows to WAV files.
pub struct ClipWriter {
    output_dir: PathBuf,
}

impl ClipWriter {
    /// Create a clip writer for the given destination directory.
    ///
    /// The directory is created if absent.
    pub fn new(output_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&output_dir).map_err(|e| Error::OutputDirCreate {
            path: output_dir.clone(),
            source: e,
        })?;
        Ok(Self { output_dir })
    }

    /// Write one clip's samples under the given filename, returning the
    /// path written.
    ///
    /// # Errors
    ///
    /// Returns an error if the WAV file cannot be written.
    pub fn write_clip(
        &self,
        samples: &[f32],
        sample_rate: u32,
        filename: &str,
    ) -> Result<PathBuf> {
        let path = self.output_dir.join(filename);
        write_wav_file(&path, samples, sample_rate)?;
        Ok(path)
    }
}

/// Deterministic clip filename: `{stem}_{start}s_{end}s.wav`.
pub fn clip_filename(stem: &str, window: &ClipWindow, decimals: usize) -> String {
    format!(
        "{}_{:.decimals$}s_{:.decimals$}s.wav",
        sanitize_filename(stem),
        window.start,
        window.end,
    )
}

/// Decimal places needed to keep clip names distinct for a window step.
///
/// One place suffices for steps of 0.1s and up. Finer steps get enough
/// places that the rounding grid is no coarser than the step itself, so
/// starts one step apart never render identically.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
pub fn clip_name_decimals(step: f64) -> usize {
    let mut decimals = CLIP_NAME_DECIMALS;
    while decimals < MAX_CLIP_NAME_DECIMALS && 10f64.powi(-(decimals as i32)) > step {
        decimals += 1;
    }
    decimals
}

/// Sanitize a string for use as a filename.
///
/// Replaces characters that are invalid in filenames across platforms
/// and prevents path traversal.
fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    sanitized.replace("..", "__")
}

/// Write samples to a 16-bit mono WAV file.
fn write_wav_file(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = HoundWriter::create(path, spec).map_err(|e| Error::WavWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    for &sample in samples {
        #[allow(clippy::cast_possible_truncation)]
        let sample_i16 = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer.write_sample(sample_i16).map_err(|e| Error::WavWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    writer.finalize().map_err(|e| Error::WavWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
