//! Audio resampling using rubato.

use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

const CHUNK_SIZE: usize = 1024;

/// Resample mono audio to the target sample rate.
///
/// Returns the input unchanged if already at the target rate.
pub fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(samples);
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        1,
        1,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let frames_per_chunk = resampler.input_frames_next();
    let mut output = Vec::with_capacity(scaled_len(samples.len(), from_rate, to_rate) + CHUNK_SIZE);

    let mut pos = 0;
    while pos + frames_per_chunk <= samples.len() {
        let resampled = process_chunk(&mut resampler, &samples[pos..pos + frames_per_chunk])?;
        output.extend_from_slice(&resampled);
        pos += frames_per_chunk;
    }

    // Trailing partial chunk: zero-pad the input, keep only the
    // proportional share of the output.
    if pos < samples.len() {
        let remaining = samples.len() - pos;
        let mut padded = samples[pos..].to_vec();
        padded.resize(frames_per_chunk, 0.0);

        let resampled = process_chunk(&mut resampler, &padded)?;
        let keep = scaled_len(remaining, from_rate, to_rate).min(resampled.len());
        output.extend_from_slice(&resampled[..keep]);
    }

    Ok(output)
}

fn process_chunk(
    resampler: &mut Fft<f32>,
    chunk: &[f32],
) -> Result<Vec<f32>> {
    let input = SequentialSlice::new(chunk, 1, chunk.len()).map_err(|e| Error::Resample {
        reason: format!("failed to create input adapter: {e}"),
    })?;

    let resampled = resampler
        .process(&input, 0, None)
        .map_err(|e| Error::Resample {
            reason: e.to_string(),
        })?;

    Ok(resampled.take_data())
}

/// Frame count scaled by the rate ratio, rounded up.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn scaled_len(frames: usize, from_rate: u32, to_rate: u32) -> usize {
    ((frames as f64) * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize
}
