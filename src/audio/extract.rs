//! Sub-clip extraction from decoded audio.

use crate::split::ClipWindow;

/// Extract the samples covered by a clip window.
///
/// Sample indices are rounded from the window's second offsets. The
/// result always has exactly the window's nominal length: windows that
/// reach past the end of the audio (the `pad` final-clip policy) are
/// zero-filled.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn extract_window(samples: &[f32], sample_rate: u32, window: &ClipWindow) -> Vec<f32> {
    let rate = f64::from(sample_rate);
    let start = ((window.start * rate).round() as usize).min(samples.len());
    let nominal_len = (window.length() * rate).round() as usize;
    let end = (start + nominal_len).min(samples.len());

    let mut clip = samples[start..end].to_vec();
    clip.resize(nominal_len, 0.0);
    clip
}
