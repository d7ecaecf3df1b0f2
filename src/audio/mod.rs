//! Audio decoding, resampling, and sub-clip extraction.

mod decode;
mod extract;
mod resample;

pub use decode::{DecodedAudio, decode_audio_file};
pub use extract::extract_window;
pub use resample::resample;
