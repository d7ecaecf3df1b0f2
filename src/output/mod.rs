//! Clip and label table output.

mod clips;
mod labels;
pub mod progress;

pub use clips::{ClipWriter, clip_filename, clip_name_decimals};
pub use labels::{LabelRow, LabelTable};
