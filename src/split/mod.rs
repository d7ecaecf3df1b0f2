//! Recording segmentation and label aggregation.

mod labeler;
mod windows;

pub use labeler::{ClassSet, label_window};
pub use windows::{ClipWindow, ClipWindows, windows};
