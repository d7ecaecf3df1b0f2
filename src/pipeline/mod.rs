//! Sequential split pipeline.

mod processor;
mod runner;

pub use processor::{RecordingOutcome, process_recording};
pub use runner::{SplitRequest, SplitSummary, run_split};
