//! Progress bar utilities for recording processing.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar spanning all matched recordings.
pub fn create_recording_progress(total_recordings: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_recordings == 0 {
        return None;
    }

    let pb = ProgressBar::new(total_recordings as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} recordings ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    Some(pb)
}

/// Increment a progress bar.
pub fn inc_progress(pb: Option<&ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}
