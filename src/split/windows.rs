//! Clip window generation.
//!
//! Divides a recording duration into fixed-length, optionally overlapping
//! half-open windows `[start, end)`. Windows are yielded lazily in
//! ascending time order; cloning the iterator restarts the sequence.

use crate::config::FinalClip;

/// Tolerance for accumulated float error in `i * step + clip_duration`.
/// A window whose end overshoots the duration by no more than this is
/// still a full window, not a trailing partial.
const EPSILON: f64 = 1e-9;

/// One half-open clip window `[start, end)` in seconds from recording start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds.
    pub end: f64,
}

impl ClipWindow {
    /// Window length in seconds.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// Lazy iterator over the clip windows of one recording.
///
/// Window `i` starts at `i * (clip_duration - overlap)`. Iteration stops
/// at the first window whose nominal end exceeds the recording duration;
/// that window is the final window and the configured policy decides its
/// fate. The full sequence is deterministic given
/// `(duration, clip_duration, overlap, policy)`.
#[derive(Debug, Clone)]
pub struct ClipWindows {
    duration: f64,
    clip_duration: f64,
    step: f64,
    policy: FinalClip,
    index: u64,
    done: bool,
}

/// Clip windows for a recording of `duration` seconds.
///
/// Assumes a validated configuration: `clip_duration > 0` and
/// `0 <= overlap < clip_duration`.
pub fn windows(
    duration: f64,
    clip_duration: f64,
    overlap: f64,
    policy: FinalClip,
) -> ClipWindows {
    debug_assert!(clip_duration > 0.0);
    debug_assert!((0.0..clip_duration).contains(&overlap));

    ClipWindows {
        duration,
        clip_duration,
        step: clip_duration - overlap,
        policy,
        index: 0,
        done: false,
    }
}

impl Iterator for ClipWindows {
    type Item = ClipWindow;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<ClipWindow> {
        if self.done {
            return None;
        }

        let start = self.index as f64 * self.step;
        if start >= self.duration - EPSILON {
            self.done = true;
            return None;
        }
        self.index += 1;

        let end = start + self.clip_duration;
        if end <= self.duration + EPSILON {
            return Some(ClipWindow { start, end });
        }

        // Trailing partial window
        self.done = true;
        match self.policy {
            FinalClip::Truncate => Some(ClipWindow {
                start,
                end: self.duration,
            }),
            FinalClip::Extend => Some(ClipWindow {
                start: (self.duration - self.clip_duration).max(0.0),
                end: self.duration,
            }),
            FinalClip::Drop => None,
            FinalClip::Pad => Some(ClipWindow { start, end }),
        }
    }
}
