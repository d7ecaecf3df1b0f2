//! Configuration type definitions.

use crate::constants::{DEFAULT_CLIP_OVERLAP, DEFAULT_LABEL_COLUMN, DEFAULT_MIN_LABEL_LENGTH};
use serde::{Deserialize, Serialize};

/// Complete application configuration loaded from the TOML config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default split settings, overridden by CLI flags.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Default split settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Clip duration in seconds. Required either here or on the command line.
    pub clip_duration: Option<f64>,

    /// Clip overlap in seconds.
    pub clip_overlap: f64,

    /// Final-clip policy for the trailing partial window.
    pub final_clip: FinalClip,

    /// Minimum annotation/window overlap in seconds for a class
    /// to count as present.
    pub min_label_length: f64,

    /// Target sample rate for written clips (None = keep source rate).
    pub sample_rate: Option<u32>,

    /// Name of the label column in annotation tables.
    pub label_column: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            clip_duration: None,
            clip_overlap: DEFAULT_CLIP_OVERLAP,
            final_clip: FinalClip::default(),
            min_label_length: DEFAULT_MIN_LABEL_LENGTH,
            sample_rate: None,
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
        }
    }
}

/// Policy for the trailing window of a recording that would extend
/// past the end of the audio.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FinalClip {
    /// Clamp the final window's end to the recording duration.
    #[default]
    Truncate,
    /// Shift the final window's start back so it ends at the recording
    /// duration, keeping the full clip length where possible.
    Extend,
    /// Omit the final partial window entirely.
    Drop,
    /// Keep the final window at full length; audio past the end of the
    /// recording is zero-filled.
    Pad,
}

impl std::fmt::Display for FinalClip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Truncate => write!(f, "truncate"),
            Self::Extend => write!(f, "extend"),
            Self::Drop => write!(f, "drop"),
            Self::Pad => write!(f, "pad"),
        }
    }
}

impl std::str::FromStr for FinalClip {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "extend" => Ok(Self::Extend),
            "drop" => Ok(Self::Drop),
            "pad" => Ok(Self::Pad),
            other => Err(format!("unknown final-clip policy: {other}")),
        }
    }
}

/// Policy for a recording whose audio cannot be opened or decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnAudioError {
    /// Abort the whole run on the first bad recording.
    #[default]
    Abort,
    /// Skip the bad recording with a warning and continue.
    Skip,
}

/// Immutable, validated settings for a single split run.
///
/// Collapses the config-file defaults and CLI overrides into one value
/// passed through the pipeline; nothing in here is mutated after
/// validation.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Clip duration in seconds.
    pub clip_duration: f64,
    /// Clip overlap in seconds.
    pub clip_overlap: f64,
    /// Final-clip policy.
    pub final_clip: FinalClip,
    /// Minimum annotation/window overlap for class presence.
    pub min_label_length: f64,
    /// Emit only windows with at least one class present.
    pub labeled_clips_only: bool,
    /// Restrict label columns to these classes (lowercased). None = all
    /// classes observed across the loaded annotations.
    pub species: Option<Vec<String>>,
    /// Target sample rate for written clips.
    pub sample_rate: Option<u32>,
    /// Name of the label column in annotation tables.
    pub label_column: String,
    /// Generate windows and labels without writing any files.
    pub dry_run: bool,
    /// Policy for unreadable or corrupt audio files.
    pub on_audio_error: OnAudioError,
}
