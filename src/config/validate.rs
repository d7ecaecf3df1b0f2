//! Split configuration validation.
//!
//! Runs once before any file is touched; errors here are fatal.

use crate::config::SplitConfig;
use crate::error::{Error, Result};

/// Validate a split configuration.
pub fn validate_split_config(config: &SplitConfig) -> Result<()> {
    if !config.clip_duration.is_finite() || config.clip_duration <= 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "clip_duration must be positive, got {}",
                config.clip_duration
            ),
        });
    }

    if !config.clip_overlap.is_finite() || config.clip_overlap < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "clip_overlap must be non-negative, got {}",
                config.clip_overlap
            ),
        });
    }

    if config.clip_overlap >= config.clip_duration {
        return Err(Error::ConfigValidation {
            message: format!(
                "clip_overlap ({}) must be less than clip_duration ({})",
                config.clip_overlap, config.clip_duration
            ),
        });
    }

    if !config.min_label_length.is_finite() || config.min_label_length < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "min_label_length must be non-negative, got {}",
                config.min_label_length
            ),
        });
    }

    if config.sample_rate == Some(0) {
        return Err(Error::ConfigValidation {
            message: "sample_rate must be at least 1 Hz".to_string(),
        });
    }

    if config.label_column.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "label_column must not be empty".to_string(),
        });
    }

    if let Some(species) = &config.species
        && species.is_empty()
    {
        return Err(Error::ConfigValidation {
            message: "species list must contain at least one class".to_string(),
        });
    }

    Ok(())
}
