//! CLI argument definitions.

use crate::config::FinalClip;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Split Raven-annotated recordings into fixed-duration labeled clips.
#[derive(Debug, Parser)]
#[command(name = "ravensplit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for the split run.
    #[command(flatten)]
    pub split: SplitArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the split run.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct SplitArgs {
    /// Directory of Raven selection tables.
    #[arg(short, long, env = "RAVENSPLIT_ANNOTATIONS")]
    pub annotations: Option<PathBuf>,

    /// Directory of source audio files.
    #[arg(short, long, env = "RAVENSPLIT_RECORDINGS")]
    pub recordings: Option<PathBuf>,

    /// Destination directory for clips and the label table.
    #[arg(short, long, env = "RAVENSPLIT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Clip duration in seconds.
    #[arg(short = 'd', long, value_parser = parse_positive_seconds,
          env = "RAVENSPLIT_CLIP_DURATION")]
    pub clip_duration: Option<f64>,

    /// Overlap between consecutive clips in seconds.
    #[arg(long, value_parser = parse_non_negative_seconds,
          env = "RAVENSPLIT_CLIP_OVERLAP")]
    pub clip_overlap: Option<f64>,

    /// Policy for the trailing partial window of each recording.
    #[arg(long, value_enum, env = "RAVENSPLIT_FINAL_CLIP")]
    pub final_clip: Option<FinalClip>,

    /// Write only clips with at least one class present.
    #[arg(long)]
    pub labeled_only: bool,

    /// Minimum annotation/window overlap in seconds for a class
    /// to count as present.
    #[arg(long, value_parser = parse_non_negative_seconds,
          env = "RAVENSPLIT_MIN_LABEL_LENGTH")]
    pub min_label_length: Option<f64>,

    /// Restrict label columns to these classes (comma-separated).
    #[arg(long, value_delimiter = ',', env = "RAVENSPLIT_SPECIES")]
    pub species: Option<Vec<String>>,

    /// Resample written clips to this rate in Hz.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..),
          env = "RAVENSPLIT_SAMPLE_RATE")]
    pub sample_rate: Option<u32>,

    /// Name of the label column in annotation tables.
    #[arg(long, env = "RAVENSPLIT_LABEL_COLUMN")]
    pub label_column: Option<String>,

    /// Generate windows and labels without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip recordings whose audio cannot be decoded instead of aborting.
    #[arg(long)]
    pub skip_bad_audio: bool,

    /// Suppress the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Suppress progress output and non-warning logs.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SplitArgs {
    /// Whether the user supplied anything at all for a split run.
    pub fn is_empty_invocation(&self) -> bool {
        self.annotations.is_none() && self.recordings.is_none() && self.output.is_none()
    }
}

/// Parse a strictly positive seconds value.
fn parse_positive_seconds(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(format!("duration must be positive, got {value}"));
    }

    Ok(value)
}

/// Parse a non-negative seconds value.
fn parse_non_negative_seconds(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format!("value must be non-negative, got {value}"));
    }

    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_seconds() {
        assert_eq!(parse_positive_seconds("5.0").ok(), Some(5.0));
        assert_eq!(parse_positive_seconds("0.5").ok(), Some(0.5));
        assert!(parse_positive_seconds("0").is_err());
        assert!(parse_positive_seconds("-2").is_err());
        assert!(parse_positive_seconds("abc").is_err());
    }

    #[test]
    fn test_parse_non_negative_seconds() {
        assert_eq!(parse_non_negative_seconds("0").ok(), Some(0.0));
        assert_eq!(parse_non_negative_seconds("1.5").ok(), Some(1.5));
        assert!(parse_non_negative_seconds("-0.1").is_err());
        assert!(parse_non_negative_seconds("inf").is_err());
    }

    #[test]
    fn test_cli_parse_simple() {
        let cli = Cli::try_parse_from([
            "ravensplit",
            "-a",
            "annotations",
            "-r",
            "audio",
            "-o",
            "clips",
            "-d",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.split.clip_duration, Some(5.0));
        assert_eq!(cli.split.annotations, Some(PathBuf::from("annotations")));
        assert!(!cli.split.is_empty_invocation());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "ravensplit",
            "-a",
            "ann",
            "-r",
            "rec",
            "-o",
            "out",
            "-d",
            "3",
            "--clip-overlap",
            "1.5",
            "--final-clip",
            "drop",
            "--species",
            "woth,eato",
            "--labeled-only",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.split.clip_overlap, Some(1.5));
        assert_eq!(cli.split.final_clip, Some(FinalClip::Drop));
        assert_eq!(
            cli.split.species,
            Some(vec!["woth".to_string(), "eato".to_string()])
        );
        assert!(cli.split.labeled_only);
        assert!(cli.split.quiet);
    }

    #[test]
    fn test_cli_rejects_negative_duration() {
        let cli = Cli::try_parse_from(["ravensplit", "-d", "-5"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_rejects_zero_sample_rate() {
        let cli = Cli::try_parse_from(["ravensplit", "--sample-rate", "0"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["ravensplit", "config", "show"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_empty_invocation_detected() {
        let cli = Cli::try_parse_from(["ravensplit"]).unwrap();
        assert!(cli.split.is_empty_invocation());
    }
}
