//! ravensplit - split Raven-annotated recordings into labeled training clips.
//!
//! Pairs Raven selection tables with audio files by filename stem,
//! segments each recording into fixed-duration windows, computes a
//! binary class-presence row per window, and writes the clips plus a
//! combined `labels.csv`.

#![warn(missing_docs)]

pub mod annotations;
pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod matcher;
pub mod output;
pub mod pipeline;
pub mod split;

use clap::{CommandFactory, Parser};
use cli::{Cli, Command, ConfigAction, SplitArgs};
use config::{
    Config, OnAudioError, SplitConfig, config_file_path, load_default_config, save_default_config,
};
use pipeline::{SplitRequest, run_split};
use std::path::PathBuf;
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for the ravensplit CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.split.verbose, cli.split.quiet);

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    // Show help if invoked with nothing to do
    if cli.split.is_empty_invocation() {
        let mut command = Cli::command();
        let _ = command.print_help();
        return Ok(());
    }

    let config = load_default_config()?;
    split_recordings(&cli.split, &config)
}

/// Run a split with CLI arguments over config-file defaults.
fn split_recordings(args: &SplitArgs, config: &Config) -> Result<()> {
    let annotation_dir = required_dir(args.annotations.clone(), "-a/--annotations")?;
    let audio_dir = required_dir(args.recordings.clone(), "-r/--recordings")?;
    let output_dir = required_dir(args.output.clone(), "-o/--output")?;

    let clip_duration = args
        .clip_duration
        .or(config.defaults.clip_duration)
        .ok_or_else(|| Error::ConfigValidation {
            message: "no clip duration specified (use -d or set defaults.clip_duration in config)"
                .to_string(),
        })?;

    let split_config = SplitConfig {
        clip_duration,
        clip_overlap: args.clip_overlap.unwrap_or(config.defaults.clip_overlap),
        final_clip: args.final_clip.unwrap_or(config.defaults.final_clip),
        min_label_length: args
            .min_label_length
            .unwrap_or(config.defaults.min_label_length),
        labeled_clips_only: args.labeled_only,
        species: args.species.clone(),
        sample_rate: args.sample_rate.or(config.defaults.sample_rate),
        label_column: args
            .label_column
            .clone()
            .unwrap_or_else(|| config.defaults.label_column.clone()),
        dry_run: args.dry_run,
        on_audio_error: if args.skip_bad_audio {
            OnAudioError::Skip
        } else {
            OnAudioError::Abort
        },
    };

    let request = SplitRequest {
        annotation_dir,
        audio_dir,
        output_dir,
        config: split_config,
        progress: !args.quiet && !args.no_progress,
    };

    let summary = run_split(&request)?;

    info!(
        "Complete: {} recording(s) processed, {} skipped, {} clip(s) written, {} label row(s)",
        summary.recordings_processed,
        summary.recordings_skipped,
        summary.clips_written,
        summary.labels.len()
    );
    if summary.unmatched_annotations + summary.unmatched_audio > 0 {
        warn!(
            "{} annotation file(s) and {} audio file(s) had no counterpart",
            summary.unmatched_annotations, summary.unmatched_audio
        );
    }

    Ok(())
}

fn required_dir(path: Option<PathBuf>, flag: &str) -> Result<PathBuf> {
    path.ok_or_else(|| Error::ConfigValidation {
        message: format!("missing required {flag} directory"),
    })
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

#[allow(clippy::print_stdout)]
fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Config { action } => match action {
            ConfigAction::Init => {
                let path = config_file_path()?;
                if path.exists() {
                    println!("Configuration file already exists: {}", path.display());
                } else {
                    let saved_path = save_default_config(&Config::default())?;
                    println!("Created configuration file: {}", saved_path.display());
                }
                Ok(())
            }
            ConfigAction::Show => {
                let config = load_default_config()?;
                println!("{config:#?}");
                Ok(())
            }
            ConfigAction::Path => {
                let path = config_file_path()?;
                println!("{}", path.display());
                Ok(())
            }
        },
    }
}
