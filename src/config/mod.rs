//! Configuration loading, types, and validation.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{load_config_file, load_default_config, save_config, save_default_config};
pub use paths::config_file_path;
pub use types::{Config, DefaultsConfig, FinalClip, OnAudioError, SplitConfig};
pub use validate::validate_split_config;
