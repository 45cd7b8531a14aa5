//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `gcc-options` command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `gcc_options` library.

pub mod completions;
pub mod resolve;
pub mod tree;

use anyhow::{Context, Result};
use std::path::Path;

use gcc_options::config::{self, RunConfig, DEFAULT_CONFIG_FILE};

/// Load the run configuration for `project`.
///
/// An explicit `config` path must exist. Without one, `.gcc-options.yaml`
/// in the project directory is used when present, and the defaults
/// otherwise.
pub fn load_config(config: Option<&Path>, project: &Path) -> Result<RunConfig> {
    match config {
        Some(path) => config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let path = project.join(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                config::from_file(&path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))
            } else {
                Ok(RunConfig::default())
            }
        }
    }
}
