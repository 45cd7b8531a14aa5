//! # Resolve Command Implementation
//!
//! Runs discovery, collection and merge for a project and prints the
//! resulting compiler options as a JSON object, ready to be handed to the
//! compiler's option parser.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use gcc_options::options::CompilerOptions;
use gcc_options::phases::orchestrator;

use super::load_config;

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Project directory containing the root package.json
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Path to a run configuration file (defaults to <project>/.gcc-options.yaml)
    #[arg(short, long, value_name = "FILE", env = "GCC_OPTIONS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the options to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print compact JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), &args.project)?;

    let options = orchestrator::execute(&config, &args.project).with_context(|| {
        format!(
            "Failed to resolve compiler options for {}",
            args.project.display()
        )
    })?;

    let rendered = render(&options, args.compact)?;
    match &args.output {
        Some(path) => std::fs::write(path, format!("{}\n", rendered))
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", rendered),
    }
    Ok(())
}

fn render(options: &CompilerOptions, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(options)?
    } else {
        serde_json::to_string_pretty(options)?
    };
    Ok(rendered)
}
