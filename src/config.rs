//! # Run Configuration
//!
//! This module defines the optional `.gcc-options.yaml` file that tunes a
//! run: the base options fragments are merged into and the limits of the
//! dependency walk.
//!
//! ```yaml
//! base:
//!   compilation_level: ADVANCED
//!   language_out: ECMASCRIPT5
//! max_depth: 8
//! dev_dependencies: false
//! module_lookup: true
//! ```
//!
//! Every key is optional. An empty file (or one holding only comments) is
//! the default configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::CompilerOptions;
use crate::phases::discovery::DiscoveryOptions;

/// Default name of the run configuration file.
pub const DEFAULT_CONFIG_FILE: &str = ".gcc-options.yaml";

const SUPPORTED_KEYS: &str = "base, max_depth, dev_dependencies, module_lookup";

/// Settings for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Options every fragment is merged into
    #[serde(default)]
    pub base: CompilerOptions,
    /// Maximum dependency depth to walk (root = 0)
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Follow the root package's devDependencies
    #[serde(default)]
    pub dev_dependencies: bool,
    /// Resolve path entries through node_modules before falling back to
    /// project-relative paths
    #[serde(default = "default_module_lookup")]
    pub module_lookup: bool,
}

fn default_module_lookup() -> bool {
    true
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base: CompilerOptions::new(),
            max_depth: None,
            dev_dependencies: false,
            module_lookup: default_module_lookup(),
        }
    }
}

impl RunConfig {
    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            max_depth: self.max_depth,
            dev_dependencies: self.dev_dependencies,
        }
    }
}

/// Parse a run configuration from YAML text.
pub fn parse(yaml: &str) -> Result<RunConfig> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml).map_err(|e| parse_error(&e))?;
    if value.is_null() {
        return Ok(RunConfig::default());
    }
    if !value.is_mapping() {
        return Err(Error::ConfigParse {
            message: "expected a mapping at the top level".to_string(),
            hint: Some(format!("Supported keys: {}", SUPPORTED_KEYS)),
        });
    }
    serde_yaml::from_value(value).map_err(|e| parse_error(&e))
}

/// Read and parse a run configuration file.
pub fn from_file(path: &Path) -> Result<RunConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

fn parse_error(error: &serde_yaml::Error) -> Error {
    let message = error.to_string();
    let hint = if message.contains("unknown field") {
        Some(format!("Supported keys: {}", SUPPORTED_KEYS))
    } else if message.contains("untagged enum OptionValue") {
        Some("Option values must be a boolean, number, string or list of strings".to_string())
    } else {
        None
    };
    Error::ConfigParse { message, hint }
}
