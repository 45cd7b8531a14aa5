//! Package manifest model
//!
//! A package is described by its `package.json`. Only a handful of fields
//! matter here: its identity, its declared dependencies (used by the tree
//! walk) and the compiler block nested under `build.gcc`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::options::CompilerOptions;

/// Name of the manifest file inside a package directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Namespace under which a package declares its compiler options:
/// `{"build": {"gcc": {...}}}`.
pub const BUILD_KEY: &str = "build";
pub const COMPILER_KEY: &str = "gcc";

/// Identity of a package within a run (`name@version`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId {
    pub name: String,
    pub version: String,
}

impl PackageId {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// A decoded `package.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
    /// Kept raw: `build` is shared with other tools and only its `gcc` member
    /// is interpreted here.
    #[serde(default)]
    pub build: Option<serde_json::Value>,
}

impl Package {
    /// Build a package with an identity and nothing else.
    pub fn named(name: &str, version: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            version: Some(version.to_string()),
            ..Self::default()
        }
    }

    /// Attach a compiler block, replacing any existing `build` section.
    pub fn with_compiler_options(mut self, options: &CompilerOptions) -> Self {
        let mut build = serde_json::Map::new();
        build.insert(
            COMPILER_KEY.to_string(),
            serde_json::to_value(options).unwrap_or(serde_json::Value::Null),
        );
        self.build = Some(serde_json::Value::Object(build));
        self
    }

    pub fn id(&self) -> PackageId {
        PackageId::new(
            self.name.as_deref().unwrap_or("(unnamed)"),
            self.version.as_deref().unwrap_or("0.0.0"),
        )
    }

    /// Decode a manifest from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and decode `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Manifest {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| Error::Manifest {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Read `<dir>/package.json`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        Self::from_file(&dir.join(MANIFEST_FILE))
    }

    /// The package's compiler block, if it declares one.
    ///
    /// A block that does not decode as compiler options is reported and
    /// treated as absent.
    pub fn compiler_options(&self) -> Option<CompilerOptions> {
        let block = self.build.as_ref()?.get(COMPILER_KEY)?;
        if block.is_null() {
            return None;
        }
        match CompilerOptions::deserialize(block) {
            Ok(options) => Some(options),
            Err(e) => {
                warn!(
                    "Ignoring malformed {}.{} block in {}: {}",
                    BUILD_KEY,
                    COMPILER_KEY,
                    self.id(),
                    e
                );
                None
            }
        }
    }
}
