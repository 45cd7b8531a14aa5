//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_manifest(".", manifests::APP);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// `package.json` snippets for building project trees.
#[allow(dead_code)]
pub mod manifests {
    /// Root package depending on `lib`, with its own compiler block.
    pub const APP: &str = r#"{
  "name": "app",
  "version": "1.0.0",
  "dependencies": {"lib": "^2.0.0"},
  "build": {
    "gcc": {
      "js": ["src/**.js", "!src/**_test.js"],
      "define": ["DEBUG=true", "APP_NAME=demo"],
      "language_out": "ECMASCRIPT5",
      "jscomp_off": ["checkVars"]
    }
  }
}"#;

    /// Dependency overriding a define and contributing externs.
    pub const LIB: &str = r#"{
  "name": "lib",
  "version": "2.1.0",
  "dependencies": {"plain": "1"},
  "build": {
    "gcc": {
      "js": "index.js",
      "externs": ["externs/lib.js"],
      "define": "DEBUG=false",
      "jscomp_off": "uselessCode"
    }
  }
}"#;

    /// Dependency without a compiler block.
    pub const PLAIN: &str = r#"{"name": "plain", "version": "1.0.0"}"#;

    /// Root package without dependencies or compiler block.
    pub const EMPTY: &str = r#"{"name": "empty", "version": "0.1.0"}"#;
}

/// A test fixture that provides a temporary project directory.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_manifest(".", manifests::APP)
///     .with_manifest("node_modules/lib", manifests::LIB);
///
/// let mut cmd = fixture.command();
/// cmd.arg("resolve").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// A root package with one decorated dependency and one plain one.
    #[allow(dead_code)]
    pub fn with_standard_project(self) -> Self {
        self.with_manifest(".", manifests::APP)
            .with_manifest("node_modules/lib", manifests::LIB)
            .with_manifest("node_modules/plain", manifests::PLAIN)
    }

    /// Write `package.json` into `dir` (relative to the fixture root).
    pub fn with_manifest(self, dir: &str, content: &str) -> Self {
        self.temp_dir
            .child(dir)
            .child("package.json")
            .write_str(content)
            .expect("Failed to write manifest");
        self
    }

    /// Add a `.gcc-options.yaml` configuration file with the given content.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".gcc-options.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Root directory as the `/`-separated prefix resolved entries start
    /// with when the binary runs inside the fixture.
    #[allow(dead_code)]
    pub fn slash_root(&self) -> String {
        let canonical = self.path().canonicalize().expect("Failed to canonicalize path");
        canonical.to_string_lossy().replace('\\', "/")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gcc-options");
        cmd.current_dir(self.path());
        cmd.env_remove("GCC_OPTIONS_CONFIG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_manifest() {
        let fixture = TestFixture::new().with_manifest("node_modules/lib", manifests::LIB);
        assert!(fixture.path().join("node_modules/lib/package.json").exists());
    }

    #[test]
    fn test_manifests_are_valid_json() {
        for manifest in [manifests::APP, manifests::LIB, manifests::PLAIN, manifests::EMPTY] {
            let parsed: Result<serde_json::Value, _> = serde_json::from_str(manifest);
            assert!(parsed.is_ok(), "Invalid manifest: {}", manifest);
        }
    }
}
