//! # Module and Path Resolution
//!
//! Path-valued compiler options may name a module installed somewhere under
//! `node_modules` (`google-closure-library/closure/goog/base.js`) or a file
//! relative to the package that declared them (`src/**.js`). This module
//! turns either form into an absolute, slash-normalized location.
//!
//! ## Design
//!
//! Module lookup sits behind the **`ModuleResolver`** trait so the lookup
//! strategy can be swapped out. `NodeModulesResolver` walks outward through
//! `node_modules` directories the way Node does; `FilesystemOnly` never finds
//! a module and is used when lookup is disabled and in tests.
//!
//! `resolve_entry` combines the two steps: module lookup first, then the
//! project-relative fallback.

use std::path::{Path, PathBuf};

use log::trace;

use crate::package::{Package, MANIFEST_FILE};
use crate::path::{flatten_path, is_bare_request, split_exclusion, to_slash, with_exclusion};

/// Directory name searched for installed dependencies.
pub const MODULES_DIR: &str = "node_modules";

/// Trait for module lookup - allows swapping the strategy in tests
pub trait ModuleResolver: Send + Sync {
    /// Resolve `request` as an installed module, searching outward from
    /// `from_dir`. Returns `None` when no installed module matches.
    fn resolve_module(&self, request: &str, from_dir: &Path) -> Option<PathBuf>;

    /// Locate the directory of the installed package `name`, searching
    /// outward from `from_dir`.
    fn locate_package(&self, name: &str, from_dir: &Path) -> Option<PathBuf>;
}

/// Node-style lookup through `node_modules` directories of `from_dir` and
/// each of its ancestors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeModulesResolver;

impl NodeModulesResolver {
    pub fn new() -> Self {
        Self
    }

    /// Check one candidate location the way `require` would.
    fn try_candidate(candidate: &Path) -> Option<PathBuf> {
        if candidate.is_file() {
            return Some(candidate.to_path_buf());
        }

        let mut with_ext = candidate.as_os_str().to_owned();
        with_ext.push(".js");
        let with_ext = PathBuf::from(with_ext);
        if with_ext.is_file() {
            return Some(with_ext);
        }

        if candidate.is_dir() {
            let main = Package::from_dir(candidate).ok().and_then(|p| p.main);
            if let Some(main) = main {
                let main_path = candidate.join(main);
                if main_path.is_file() {
                    return Some(main_path);
                }
            }
            let index = candidate.join("index.js");
            if index.is_file() {
                return Some(index);
            }
        }

        None
    }
}

impl ModuleResolver for NodeModulesResolver {
    fn resolve_module(&self, request: &str, from_dir: &Path) -> Option<PathBuf> {
        if !is_bare_request(request) {
            return None;
        }
        from_dir
            .ancestors()
            .filter(|dir| dir.file_name().is_none_or(|name| name != MODULES_DIR))
            .find_map(|dir| Self::try_candidate(&dir.join(MODULES_DIR).join(request)))
    }

    fn locate_package(&self, name: &str, from_dir: &Path) -> Option<PathBuf> {
        from_dir
            .ancestors()
            .filter(|dir| dir.file_name().is_none_or(|n| n != MODULES_DIR))
            .map(|dir| dir.join(MODULES_DIR).join(name))
            .find(|candidate| candidate.join(MANIFEST_FILE).is_file())
    }
}

/// A resolver that never finds modules; every entry resolves relative to
/// its project directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemOnly;

impl ModuleResolver for FilesystemOnly {
    fn resolve_module(&self, _request: &str, _from_dir: &Path) -> Option<PathBuf> {
        None
    }

    fn locate_package(&self, _name: &str, _from_dir: &Path) -> Option<PathBuf> {
        None
    }
}

/// Resolve one path-valued entry declared by the package in `project_dir`.
///
/// A leading `!` is stripped before resolution and re-attached to the
/// result. Module lookup is tried first; otherwise the entry is joined onto
/// `project_dir`. Either way the result is flattened and uses `/`
/// separators. Resolution never fails: an entry pointing nowhere is passed
/// through for the compiler to report.
pub fn resolve_entry(resolver: &dyn ModuleResolver, entry: &str, project_dir: &Path) -> String {
    let (excluded, request) = split_exclusion(entry);

    let resolved = match resolver.resolve_module(request, project_dir) {
        Some(module_path) => flatten_path(&module_path),
        None => flatten_path(&project_dir.join(request)),
    };

    let resolved = with_exclusion(excluded, to_slash(&resolved));
    trace!("Resolved '{}' from {} to '{}'", entry, project_dir.display(), resolved);
    resolved
}
