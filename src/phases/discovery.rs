//! Phase 1: Package Discovery
//!
//! Builds the package dependency tree the collector walks.
//!
//! ## Process
//!
//! 1.  **Root manifest**: `<project>/package.json` is read. Failing to read it
//!     aborts the run; there is nothing to build without it.
//!
//! 2.  **Dependency lookup**: for every package, each declared dependency is
//!     located through `node_modules`, searching outward from the dependent's
//!     own directory, and its manifest is loaded. Manifests of siblings are
//!     loaded in parallel; children keep the sorted order of their names.
//!
//! 3.  **Cycle and error handling**: a dependency whose directory is already
//!     on the current path is a cycle and is skipped. A dependency that is not
//!     installed, or whose manifest cannot be read, is reported and skipped,
//!     so a partially installed tree still produces options.
//!
//! The result is a `PackageTree` rooted at the project, with depths
//! counted from 0.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use rayon::prelude::*;

use super::{PackageNode, PackageTree};
use crate::error::Result;
use crate::package::Package;
use crate::path::flatten_path;
use crate::resolver::ModuleResolver;

/// Limits applied while walking dependencies.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Do not descend below this depth (root = 0).
    pub max_depth: Option<usize>,
    /// Also follow the root package's `devDependencies`.
    pub dev_dependencies: bool,
}

/// Executes the discovery phase from `project_dir`.
pub fn execute(
    project_dir: &Path,
    options: &DiscoveryOptions,
    resolver: &dyn ModuleResolver,
) -> Result<PackageTree> {
    let project_dir = flatten_path(&std::path::absolute(project_dir)?);
    let package = Package::from_dir(&project_dir)?;

    let mut path = vec![project_dir.clone()];
    let root = build_node(package, project_dir, 0, options, resolver, &mut path);
    Ok(PackageTree::new(root))
}

/// Names of the dependencies to follow from a package at `depth`.
fn dependency_names(package: &Package, depth: usize, options: &DiscoveryOptions) -> Vec<String> {
    let mut names: Vec<String> = package.dependencies.keys().cloned().collect();
    if depth == 0 && options.dev_dependencies {
        names.extend(package.dev_dependencies.keys().cloned());
        names.sort();
        names.dedup();
    }
    names
}

/// Recursively build the node for `package` and its dependencies.
///
/// `path` holds the directories from the root to this node and is used for
/// cycle detection.
fn build_node(
    package: Package,
    dir: PathBuf,
    depth: usize,
    options: &DiscoveryOptions,
    resolver: &dyn ModuleResolver,
    path: &mut Vec<PathBuf>,
) -> PackageNode {
    let mut node = PackageNode::new(package, dir, depth);

    if options.max_depth.is_some_and(|max| depth >= max) {
        return node;
    }

    let names = dependency_names(&node.package, depth, options);

    // Locate and load all dependency manifests of this level in parallel
    let loaded: Vec<(String, Option<(PathBuf, Result<Package>)>)> = names
        .par_iter()
        .map(|name| {
            let found = resolver.locate_package(name, &node.dir).map(|dir| {
                let dir = flatten_path(&dir);
                let manifest = Package::from_dir(&dir);
                (dir, manifest)
            });
            (name.clone(), found)
        })
        .collect();

    for (name, found) in loaded {
        match found {
            None => warn!(
                "Dependency '{}' of {} is not installed, skipping",
                name,
                node.package.id()
            ),
            Some((_, Err(e))) => warn!(
                "Skipping dependency '{}' of {}: {}",
                name,
                node.package.id(),
                e
            ),
            Some((child_dir, Ok(child))) => {
                if path.contains(&child_dir) {
                    debug!(
                        "Skipping cyclic dependency {} -> {}",
                        node.package.id(),
                        child.id()
                    );
                    continue;
                }

                path.push(child_dir.clone());
                let child_node = build_node(child, child_dir, depth + 1, options, resolver, path);
                path.pop();

                node.add_child(child_node);
            }
        }
    }

    node
}
