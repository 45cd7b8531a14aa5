//! Orchestrator for a complete run
//!
//! This module coordinates the phases to provide a clean API for turning a
//! project directory into its effective compiler options.

use std::path::Path;

use log::info;

use super::collect::Collector;
use super::{discovery, merge, PackageTree};
use crate::config::RunConfig;
use crate::error::Result;
use crate::options::CompilerOptions;
use crate::precedence::DepthPrecedence;
use crate::resolver::{FilesystemOnly, ModuleResolver, NodeModulesResolver};
use crate::session::MergeSession;

/// Pick the resolver for path-valued option entries.
///
/// Only entry resolution honours `module_lookup`. Dependencies are always
/// located through `node_modules`, otherwise disabling lookup would silently
/// drop every dependency's options.
pub fn resolver_for(config: &RunConfig) -> Box<dyn ModuleResolver> {
    if config.module_lookup {
        Box::new(NodeModulesResolver::new())
    } else {
        Box::new(FilesystemOnly)
    }
}

/// Execute a complete run with a fresh session.
///
/// 1. Discover the package tree under `project_dir`
/// 2. Collect every package's fragment in pre-order
/// 3. Merge the fragments into a copy of `config.base`
pub fn execute(config: &RunConfig, project_dir: &Path) -> Result<CompilerOptions> {
    let mut session = MergeSession::new();
    execute_with(&mut session, config, project_dir)
}

/// Execute a complete run reusing `session`.
///
/// The session is reset first so nothing leaks in from a previous run. It
/// is left holding this run's fragments and defines afterwards.
pub fn execute_with(
    session: &mut MergeSession,
    config: &RunConfig,
    project_dir: &Path,
) -> Result<CompilerOptions> {
    session.reset();

    // Phase 1: Discovery
    let tree = discovery::execute(
        project_dir,
        &config.discovery_options(),
        &NodeModulesResolver::new(),
    )?;

    // Phase 2: Collection
    let collector = Collector::new(resolver_for(config), Box::new(DepthPrecedence));
    let collected = collect_tree(&tree, &collector, session);

    // Phase 3: Merge
    let mut options = config.base.clone();
    merge::execute(session, &mut options);

    info!(
        "Resolved {} package(s), {} with compiler options",
        tree.len(),
        collected
    );
    Ok(options)
}

/// Feed every node of `tree` to `collector` in pre-order.
///
/// Returns the number of fragments added.
pub fn collect_tree(tree: &PackageTree, collector: &Collector, session: &mut MergeSession) -> usize {
    let mut collected = 0;
    tree.walk(|node| {
        if collector.collect(session, &node.package, &node.dir, node.depth) {
            collected += 1;
        }
    });
    collected
}
