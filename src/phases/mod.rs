//! Implementation of the phases of a gcc-options run.
//!
//! ## Overview
//!
//! A run follows 4 phases:
//! 1. Discovery - Walk the package dependency tree from the project directory
//! 2. Collection - Extract each package's compiler block, resolve its paths and
//!    assign a precedence
//! 3. Merge - Fold all fragments into the base options in precedence order
//! 4. Orchestration - Tie the phases together for one run with its own session
//!
//! Collection and merge only touch the `MergeSession` passed to them; the
//! session is what carries state from one phase to the next.

use std::path::PathBuf;

use crate::package::Package;

// Phase modules
pub mod collect;
pub mod discovery;
pub mod merge;
pub mod orchestrator;

/// Package tree node representing the dependency hierarchy
#[derive(Debug, Clone)]
pub struct PackageNode {
    /// Decoded manifest
    pub package: Package,
    /// Absolute directory the package was found in
    pub dir: PathBuf,
    /// Distance from the root package (root = 0)
    pub depth: usize,
    /// Dependencies of this package
    pub children: Vec<PackageNode>,
}

impl PackageNode {
    pub fn new(package: Package, dir: PathBuf, depth: usize) -> Self {
        Self {
            package,
            dir,
            depth,
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: PackageNode) {
        self.children.push(child);
    }

    fn walk_node<F: FnMut(&PackageNode)>(&self, visit: &mut F) {
        visit(self);
        for child in &self.children {
            child.walk_node(visit);
        }
    }
}

/// Package dependency tree rooted at the project being built
#[derive(Debug, Clone)]
pub struct PackageTree {
    pub root: PackageNode,
}

impl PackageTree {
    pub fn new(root: PackageNode) -> Self {
        Self { root }
    }

    /// Visit every node in pre-order: a package before its dependencies,
    /// dependencies in declaration-sorted order.
    pub fn walk<F: FnMut(&PackageNode)>(&self, mut visit: F) {
        self.root.walk_node(&mut visit);
    }

    /// Number of packages in the tree.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.walk(|_| count += 1);
        count
    }

    /// A tree always holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }
}
