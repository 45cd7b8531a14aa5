//! Precedence assignment for collected fragments
//!
//! Fragments are folded in ascending precedence, so a fragment with a higher
//! precedence wins scalar conflicts. The policy that computes precedence is
//! pluggable; whatever it does, it must produce a total order in which the
//! root package never outranks the most deeply nested package.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::package::{Package, PackageId};

/// Merge position of a fragment. Lower values fold first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precedence(pub i64);

impl Precedence {
    /// Precedence of the run's root package.
    pub const ROOT: Precedence = Precedence(0);
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The first package collected in a run.
///
/// Identified by manifest identity and directory together, since packages
/// without a name or version all share the `(unnamed)@0.0.0` identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootPackage {
    pub id: PackageId,
    pub dir: PathBuf,
}

impl RootPackage {
    pub fn new(id: PackageId, dir: impl Into<PathBuf>) -> Self {
        Self { id, dir: dir.into() }
    }

    /// Whether `package`, found in `dir`, is this root.
    pub fn is(&self, package: &Package, dir: &Path) -> bool {
        self.dir == dir && self.id == package.id()
    }
}

impl fmt::Display for RootPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.dir.display())
    }
}

/// Strategy computing a fragment's precedence.
pub trait PrecedencePolicy: Send + Sync {
    /// Compute the precedence of `package`, found in `dir` at `depth` in the
    /// tree of the run started from `root`.
    fn precedence(
        &self,
        package: &Package,
        dir: &Path,
        depth: usize,
        root: &RootPackage,
    ) -> Precedence;
}

/// Default policy: the root package sits at [`Precedence::ROOT`], every other
/// package at `depth + 1`. Deeper packages override shallower ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthPrecedence;

impl PrecedencePolicy for DepthPrecedence {
    fn precedence(
        &self,
        package: &Package,
        dir: &Path,
        depth: usize,
        root: &RootPackage,
    ) -> Precedence {
        if root.is(package, dir) {
            return Precedence::ROOT;
        }
        let depth = i64::try_from(depth).unwrap_or(i64::MAX - 1);
        Precedence(depth.saturating_add(1))
    }
}
