//! # Merge Session (run state)
//!
//! A `MergeSession` holds everything one build run accumulates between the
//! first collected package and the final merge:
//!
//! - the **root package**: the first package ever collected, the reference
//!   point for precedence;
//! - the **fragments**: one per package that declared compiler options,
//!   kept most-recently-collected first;
//! - the **defines** accumulator: `NAME -> VALUE`, filled during the merge.
//!
//! The session is owned by the caller and passed by reference to both the
//! collect and merge phases. Merging leaves it stale; call
//! [`MergeSession::reset`] before reusing it for an independent run.
//!
//! `SharedSession` wraps a session in a mutex for walkers that visit
//! packages from several threads. Every insertion holds the lock for its
//! full duration so fragments never interleave.

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::options::CompilerOptions;
use crate::package::{Package, PackageId};
use crate::phases::collect::Collector;
use crate::precedence::{Precedence, RootPackage};

/// One package's compiler options with the precedence assigned at
/// collection time.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Package the options came from
    pub package: PackageId,
    pub precedence: Precedence,
    /// Options with path-valued entries already resolved
    pub options: CompilerOptions,
    /// Discovery order within the session, assigned on insertion
    pub(crate) sequence: u64,
}

impl Fragment {
    pub fn new(package: PackageId, precedence: Precedence, options: CompilerOptions) -> Self {
        Self {
            package,
            precedence,
            options,
            sequence: 0,
        }
    }
}

/// Run-scoped state shared by the collect and merge phases.
#[derive(Debug, Default)]
pub struct MergeSession {
    root: Option<RootPackage>,
    fragments: VecDeque<Fragment>,
    defines: BTreeMap<String, String>,
    next_sequence: u64,
}

impl MergeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root package, once the first package has been collected.
    pub fn root_package(&self) -> Option<&RootPackage> {
        self.root.as_ref()
    }

    /// Record `root` unless one is already set, and return the run's root.
    pub(crate) fn observe_root(&mut self, root: RootPackage) -> &RootPackage {
        self.root.get_or_insert(root)
    }

    /// Add a fragment at the head of the list, stamping its discovery
    /// sequence.
    ///
    /// The head is always the most recently collected fragment. Among
    /// fragments of equal precedence the most recent one folds last and wins
    /// scalar conflicts.
    pub fn push_fragment(&mut self, mut fragment: Fragment) {
        fragment.sequence = self.next_sequence;
        self.next_sequence += 1;
        self.fragments.push_front(fragment);
    }

    /// Fragments in their current order.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter()
    }

    /// Defines recorded by the last merge.
    pub fn defines(&self) -> &BTreeMap<String, String> {
        &self.defines
    }

    /// Borrow the fragment list and the defines accumulator together.
    pub(crate) fn split_mut(&mut self) -> (&mut VecDeque<Fragment>, &mut BTreeMap<String, String>) {
        (&mut self.fragments, &mut self.defines)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Clear fragments, defines and the root package.
    pub fn reset(&mut self) {
        self.fragments.clear();
        self.defines.clear();
        self.root = None;
        self.next_sequence = 0;
    }
}

/// A `MergeSession` that can be collected into from several threads.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<MergeSession>>,
}

impl SharedSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the underlying session.
    pub fn lock(&self) -> Result<MutexGuard<'_, MergeSession>> {
        self.inner.lock().map_err(|_| Error::LockPoisoned {
            context: "merge session".to_string(),
        })
    }

    /// Collect `package` while holding the session lock.
    pub fn collect(
        &self,
        collector: &Collector,
        package: &Package,
        project_dir: &Path,
        depth: usize,
    ) -> Result<bool> {
        let mut session = self.lock()?;
        Ok(collector.collect(&mut session, package, project_dir, depth))
    }

    /// Merge the collected fragments into `base`.
    pub fn merge_into(&self, base: &mut CompilerOptions) -> Result<usize> {
        let mut session = self.lock()?;
        Ok(crate::phases::merge::execute(&mut session, base))
    }

    /// Reset the underlying session.
    pub fn reset(&self) -> Result<()> {
        self.lock()?.reset();
        Ok(())
    }
}
