//! Phase 2: Fragment Collection
//!
//! Invoked once per package visited by the tree walk. For a package that
//! declares a `build.gcc` block the collector:
//!
//! 1.  **Root tracking**: records the first package ever seen in the session
//!     as the run's root package (whether or not it declares options).
//! 2.  **Path resolution**: every path-valued key is normalized to a list and
//!     each entry resolved against the package directory, keeping any `!`
//!     exclusion marker.
//! 3.  **Precedence**: the injected `PrecedencePolicy` assigns the fragment
//!     its merge position from `(package, depth, root)`.
//! 4.  **Insertion**: the fragment is prepended to the session's list.
//!
//! Packages without a block are skipped. Nothing here fails: the only
//! collaborator, the module resolver, falls back to project-relative paths.

use std::path::Path;

use log::debug;

use crate::options::{classify, CompilerOptions, OptionValue};
use crate::package::Package;
use crate::precedence::{DepthPrecedence, PrecedencePolicy, RootPackage};
use crate::resolver::{resolve_entry, FilesystemOnly, ModuleResolver, NodeModulesResolver};
use crate::session::{Fragment, MergeSession};

/// Reserved key; a literal value in a manifest is discarded.
pub const PRECEDENCE_KEY: &str = "precedence";

/// Collects package fragments into a `MergeSession`.
pub struct Collector {
    resolver: Box<dyn ModuleResolver>,
    policy: Box<dyn PrecedencePolicy>,
}

impl Collector {
    /// Creates a collector with custom resolution and precedence strategies.
    pub fn new(resolver: Box<dyn ModuleResolver>, policy: Box<dyn PrecedencePolicy>) -> Self {
        Self { resolver, policy }
    }

    /// `node_modules` lookup with depth-based precedence.
    pub fn node_modules() -> Self {
        Self::new(Box::new(NodeModulesResolver::new()), Box::new(DepthPrecedence))
    }

    /// Project-relative resolution only, with depth-based precedence.
    pub fn filesystem_only() -> Self {
        Self::new(Box::new(FilesystemOnly), Box::new(DepthPrecedence))
    }

    pub fn resolver(&self) -> &dyn ModuleResolver {
        self.resolver.as_ref()
    }

    /// Collect the fragment of `package`, found in `project_dir` at `depth`.
    ///
    /// Returns whether a fragment was added.
    pub fn collect(
        &self,
        session: &mut MergeSession,
        package: &Package,
        project_dir: &Path,
        depth: usize,
    ) -> bool {
        let root = session
            .observe_root(RootPackage::new(package.id(), project_dir))
            .clone();

        let Some(mut options) = package.compiler_options() else {
            debug!("{} declares no compiler options, skipping", package.id());
            return false;
        };

        if options.remove(PRECEDENCE_KEY).is_some() {
            debug!("Discarding literal '{}' key from {}", PRECEDENCE_KEY, package.id());
        }

        self.resolve_paths(&mut options, project_dir);

        let precedence = self.policy.precedence(package, project_dir, depth, &root);
        debug!(
            "Collected {} option(s) from {} at depth {} (precedence {})",
            options.len(),
            package.id(),
            depth,
            precedence
        );
        session.push_fragment(Fragment::new(package.id(), precedence, options));
        true
    }

    fn resolve_paths(&self, options: &mut CompilerOptions, project_dir: &Path) {
        for (key, value) in options.iter_mut() {
            if !classify(key).path_valued {
                continue;
            }
            let resolve = |entry: &str| resolve_entry(self.resolver(), entry, project_dir);
            let resolved = match value {
                OptionValue::Str(entry) => OptionValue::List(vec![resolve(entry.as_str())]),
                OptionValue::List(entries) => {
                    OptionValue::List(entries.iter().map(|e| resolve(e)).collect())
                }
                // nothing to resolve in a bool or number
                OptionValue::Bool(_) | OptionValue::Number(_) => continue,
            };
            *value = resolved;
        }
    }
}
