//! # Closure Compiler Options Library
//!
//! This library resolves the effective Google Closure Compiler options of a
//! JavaScript project. Every package in the project's dependency tree may
//! declare a `build.gcc` block in its `package.json`; those blocks are
//! collected as fragments and merged into one option set.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use gcc_options::options::{CompilerOptions, OptionValue};
//! use gcc_options::package::Package;
//! use gcc_options::phases::collect::Collector;
//! use gcc_options::phases::merge;
//! use gcc_options::session::MergeSession;
//!
//! let mut block = CompilerOptions::new();
//! block.insert("define", vec!["DEBUG=false"]);
//! block.insert("js", "src/main.js");
//! let app = Package::named("app", "1.0.0").with_compiler_options(&block);
//!
//! let collector = Collector::filesystem_only();
//! let mut session = MergeSession::new();
//! collector.collect(&mut session, &app, Path::new("/work/app"), 0);
//!
//! let mut options = CompilerOptions::new();
//! merge::execute(&mut session, &mut options);
//!
//! assert_eq!(options.get("js"), Some(&OptionValue::from(vec!["/work/app/src/main.js"])));
//! assert_eq!(options.get("define"), Some(&OptionValue::from(vec!["DEBUG=false"])));
//! ```
//!
//! ## Core Concepts
//!
//! - **Options (`options`)**: The option map and the per-key merge rules
//!   (overwrite, append, prepend, defines, path-valued).
//! - **Packages (`package`)**: `package.json` manifests and the `build.gcc`
//!   block they may carry.
//! - **Path handling (`path`, `resolver`)**: Resolution of path-valued
//!   entries through `node_modules` or against the package directory,
//!   preserving `!` exclusion markers.
//! - **Precedence (`precedence`)**: The pluggable policy ranking fragments.
//! - **Run state (`session`)**: The fragments and defines of one run, plus a
//!   thread-safe handle for sharing it.
//! - **Configuration (`config`)**: The optional `.gcc-options.yaml` file.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator`, which executes:
//!
//! 1.  **Discovery**: Walk `node_modules` from the project's `package.json`.
//! 2.  **Collection**: Turn each package's `build.gcc` block into a fragment.
//! 3.  **Merge**: Fold the fragments, in precedence order, into the base
//!     options.

pub mod config;
pub mod error;
pub mod options;
pub mod package;
pub mod path;
pub mod phases;
pub mod precedence;
pub mod resolver;
pub mod session;

#[cfg(test)]
mod merge_proptest;
