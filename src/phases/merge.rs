//! Phase 3: Fragment Merge
//!
//! Folds every fragment collected in a `MergeSession` into a caller-supplied
//! base `CompilerOptions`, producing the effective configuration handed to
//! the compiler.
//!
//! ## Process
//!
//! 1.  **Ordering**: fragments are sorted by ascending precedence. Ties are
//!     ordered by discovery, oldest first, so the most recently collected
//!     fragment folds last and wins.
//!
//! 2.  **Folding**: each fragment is folded into the base in that order,
//!     key by key, according to the key's `MergePolicy`:
//!     - booleans and `Overwrite` keys replace the accumulated value;
//!     - `define` entries are split into `NAME=VALUE` and recorded in the
//!       session's defines accumulator (last write wins);
//!     - `externs` entries are placed *before* the accumulated ones;
//!     - other multi-value keys are appended after the accumulated ones.
//!
//! 3.  **Define expansion**: the defines accumulator is written back to the
//!     `define` key as `NAME=VALUE` strings, after any entries already there.
//!
//! 4.  **Sorting**: every path-valued list in the output is sorted so the
//!     result does not depend on discovery order.
//!
//! The merge is done in place and never fails. The session is left stale:
//! fragments and defines stay until `MergeSession::reset`.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::options::{
    classify, CompilerOptions, MergePolicy, OptionValue, DEFINE_KEY, PATH_KEYS,
};
use crate::package::PackageId;
use crate::session::{Fragment, MergeSession};

/// Executes the merge phase.
///
/// Returns the number of fragments folded into `base`; zero means nothing
/// was collected and `base` is unchanged.
pub fn execute(session: &mut MergeSession, base: &mut CompilerOptions) -> usize {
    let (fragments, defines) = session.split_mut();
    if fragments.is_empty() && defines.is_empty() {
        debug!("No fragments collected, leaving base options untouched");
        return 0;
    }

    fragments
        .make_contiguous()
        .sort_by_key(|fragment| (fragment.precedence, fragment.sequence));

    for fragment in fragments.iter() {
        fold_fragment(base, fragment, defines);
    }

    expand_defines(base, defines);
    sort_path_lists(base);

    info!(
        "Merged {} fragment(s) into {} option(s)",
        fragments.len(),
        base.len()
    );
    fragments.len()
}

/// Fold one fragment into the accumulated options.
fn fold_fragment(
    target: &mut CompilerOptions,
    fragment: &Fragment,
    defines: &mut BTreeMap<String, String>,
) {
    for (key, value) in &fragment.options {
        let policy = if value.is_bool() {
            MergePolicy::Overwrite
        } else {
            classify(key).policy
        };

        match policy {
            MergePolicy::Overwrite => {
                target.insert(key.as_str(), value.clone());
            }
            MergePolicy::Defines => record_defines(defines, value, &fragment.package),
            MergePolicy::Prepend => {
                let mut merged = value.to_list();
                if let Some(existing) = target.get(key).filter(|v| !v.is_unset()) {
                    merged.extend(existing.to_list());
                }
                target.insert(key.as_str(), merged);
            }
            MergePolicy::Append => {
                let mut merged = target
                    .get(key)
                    .filter(|v| !v.is_unset())
                    .map(OptionValue::to_list)
                    .unwrap_or_default();
                merged.extend(value.to_list());
                target.insert(key.as_str(), merged);
            }
        }
    }
}

/// Record `NAME=VALUE` entries; anything without exactly one `=` is ignored.
fn record_defines(
    defines: &mut BTreeMap<String, String>,
    value: &OptionValue,
    origin: &PackageId,
) {
    for entry in value.to_list() {
        match parse_define(&entry) {
            Some((name, value)) => {
                defines.insert(name.to_string(), value.to_string());
            }
            None => debug!("Ignoring malformed define '{}' from {}", entry, origin),
        }
    }
}

/// Split a define entry into name and value.
pub fn parse_define(entry: &str) -> Option<(&str, &str)> {
    let mut parts = entry.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(value), None) => Some((name, value)),
        _ => None,
    }
}

fn expand_defines(target: &mut CompilerOptions, defines: &BTreeMap<String, String>) {
    if defines.is_empty() {
        return;
    }
    let mut entries = target
        .get(DEFINE_KEY)
        .map(OptionValue::to_list)
        .unwrap_or_default();
    entries.extend(defines.iter().map(|(name, value)| format!("{}={}", name, value)));
    target.insert(DEFINE_KEY, entries);
}

fn sort_path_lists(target: &mut CompilerOptions) {
    for key in PATH_KEYS {
        if let Some(OptionValue::List(entries)) = target.get_mut(key) {
            entries.sort();
        }
    }
}
