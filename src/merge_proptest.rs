//! Property-based tests for path resolution and fragment merging.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use std::collections::BTreeMap;
    use std::path::Path;

    use crate::options::{CompilerOptions, OptionValue};
    use crate::package::PackageId;
    use crate::phases::merge;
    use crate::precedence::Precedence;
    use crate::resolver::{resolve_entry, FilesystemOnly};
    use crate::session::{Fragment, MergeSession};
    use proptest::prelude::*;

    fn fragment(index: usize, precedence: i64, options: CompilerOptions) -> Fragment {
        Fragment::new(
            PackageId::new(format!("pkg{}", index), "1.0.0"),
            Precedence(precedence),
            options,
        )
    }

    /// Relative entries such as `src/./lib/../main.js`, optionally excluded
    fn entry_strategy() -> impl Strategy<Value = String> {
        (
            any::<bool>(),
            prop::collection::vec(prop_oneof!["[a-z]{1,6}", Just(".".to_string()), Just("..".to_string())], 1..5),
        )
            .prop_map(|(excluded, segments)| {
                let joined = segments.join("/");
                if excluded {
                    format!("!{}", joined)
                } else {
                    joined
                }
            })
    }

    // ============================================================================
    // resolve_entry property tests
    // ============================================================================

    proptest! {
        /// Property: resolving an already resolved entry changes nothing
        #[test]
        fn resolve_entry_is_idempotent(entry in entry_strategy()) {
            let dir = Path::new("/work/project");
            let once = resolve_entry(&FilesystemOnly, &entry, dir);
            let twice = resolve_entry(&FilesystemOnly, &once, dir);
            prop_assert_eq!(once, twice);
        }

        /// Property: the exclusion marker survives resolution and the result
        /// is absolute and flat
        #[test]
        fn resolve_entry_keeps_marker_and_flattens(entry in entry_strategy()) {
            let resolved = resolve_entry(&FilesystemOnly, &entry, Path::new("/work/project"));
            prop_assert_eq!(resolved.starts_with('!'), entry.starts_with('!'));

            let path = resolved.trim_start_matches('!');
            prop_assert!(path.starts_with('/'));
            prop_assert!(!path.split('/').any(|segment| segment == "." || segment == ".."));
        }
    }

    // ============================================================================
    // merge property tests
    // ============================================================================

    proptest! {
        /// Property: every define name appears once, holding the value of the
        /// last fragment in merge order that set it
        #[test]
        fn defines_unique_and_highest_precedence_wins(
            fragments in prop::collection::vec(
                (0i64..4, prop::collection::vec(("[A-D]", "[a-z0-9]{1,3}"), 0..4)),
                1..8,
            )
        ) {
            let mut session = MergeSession::new();
            for (index, (precedence, defines)) in fragments.iter().enumerate() {
                let entries: Vec<String> =
                    defines.iter().map(|(name, value)| format!("{}={}", name, value)).collect();
                let mut options = CompilerOptions::new();
                options.insert("define", entries);
                session.push_fragment(fragment(index, *precedence, options));
            }

            // Stable sort keeps discovery order for equal precedences
            let mut ordered: Vec<&(i64, Vec<(String, String)>)> = fragments.iter().collect();
            ordered.sort_by_key(|(precedence, _)| *precedence);
            let mut expected = BTreeMap::new();
            for (_, defines) in ordered {
                for (name, value) in defines {
                    expected.insert(name.clone(), value.clone());
                }
            }

            let mut base = CompilerOptions::new();
            merge::execute(&mut session, &mut base);

            let actual = base.get("define").map(OptionValue::to_list).unwrap_or_default();
            let expected: Vec<String> =
                expected.iter().map(|(name, value)| format!("{}={}", name, value)).collect();
            prop_assert_eq!(actual, expected);
        }

        /// Property: merged path lists are sorted and hold exactly the
        /// entries of the base plus every fragment
        #[test]
        fn path_lists_sorted_multiset_union(
            base_entries in prop::collection::vec("/[a-z]{1,4}\\.js", 0..4),
            fragments in prop::collection::vec(
                (0i64..4, prop::collection::vec("/[a-z]{1,4}\\.js", 1..4)),
                1..6,
            )
        ) {
            let mut base = CompilerOptions::new();
            if !base_entries.is_empty() {
                base.insert("js", base_entries.clone());
            }

            let mut session = MergeSession::new();
            let mut expected = base_entries.clone();
            for (index, (precedence, entries)) in fragments.iter().enumerate() {
                let mut options = CompilerOptions::new();
                options.insert("js", entries.clone());
                options.insert("externs", entries.clone());
                session.push_fragment(fragment(index, *precedence, options));
                expected.extend(entries.iter().cloned());
            }
            expected.sort();

            merge::execute(&mut session, &mut base);

            let js = base.get("js").map(OptionValue::to_list).unwrap_or_default();
            prop_assert_eq!(js, expected);
            let externs = base.get("externs").map(OptionValue::to_list).unwrap_or_default();
            prop_assert!(externs.windows(2).all(|pair| pair[0] <= pair[1]));
        }

        /// Property: among equal precedences the most recently collected
        /// fragment decides a scalar key
        #[test]
        fn equal_precedence_most_recent_wins(
            values in prop::collection::vec("[a-z]{1,6}", 1..8),
            precedence in 0i64..10,
        ) {
            let mut session = MergeSession::new();
            for (index, value) in values.iter().enumerate() {
                let mut options = CompilerOptions::new();
                options.insert("language_out", value.as_str());
                session.push_fragment(fragment(index, precedence, options));
            }

            let mut base = CompilerOptions::new();
            merge::execute(&mut session, &mut base);

            let last = values.last().map(String::as_str);
            prop_assert_eq!(base.get("language_out").and_then(OptionValue::as_str), last);
        }

        /// Property: merge never touches keys no fragment mentions
        #[test]
        fn untouched_base_keys_survive(
            level in "[A-Z]{3,8}",
            fragments in prop::collection::vec((0i64..4, "[a-z]{1,4}"), 0..5),
        ) {
            let mut base = CompilerOptions::new();
            base.insert("compilation_level", level.as_str());

            let mut session = MergeSession::new();
            for (index, (precedence, entry)) in fragments.iter().enumerate() {
                let mut options = CompilerOptions::new();
                options.insert("jscomp_off", vec![entry.clone()]);
                session.push_fragment(fragment(index, *precedence, options));
            }

            let folded = merge::execute(&mut session, &mut base);
            prop_assert_eq!(folded, fragments.len());
            prop_assert_eq!(base.get("compilation_level"), Some(&OptionValue::from(level.as_str())));
        }
    }
}
