//! # Compiler Option Model
//!
//! Closure Compiler options arrive as loosely typed bags (`key -> bool |
//! string | [string]`). This module gives them a typed shape:
//!
//! - **`OptionValue`**: the tagged union for a single option value.
//! - **`CompilerOptions`**: an ordered map from option key to value. Ordered
//!   keys keep serialized output reproducible.
//! - **`classify`**: the fixed key-classification table. Every key maps to a
//!   `KeySpec` that says whether its entries are paths needing resolution and
//!   how values from several fragments combine (`MergePolicy`).

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key holding `NAME=VALUE` define entries.
pub const DEFINE_KEY: &str = "define";

/// Keys whose entries are filesystem or module paths.
pub const PATH_KEYS: [&str; 4] = ["conformance_configs", "js", "externs", "output_wrapper_file"];

/// Keys whose values from several fragments are combined instead of replaced.
pub const MULTI_VALUE_KEYS: [&str; 10] = [
    "define",
    "externs",
    "extra_annotation_name",
    "entry_point",
    "hide_warnings_for",
    "js",
    "jscomp_error",
    "jscomp_off",
    "jscomp_warning",
    "module",
];

/// How an incoming fragment value combines with the accumulated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Replace the accumulated value wholesale.
    Overwrite,
    /// Collapse `NAME=VALUE` entries by name, last write wins.
    Defines,
    /// Place incoming entries before the accumulated ones.
    Prepend,
    /// Place incoming entries after the accumulated ones.
    Append,
}

/// Classification of an option key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec {
    /// Entries are resolved to absolute paths at collection time and sorted
    /// in the merged output.
    pub path_valued: bool,
    pub policy: MergePolicy,
}

/// Look up the classification of `key`.
pub fn classify(key: &str) -> KeySpec {
    let policy = match key {
        DEFINE_KEY => MergePolicy::Defines,
        // base externs must come before project specific ones
        "externs" => MergePolicy::Prepend,
        k if MULTI_VALUE_KEYS.contains(&k) => MergePolicy::Append,
        _ => MergePolicy::Overwrite,
    };
    KeySpec {
        path_valued: PATH_KEYS.contains(&key),
        policy,
    }
}

/// A single option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(serde_json::Number),
    Str(String),
    List(Vec<String>),
}

impl OptionValue {
    /// Render the value as a sequence of strings, wrapping scalars.
    ///
    /// Booleans and numbers are rendered with their JSON text.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            OptionValue::Bool(b) => vec![b.to_string()],
            OptionValue::Number(n) => vec![n.to_string()],
            OptionValue::Str(s) => vec![s.clone()],
            OptionValue::List(items) => items.clone(),
        }
    }

    /// Whether the value counts as absent when entries accumulate onto it:
    /// `false`, an empty string or zero.
    pub fn is_unset(&self) -> bool {
        match self {
            OptionValue::Bool(b) => !b,
            OptionValue::Number(n) => n.as_f64() == Some(0.0),
            OptionValue::Str(s) => s.is_empty(),
            OptionValue::List(_) => false,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, OptionValue::Bool(_))
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            OptionValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        OptionValue::List(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        OptionValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// A set of compiler options keyed by option name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompilerOptions {
    entries: BTreeMap<String, OptionValue>,
}

impl CompilerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut OptionValue> {
        self.entries.get_mut(key)
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<OptionValue>
    where
        K: Into<String>,
        V: Into<OptionValue>,
    {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, OptionValue> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, OptionValue> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for CompilerOptions {
    type Item = (String, OptionValue);
    type IntoIter = btree_map::IntoIter<String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a CompilerOptions {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = btree_map::Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for CompilerOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
