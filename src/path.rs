//! Path manipulation utilities for gcc-options

use std::path::{Component, Path, PathBuf};

/// Marker prefix for a negated (exclusion) path pattern.
pub const EXCLUSION_MARKER: char = '!';

/// Split a leading exclusion marker off `entry`.
///
/// Returns whether the marker was present and the remainder.
pub fn split_exclusion(entry: &str) -> (bool, &str) {
    match entry.strip_prefix(EXCLUSION_MARKER) {
        Some(rest) => (true, rest),
        None => (false, entry),
    }
}

/// Re-attach the exclusion marker when `excluded` is set.
pub fn with_exclusion(excluded: bool, resolved: String) -> String {
    if excluded {
        format!("{}{}", EXCLUSION_MARKER, resolved)
    } else {
        resolved
    }
}

/// Lexically normalize a path: `.` segments are dropped and `..` removes the
/// preceding segment. `..` never climbs above the root of an absolute path.
///
/// The filesystem is never consulted, so symlinks are not followed.
pub fn flatten_path(path: &Path) -> PathBuf {
    let mut flattened = PathBuf::new();
    let mut normal_segments = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => flattened.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if normal_segments > 0 {
                    flattened.pop();
                    normal_segments -= 1;
                } else if !flattened.has_root() {
                    flattened.push("..");
                }
            }
            Component::Normal(segment) => {
                flattened.push(segment);
                normal_segments += 1;
            }
        }
    }

    flattened
}

/// Render a path with forward slashes regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Whether `request` names a module (`lib/file.js`, `@scope/pkg`) rather than
/// an explicit absolute or relative location.
pub fn is_bare_request(request: &str) -> bool {
    !(request.is_empty()
        || request == "."
        || request == ".."
        || request.starts_with("./")
        || request.starts_with("../")
        || request.starts_with(".\\")
        || request.starts_with("..\\")
        || Path::new(request).is_absolute())
}
