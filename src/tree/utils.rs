//! Shared helpers for tree walking

use std::path::{Component, Path};

/// Connector for every child except the last.
pub const BRANCH: &str = "├── ";
/// Connector for the last child of a directory.
pub const LAST: &str = "└── ";
/// Prefix extension below a child that has later siblings.
pub const CONTINUATION: &str = "│   ";
/// Prefix extension below the last child.
pub const BLANK: &str = "    ";

/// Pick the connector glyph for a child.
pub fn connector(is_last: bool) -> &'static str {
    if is_last { LAST } else { BRANCH }
}

/// Calculate the prefix for the children of an entry.
pub fn child_prefix(current_prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}{}", current_prefix, BLANK)
    } else {
        format!("{}{}", current_prefix, CONTINUATION)
    }
}

/// Get the display name of a path, defaulting to "." when it has none.
pub fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string())
}

/// First line of a rendered tree: the root's name and a trailing `/`.
///
/// A filesystem root has no name and renders as a bare `/`.
pub fn root_line(root: &Path) -> String {
    let name = root
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("{}/\n", name)
}

/// Path of `path` relative to `root`, joined with `/` on every platform.
///
/// Returns `None` when `path` is not under `root`. The root itself maps to
/// an empty string.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Join a `/`-separated parent path and a child name.
pub fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Iterate over the proper ancestors of a `/`-separated path, nearest first.
pub fn ancestors(relative: &str) -> impl Iterator<Item = &str> {
    relative
        .char_indices()
        .filter(|&(_, c)| c == '/')
        .map(|(i, _)| &relative[..i])
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
}
