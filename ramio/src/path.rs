// SPDX-License-Identifier: Apache-2.0

//! Separator-agnostic helpers for archive entry paths. Both `/` and `\` are
//! treated as separators regardless of platform.

const SEPARATORS: &[char] = &['/', '\\'];

/// Splits `path` into its components, dropping empty ones.
pub fn split_path(path: &str) -> Vec<&str> {
	path.split(SEPARATORS)
		.filter(|part| !part.is_empty())
		.collect()
}

/// Returns the part of `path` before its last separator, or an empty string if it
/// has none.
pub fn parent_dir(path: &str) -> &str {
	path.rfind(SEPARATORS)
		.map_or("", |i| &path[..i])
}

/// Returns the name of the last folder in `path`, the component before its last
/// separator: `a/b/c` gives `b`, `a/b/c/` gives `c`.
pub fn folder_name(path: &str) -> Option<&str> {
	let dir = parent_dir(path);
	let name = dir.rfind(SEPARATORS)
				  .map_or(dir, |i| &dir[i + 1..]);
	(!name.is_empty()).then_some(name)
}
