use std::path::{Path, PathBuf};

use crate::path::{PathError, PathResult};

const PARENT_TRAVERSAL: &str = "..";

/// Joins a group base with a relative prefix; the result is always absolute.
pub fn join_paths(base: &str, relative: &str) -> String {
    let mut joined = String::with_capacity(base.len() + relative.len() + 2);
    if !base.starts_with('/') {
        joined.push('/');
    }
    joined.push_str(base);

    if relative.is_empty() {
        return joined;
    }

    match (joined.ends_with('/'), relative.starts_with('/')) {
        (true, true) => joined.push_str(&relative[1..]),
        (false, false) => {
            joined.push('/');
            joined.push_str(relative);
        }
        _ => joined.push_str(relative),
    }
    joined
}

/// Resolves a captured static file path against `root`.
pub fn resolve_static_path(root: &Path, captured: &str) -> PathResult<PathBuf> {
    let resolved = root.join(captured.trim_start_matches('/'));
    let display = resolved.to_string_lossy();
    if display.contains(PARENT_TRAVERSAL) {
        return Err(PathError::InvalidParentTraversal {
            input: captured.to_string(),
            resolved: display.into_owned(),
        });
    }
    Ok(resolved)
}
