use std::path::PathBuf;

/// Split a comma-separated target list, dropping blank segments.
#[must_use]
pub fn split_targets(list: &str) -> Vec<PathBuf> {
    list.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(PathBuf::from)
        .collect()
}
