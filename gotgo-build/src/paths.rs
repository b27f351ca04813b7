use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Source file extension of the host language
pub const SOURCE_EXTENSION: &str = "go";

/// Lexically simplify a path: drop `.` components and fold `dir/..`
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Append `.ext` without replacing an existing extension
pub fn with_suffix(path: &Path, ext: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Unit path for a build target, accepting `main` or `main.go`
pub fn unit_for_target(target: &Path) -> PathBuf {
    let cleaned = clean_path(target);
    if cleaned.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
        cleaned.with_extension("")
    } else {
        cleaned
    }
}
