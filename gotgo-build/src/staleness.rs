use crate::error::{BuildError, BuildResult};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Whether `target` must be regenerated from `source`.
///
/// A missing `source` is an error; a missing `target` is always stale.
pub fn should_update(source: &Path, target: &Path) -> BuildResult<bool> {
    let source_time = modified(source)?;
    match fs::symlink_metadata(target) {
        Ok(meta) => {
            let target_time = meta.modified().map_err(|e| BuildError::io(target, e))?;
            Ok(target_time < source_time)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(BuildError::io(target, e)),
    }
}

fn modified(path: &Path) -> BuildResult<SystemTime> {
    fs::symlink_metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| BuildError::io(path, e))
}
