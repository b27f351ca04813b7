// Generated output is written all at once. File targets go through a
// temporary file in the destination directory that is renamed on success.

use gotgo_template::{TemplateError, TemplateResult};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

pub fn write_output(path: Option<&Path>, contents: &str) -> TemplateResult<()> {
    match path {
        Some(path) => write_file(path, contents),
        None => io::stdout()
            .lock()
            .write_all(contents.as_bytes())
            .map_err(|e| TemplateError::io("<stdout>", e)),
    }
}

fn write_file(path: &Path, contents: &str) -> TemplateResult<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| TemplateError::io(dir, e))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| TemplateError::io(dir, e))?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| TemplateError::io(temp.path(), e))?;
    temp.persist(path)
        .map_err(|e| TemplateError::io(path, e.error))?;

    info!(output = %path.display(), "wrote instantiation");
    Ok(())
}
