use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// `<output_root>/<project>/<path relative to input_root>`
pub fn output_path(input_root: &Path, output_root: &Path, file: &Path) -> Result<PathBuf> {
    let rel = file.strip_prefix(input_root).map_err(|_| {
        Error::InvalidInput(format!(
            "{} is not under {}",
            file.display(),
            input_root.display()
        ))
    })?;
    Ok(project_root(input_root, output_root).join(rel))
}

/// Where the input tree is mirrored: the output root plus the input directory's name
pub fn project_root(input_root: &Path, output_root: &Path) -> PathBuf {
    match input_root.file_name() {
        Some(name) => output_root.join(name),
        None => output_root.to_path_buf(),
    }
}

/// Write `content` to `path` through a temporary file in the same directory,
/// so the final path only ever holds a complete file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::InvalidInput(format!("{} has no parent directory", path.display())))?;
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}
