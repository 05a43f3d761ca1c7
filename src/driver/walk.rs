use crate::config::ConvertOptions;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

fn walker<'a>(root: &Path, skip_root: Option<&'a Path>) -> impl Iterator<Item = walkdir::Result<DirEntry>> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| match skip_root {
            Some(skip) => !entry.path().starts_with(skip),
            None => true,
        })
}

/// Files under `root` with one of the configured extensions, in a stable order.
///
/// Anything under `skip_root` (the output tree) is left out.
pub fn discover(
    root: &Path,
    options: &ConvertOptions,
    skip_root: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walker(root, skip_root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| options.accepts_extension(ext));
        if matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Copy every file under `root` to the same relative path under `dest`.
pub fn mirror_tree(root: &Path, dest: &Path, skip_root: Option<&Path>) -> Result<usize> {
    let mut copied = 0usize;
    for entry in walker(root, skip_root) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| Error::InvalidInput(format!("{} is outside the input tree", entry.path().display())))?;
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| Error::io(entry.path(), e))?;
            copied += 1;
        }
    }
    debug!("mirrored {} files into {}", copied, dest.display());
    Ok(copied)
}
