//! Runs the converter over a directory tree.

mod output;
mod report;
mod walk;

pub use output::{output_path, project_root, write_atomic};
pub use report::{FileViolation, RunReport};
pub use walk::{discover, mirror_tree};

use crate::config::{ConvertOptions, OutputMode};
use crate::converter::{convert_source, Conversion};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Read and convert one file. Nothing is written.
pub fn convert_file(path: &Path, options: &ConvertOptions) -> Result<Conversion> {
    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    convert_source(&source, options).map_err(|e| Error::convert(path, e))
}

/// Convert every matching file under `input_dir`, writing results under
/// `<output_dir>/<input dir name>/`.
///
/// Stops at the first fatal error. Files finished before it stay written.
pub fn run(input_dir: &Path, output_dir: &Path, options: &ConvertOptions) -> Result<RunReport> {
    let input_root = fs::canonicalize(input_dir).map_err(|e| Error::io(input_dir, e))?;
    if !input_root.is_dir() {
        return Err(Error::InvalidInput(format!(
            "{} is not a directory",
            input_root.display()
        )));
    }
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let output_root = fs::canonicalize(output_dir).map_err(|e| Error::io(output_dir, e))?;
    if input_root.starts_with(&output_root) {
        return Err(Error::InvalidInput(format!(
            "input {} lies inside output {}",
            input_root.display(),
            output_root.display()
        )));
    }
    let skip_root = output_root.starts_with(&input_root).then_some(output_root.as_path());

    if options.output_mode == OutputMode::AllFiles {
        let dest = project_root(&input_root, &output_root);
        let copied = mirror_tree(&input_root, &dest, skip_root)?;
        info!("copied {} files to {}", copied, dest.display());
    }

    let files = discover(&input_root, options, skip_root)?;
    let mut modified_files: Vec<PathBuf> = Vec::new();
    let mut violations = Vec::new();

    for file in &files {
        info!("Begin: {}", file.display());
        let conversion = convert_file(file, options)?;

        violations.extend(conversion.violations.iter().cloned().map(|violation| {
            FileViolation {
                file: file.clone(),
                violation,
            }
        }));
        for line in &conversion.unrecognized_delimiters {
            warn!("{}:{} docstring delimiter not recognized", file.display(), line);
        }

        if conversion.modified {
            let target = output_path(&input_root, &output_root, file)?;
            write_atomic(&target, &conversion.to_text())?;
            info!("wrote {}", target.display());
            modified_files.push(file.clone());
        }
    }

    Ok(RunReport {
        input_root,
        output_root,
        options: options.clone(),
        files_scanned: files.len(),
        modified_files,
        violations,
    })
}
