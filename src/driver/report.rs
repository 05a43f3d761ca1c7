use crate::config::ConvertOptions;
use crate::converter::Violation;
use crate::error::Result;
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

/// A missing-getter violation together with the file it was found in
#[derive(Debug, Clone, Serialize)]
pub struct FileViolation {
    pub file: PathBuf,
    #[serde(flatten)]
    pub violation: Violation,
}

/// Summary of one conversion run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub options: ConvertOptions,
    pub files_scanned: usize,
    pub modified_files: Vec<PathBuf>,
    pub violations: Vec<FileViolation>,
}

impl RunReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain text summary printed at the end of a run
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n Modified files:");
        for path in &self.modified_files {
            let _ = writeln!(out, "{}", path.display());
        }
        if !self.violations.is_empty() {
            let _ = writeln!(out, "\n Properties without a getter ({:?}):", self.options.no_getter);
            for v in &self.violations {
                let _ = writeln!(
                    out,
                    "{}:{} `{}` ({} on line {})",
                    v.file.display(),
                    v.violation.declared_at,
                    v.violation.property,
                    v.violation.accessor.legacy_name(),
                    v.violation.line
                );
            }
        }
        let _ = writeln!(out, "\n Number of modified files: {}", self.modified_files.len());
        let _ = writeln!(out, "\n Output directory: \n{}", self.output_root.display());
        out
    }
}
