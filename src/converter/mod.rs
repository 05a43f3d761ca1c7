//! Legacy `property` block rewriting.
//!
//! A file is converted in two in-memory passes over the same lines:
//! [`guard::scan`] finds properties whose setter/deleter comes before any
//! getter, then [`LineRewriter`] emits the decorator syntax using that
//! registry to decide how to treat them.

mod classify;
mod docstring;
mod guard;
mod indent;
mod rewriter;
mod types;

pub use classify::{classify, LineShape};
pub use docstring::{split_if_inline, CommentDocModel, CommentState, PendingComment};
pub use guard::{scan, GetterViolationRegistry, Violation};
pub use indent::IndentModel;
pub use rewriter::LineRewriter;
pub use types::{get_indent, Accessor, Delimiter, Emission, PropertyBlock};

use crate::config::ConvertOptions;
use crate::error::ConvertError;

/// Result of converting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub lines: Vec<String>,
    /// Output differs from the input
    pub modified: bool,
    pub violations: Vec<Violation>,
    /// Lines that looked like a docstring but had an unknown delimiter
    pub unrecognized_delimiters: Vec<usize>,
}

impl Conversion {
    /// Output text with exactly one trailing newline
    pub fn to_text(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Convert the lines of one file.
pub fn convert_lines(lines: &[&str], options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    let registry = scan(lines)?;

    let mut rewriter = LineRewriter::new(options, &registry);
    let mut output = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        output.extend(rewriter.rewrite(line, index + 1)?);
    }
    output.extend(rewriter.finish());
    let unrecognized_delimiters = rewriter.unrecognized_delimiters().to_vec();

    let modified = output.len() != lines.len()
        || output.iter().zip(lines).any(|(out, line)| out != line);

    Ok(Conversion {
        lines: output,
        modified,
        violations: registry.into_violations(),
        unrecognized_delimiters,
    })
}

/// Convert a whole source text
pub fn convert_source(source: &str, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    let lines: Vec<&str> = source.lines().collect();
    convert_lines(&lines, options)
}
