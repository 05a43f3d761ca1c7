use super::types::{get_indent, Delimiter, Emission};
use crate::error::ConvertError;
use tracing::debug;

/// Statements that may carry their body on the same line after a `:`
const COLON_PREFIXES: &[&str] = &[
    "if ", "elif ", "else", "for ", "while ", "def ", "cdef ", "cpdef ", "class ", "try",
    "except", "finally",
];

const FALLBACK_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentState {
    #[default]
    Empty,
    CollectingMultiline,
    ReadyToInsert,
}

/// A docstring or comment waiting to be moved below the next signature line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingComment {
    pub lines: Vec<String>,
    pub delimiter: Option<Delimiter>,
    pub state: CommentState,
}

/// Buffers docstrings/comments written between `property x:` and its first
/// accessor, and re-inserts them after the converted signature.
#[derive(Debug, Default)]
pub struct CommentDocModel {
    pending: PendingComment,
    armed: bool,
}

impl CommentDocModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow the next non-blank line to open a relocatable unit
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Returns whether the model was armed
    pub fn disarm(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn state(&self) -> CommentState {
        self.pending.state
    }

    pub fn is_collecting(&self) -> bool {
        self.pending.state == CommentState::CollectingMultiline
    }

    pub fn is_ready(&self) -> bool {
        self.pending.state == CommentState::ReadyToInsert
    }

    /// Start a relocatable unit if the model is armed and `line` opens one.
    ///
    /// Returns true when the line was taken into the buffer.
    pub fn detect(&mut self, line: &str) -> bool {
        if !self.armed || self.pending.state != CommentState::Empty {
            return false;
        }
        let Some(delimiter) = Delimiter::detect(line.trim()) else {
            return false;
        };

        self.pending = PendingComment {
            lines: vec![line.to_string()],
            delimiter: Some(delimiter),
            state: if opens_multiline(line, delimiter) {
                CommentState::CollectingMultiline
            } else {
                CommentState::ReadyToInsert
            },
        };
        self.armed = false;
        debug!("buffering {:?} for relocation", delimiter);
        true
    }

    /// Extend the buffered unit with `line`.
    ///
    /// Collects the body of a multi-line docstring, and comments or docstrings
    /// that directly follow a finished unit. Returns true when the line was consumed.
    pub fn accumulate(&mut self, line: &str) -> bool {
        match self.pending.state {
            CommentState::CollectingMultiline => {
                self.pending.lines.push(line.to_string());
                let closes = self
                    .pending
                    .delimiter
                    .is_some_and(|d| line.trim().ends_with(d.marker()));
                if closes {
                    self.pending.state = CommentState::ReadyToInsert;
                }
                true
            }
            CommentState::ReadyToInsert => {
                let Some(delimiter) = Delimiter::detect(line.trim()) else {
                    return false;
                };
                self.pending.lines.push(line.to_string());
                if opens_multiline(line, delimiter) {
                    self.pending.delimiter = Some(delimiter);
                    self.pending.state = CommentState::CollectingMultiline;
                }
                true
            }
            CommentState::Empty => false,
        }
    }

    /// Hand back the buffered lines as they were written, leaving the model empty
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending).lines
    }

    /// Insert a ready unit after the emission's anchor line.
    ///
    /// When the anchor is a one-line compound statement the statement is split
    /// and the comment goes between its header and body.
    pub fn materialize_for_insertion(
        &mut self,
        emission: Emission,
        unit_indent: &str,
        line_number: usize,
    ) -> Result<Vec<String>, ConvertError> {
        if !self.is_ready() || emission.is_empty() {
            return Ok(emission.lines);
        }

        let anchor = emission.anchor.min(emission.lines.len() - 1);
        let mut lines = emission.lines;
        let target = lines.remove(anchor);
        let mut parts = split_if_inline(&target, unit_indent, line_number)?;
        let body = if parts.len() > 1 { parts.pop() } else { None };

        let mut inserted = parts;
        inserted.extend(self.take_lines());
        inserted.extend(body);

        lines.splice(anchor..anchor, inserted);
        Ok(lines)
    }
}

/// A string delimiter that appears only once on its opening line
fn opens_multiline(line: &str, delimiter: Delimiter) -> bool {
    !delimiter.is_line_comment() && line.matches(delimiter.marker()).count() < 2
}

/// Split `def x(self): return y` into a header and an indented body line.
///
/// Returns the line unchanged unless it is a compound statement with its body
/// on the same line. Colons inside string literals or a trailing comment
/// don't count.
pub fn split_if_inline(
    line: &str,
    unit_indent: &str,
    line_number: usize,
) -> Result<Vec<String>, ConvertError> {
    let stripped = line.trim();
    let compound = COLON_PREFIXES.iter().any(|p| stripped.starts_with(p));
    let (colons, code_end) = scan_code(line);
    let has_inline_body = !colons.is_empty() && !line[..code_end].trim_end().ends_with(':');
    if !compound || !has_inline_body {
        return Ok(vec![line.to_string()]);
    }

    if colons.len() > 1 {
        return Err(ConvertError::UnsplittableCompoundLine {
            line: line_number,
            text: line.to_string(),
        });
    }

    let (head, body) = (&line[..colons[0]], &line[colons[0] + 1..]);
    if head.trim().is_empty() || body.trim().is_empty() {
        return Ok(vec![line.to_string()]);
    }

    let unit = if unit_indent.is_empty() {
        FALLBACK_INDENT
    } else {
        unit_indent
    };
    Ok(vec![
        format!("{head}:"),
        format!("{}{}{}", get_indent(line), unit, body.trim()),
    ])
}

/// Byte offsets of `:` outside string literals, and where a trailing `#`
/// comment starts (the line length when there is none).
fn scan_code(line: &str) -> (Vec<usize>, usize) {
    let bytes = line.as_bytes();
    let mut colons = Vec::new();
    let mut quote: Option<&[u8]> = None;
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 2;
                    continue;
                }
                if bytes[i..].starts_with(q) {
                    i += q.len();
                    quote = None;
                    continue;
                }
            }
            None => match b {
                b'#' => return (colons, i),
                b':' => colons.push(i),
                b'"' | b'\'' => {
                    let triple = &bytes[i..(i + 3).min(bytes.len())];
                    let q = if triple.len() == 3 && triple.iter().all(|&c| c == b) {
                        triple
                    } else {
                        &bytes[i..i + 1]
                    };
                    i += q.len();
                    quote = Some(q);
                    continue;
                }
                _ => {}
            },
        }
        i += 1;
    }
    (colons, bytes.len())
}
