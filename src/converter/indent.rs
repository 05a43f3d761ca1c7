use super::types::{get_indent, is_blank, PropertyBlock};
use crate::error::ConvertError;
use tracing::{debug, warn};

/// Tracks indentation across the lines of one file and the active property block.
///
/// The indent unit is the first indentation step taken from column 0 and never
/// changes afterwards. A property block ends on the first non-blank line whose
/// indent is no longer than the `property` line's.
#[derive(Debug, Default)]
pub struct IndentModel {
    previous_indent: String,
    current_indent: String,
    unit_indent: String,
    block: Option<PropertyBlock>,
    block_ended: bool,
}

impl IndentModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line. Blank lines are ignored.
    pub fn observe(&mut self, line: &str, line_number: usize) -> Result<(), ConvertError> {
        self.block_ended = false;
        if is_blank(line) {
            return Ok(());
        }

        let indent = get_indent(line);
        if indent.contains(' ') && indent.contains('\t') {
            return Err(ConvertError::MixedIndentation {
                line: line_number,
                text: line.to_string(),
            });
        }
        self.current_indent = indent.to_string();

        if self.unit_indent.is_empty()
            && self.previous_indent.is_empty()
            && self.current_indent.len() > self.previous_indent.len()
        {
            debug!("indent unit {:?} fixed at line {}", self.current_indent, line_number);
            self.unit_indent = self.current_indent.clone();
        } else if !self.unit_indent.is_empty()
            && self.current_indent.len() % self.unit_indent.len() != 0
        {
            warn!(
                "indent of {} on line {} is not a multiple of the indent unit ({})",
                self.current_indent.len(),
                line_number,
                self.unit_indent.len()
            );
        }

        if let Some(block) = &self.block {
            if self.current_indent.len() <= block.indent.len() {
                debug!("property `{}` ends at line {}", block.name, line_number);
                self.block = None;
                self.block_ended = true;
            }
        }

        self.previous_indent = self.current_indent.clone();
        Ok(())
    }

    pub fn current_indent(&self) -> &str {
        &self.current_indent
    }

    /// The file's one-level indent, empty until first observed
    pub fn unit_indent(&self) -> &str {
        &self.unit_indent
    }

    /// True when the last observed line closed the active property block
    pub fn is_block_end(&self) -> bool {
        self.block_ended
    }

    pub fn open_block(&mut self, block: PropertyBlock) {
        self.block = Some(block);
    }

    pub fn block(&self) -> Option<&PropertyBlock> {
        self.block.as_ref()
    }

    pub fn block_mut(&mut self) -> Option<&mut PropertyBlock> {
        self.block.as_mut()
    }

    pub fn in_property(&self) -> bool {
        self.block.is_some()
    }

    /// Strip exactly one indent unit from the front of `line`.
    ///
    /// Lines that don't start with the unit come back unchanged.
    pub fn remove_one_indent(&self, line: &str) -> String {
        if self.unit_indent.is_empty() {
            return line.to_string();
        }
        line.strip_prefix(self.unit_indent.as_str())
            .unwrap_or(line)
            .to_string()
    }
}
