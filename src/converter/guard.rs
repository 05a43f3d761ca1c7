use super::classify::{classify, LineShape};
use super::docstring::CommentDocModel;
use super::indent::IndentModel;
use super::types::{get_indent, Accessor, PropertyBlock};
use crate::error::ConvertError;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;

/// A setter or deleter that appeared before any getter in its property block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub property: String,
    /// Line of the `property` declaration
    pub declared_at: usize,
    /// Line of the offending accessor
    pub line: usize,
    pub accessor: Accessor,
}

/// Properties found by the scan pass to have no getter before their setter/deleter.
#[derive(Debug, Clone, Default)]
pub struct GetterViolationRegistry {
    flagged: BTreeSet<(String, usize)>,
    violations: Vec<Violation>,
}

impl GetterViolationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, violation: Violation) {
        let key = (violation.property.clone(), violation.declared_at);
        if self.flagged.insert(key) {
            self.violations.push(violation);
        }
    }

    /// True if the block declared at `declared_at` was flagged
    pub fn is_flagged(&self, property: &str, declared_at: usize) -> bool {
        self.flagged
            .contains(&(property.to_string(), declared_at))
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// First pass: detect property blocks and record setters/deleters with no getter.
///
/// Nothing is rewritten here. Docstrings are tracked only so their text is
/// never mistaken for code.
pub fn scan(lines: &[&str]) -> Result<GetterViolationRegistry, ConvertError> {
    let mut registry = GetterViolationRegistry::new();
    let mut indent = IndentModel::new();
    let mut docs = CommentDocModel::new();

    for (index, &line) in lines.iter().enumerate() {
        let line_number = index + 1;

        if docs.is_collecting() {
            docs.accumulate(line);
            continue;
        }

        let shape = classify(line);
        if shape == LineShape::Blank {
            continue;
        }

        indent.observe(line, line_number)?;
        if !indent.is_block_end() && docs.accumulate(line) {
            continue;
        }
        if docs.is_ready() {
            docs.take_lines();
        }

        if matches!(shape, LineShape::CommentOrDocstring(_))
            && indent.in_property()
            && docs.detect(line)
        {
            continue;
        }
        docs.disarm();

        match shape {
            LineShape::PropertyDeclaration { name } => {
                indent.open_block(PropertyBlock::new(name, get_indent(line), line_number));
                docs.arm();
            }
            LineShape::AccessorMethod(Accessor::Getter) => {
                if let Some(block) = indent.block_mut() {
                    block.has_getter = true;
                }
            }
            LineShape::AccessorMethod(accessor) => {
                if let Some(block) = indent.block().filter(|b| !b.has_getter) {
                    warn!(
                        "property `{}` (line {}) has a {} on line {} but no getter",
                        block.name,
                        block.declared_at,
                        accessor.legacy_name(),
                        line_number
                    );
                    registry.record(Violation {
                        property: block.name.clone(),
                        declared_at: block.declared_at,
                        line: line_number,
                        accessor,
                    });
                }
            }
            _ => {}
        }
    }

    Ok(registry)
}
