use super::classify::{classify, LineShape, CCLASS_DECORATOR};
use super::docstring::CommentDocModel;
use super::guard::GetterViolationRegistry;
use super::indent::IndentModel;
use super::types::{get_indent, Accessor, Emission, PropertyBlock};
use crate::config::{ClassDeclaration, ConvertOptions, NoGetter};
use crate::error::ConvertError;
use tracing::{debug, warn};

const FALLBACK_INDENT: &str = "    ";

/// Second pass: rewrites one file line by line.
///
/// Each call to [`LineRewriter::rewrite`] returns zero or more output lines.
pub struct LineRewriter<'a> {
    options: &'a ConvertOptions,
    registry: &'a GetterViolationRegistry,
    indent: IndentModel,
    docs: CommentDocModel,
    /// Drop blank lines right after an emitted `@property`
    suppress_blank: bool,
    unrecognized: Vec<usize>,
}

impl<'a> LineRewriter<'a> {
    pub fn new(options: &'a ConvertOptions, registry: &'a GetterViolationRegistry) -> Self {
        Self {
            options,
            registry,
            indent: IndentModel::new(),
            docs: CommentDocModel::new(),
            suppress_blank: false,
            unrecognized: Vec::new(),
        }
    }

    pub fn rewrite(&mut self, line: &str, line_number: usize) -> Result<Vec<String>, ConvertError> {
        if self.docs.is_collecting() {
            self.docs.accumulate(line);
            return Ok(Vec::new());
        }

        let shape = classify(line);
        if shape == LineShape::Blank {
            if self.suppress_blank || self.docs.is_ready() {
                return Ok(Vec::new());
            }
            return Ok(vec![line.to_string()]);
        }

        self.indent.observe(line, line_number)?;

        let mut out = Vec::new();
        if self.indent.is_block_end() && self.docs.is_ready() {
            // nothing left in the block to attach to
            let lines = self.docs.take_lines();
            out.extend(lines.iter().map(|l| self.indent.remove_one_indent(l)));
        } else if self.docs.accumulate(line) {
            return Ok(out);
        }

        self.suppress_blank = false;
        if matches!(shape, LineShape::CommentOrDocstring(_))
            && self.indent.in_property()
            && self.docs.detect(line)
        {
            return Ok(out);
        }
        let armed = self.docs.disarm();

        let emission = match shape {
            LineShape::ClassDeclaration { declaration } => {
                self.class_declaration(line, declaration)
            }
            LineShape::PropertyDeclaration { name } => {
                self.property_declaration(line, name, line_number)
            }
            LineShape::AccessorMethod(Accessor::Getter) => self.getter(line),
            LineShape::AccessorMethod(accessor) => self.setter_or_deleter(line, accessor),
            LineShape::PrefixedString => {
                if armed && self.indent.in_property() {
                    warn!(
                        "unrecognized docstring delimiter on line {}: {:?}, left in place",
                        line_number, line
                    );
                    self.unrecognized.push(line_number);
                }
                self.body_line(line)
            }
            LineShape::CommentOrDocstring(_) | LineShape::Other | LineShape::Blank => {
                self.body_line(line)
            }
        };

        out.extend(self.docs.materialize_for_insertion(
            emission,
            self.indent.unit_indent(),
            line_number,
        )?);
        Ok(out)
    }

    /// Flush anything still buffered at end of file
    pub fn finish(&mut self) -> Vec<String> {
        self.docs.take_lines()
    }

    /// Lines whose docstring delimiter could not be recognized
    pub fn unrecognized_delimiters(&self) -> &[usize] {
        &self.unrecognized
    }

    fn class_declaration(&self, line: &str, declaration: &str) -> Emission {
        match self.options.class_declaration {
            ClassDeclaration::Legacy => Emission::single(line),
            ClassDeclaration::Decorator => {
                let indent = get_indent(line);
                Emission::with_anchor(
                    vec![
                        format!("{indent}{CCLASS_DECORATOR}"),
                        format!("{indent}{declaration}"),
                    ],
                    1,
                )
            }
        }
    }

    fn property_declaration(&mut self, line: &str, name: &str, line_number: usize) -> Emission {
        if self.options.no_getter == NoGetter::Skip && self.registry.is_flagged(name, line_number) {
            debug!("property `{}` has no getter, keeping legacy form", name);
            return Emission::single(line);
        }

        let indent = get_indent(line);
        debug!("property `{}` opens at line {}", name, line_number);
        self.indent
            .open_block(PropertyBlock::new(name, indent, line_number));
        self.docs.arm();
        self.suppress_blank = true;
        Emission::single(format!("{indent}@property"))
    }

    fn getter(&mut self, line: &str) -> Emission {
        let Some(block) = self.indent.block_mut() else {
            return Emission::single(line);
        };
        block.has_getter = true;
        let name = block.name.clone();
        let block_indent = block.indent.clone();
        let after_stub = std::mem::take(&mut block.synthesized_getter);

        let renamed = self.rename(line, Accessor::Getter, &name);
        if after_stub {
            // the stub already opened the property, so the real getter replaces it
            return Emission::with_anchor(vec![format!("{block_indent}@{name}.getter"), renamed], 1);
        }
        Emission::single(renamed)
    }

    fn setter_or_deleter(&mut self, line: &str, accessor: Accessor) -> Emission {
        let Some(block) = self.indent.block_mut() else {
            return Emission::single(line);
        };
        let name = block.name.clone();
        let block_indent = block.indent.clone();
        let synthesize = !block.has_getter;
        block.has_getter = true;
        block.synthesized_getter |= synthesize;

        let mut lines = Vec::with_capacity(4);
        if synthesize {
            warn!(
                "property `{}` has no getter, adding an empty one before its {}",
                name,
                accessor.legacy_name()
            );
            let unit = match self.indent.unit_indent() {
                "" => FALLBACK_INDENT,
                unit => unit,
            };
            lines.push(format!("{block_indent}def {name}(self):"));
            lines.push(format!("{block_indent}{unit}pass"));
        }

        let suffix = accessor.decorator_suffix().unwrap_or("setter");
        lines.push(format!("{block_indent}@{name}.{suffix}"));
        lines.push(self.rename(line, accessor, &name));

        // a relocated docstring belongs to the getter
        let anchor = if synthesize { 0 } else { lines.len() - 1 };
        Emission::with_anchor(lines, anchor)
    }

    fn body_line(&self, line: &str) -> Emission {
        if self.indent.in_property() {
            Emission::single(self.indent.remove_one_indent(line))
        } else {
            Emission::single(line)
        }
    }

    /// `def __set__(self, v):` -> `def name(self, v):`, one level shallower
    fn rename(&self, line: &str, accessor: Accessor, name: &str) -> String {
        let renamed = line.replacen(accessor.legacy_name(), name, 1);
        self.indent.remove_one_indent(&renamed)
    }
}
