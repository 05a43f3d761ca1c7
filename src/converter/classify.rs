use super::types::{is_blank, Accessor, Delimiter};

/// Legacy Cython extension class prefix
pub const LEGACY_CLASS_PREFIX: &str = "cdef class ";
/// Decorator that replaces the `cdef` keyword in pure-Python mode
pub const CCLASS_DECORATOR: &str = "@cython.cclass";

const PROPERTY_PREFIX: &str = "property ";
const STRING_PREFIX_CHARS: &[char] = &['r', 'R', 'u', 'U', 'b', 'B', 'f', 'F'];

/// The shape of one source line, as far as the rewriter cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape<'a> {
    Blank,
    /// `cdef class ...`; `declaration` is the text after `cdef `
    ClassDeclaration { declaration: &'a str },
    /// `property <name>:`
    PropertyDeclaration { name: &'a str },
    /// `def __get__(`, `def __set__(`, `def __del__(`
    AccessorMethod(Accessor),
    /// Starts with a string quote or `#`
    CommentOrDocstring(Delimiter),
    /// Looks like a prefixed string literal (`r"""`, `u'`); not relocated
    PrefixedString,
    Other,
}

/// Classify a line by its stripped prefix.
pub fn classify(line: &str) -> LineShape<'_> {
    if is_blank(line) {
        return LineShape::Blank;
    }
    let stripped = line.trim();

    if stripped.starts_with(LEGACY_CLASS_PREFIX) {
        return LineShape::ClassDeclaration {
            declaration: &stripped["cdef ".len()..],
        };
    }

    if let Some(name) = property_name(stripped) {
        return LineShape::PropertyDeclaration { name };
    }

    if let Some(rest) = stripped.strip_prefix("def ") {
        for accessor in [Accessor::Getter, Accessor::Setter, Accessor::Deleter] {
            if rest
                .strip_prefix(accessor.legacy_name())
                .is_some_and(|r| r.starts_with('('))
            {
                return LineShape::AccessorMethod(accessor);
            }
        }
    }

    if let Some(delimiter) = Delimiter::detect(stripped) {
        return LineShape::CommentOrDocstring(delimiter);
    }

    if is_prefixed_string(stripped) {
        return LineShape::PrefixedString;
    }

    LineShape::Other
}

/// `property name:` -> `name`
fn property_name(stripped: &str) -> Option<&str> {
    let rest = stripped.strip_prefix(PROPERTY_PREFIX)?;
    let (name, _) = rest.split_once(':')?;
    let name = name.trim();
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    valid.then_some(name)
}

fn is_prefixed_string(stripped: &str) -> bool {
    let prefix_len = stripped
        .chars()
        .take_while(|c| STRING_PREFIX_CHARS.contains(c))
        .count();
    (1..=2).contains(&prefix_len) && stripped[prefix_len..].starts_with(['"', '\''])
}
