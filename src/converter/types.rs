use serde::Serialize;

/// The legacy `property <name>:` block currently being converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBlock {
    pub name: String,
    pub indent: String,
    /// 1-based line of the `property` declaration
    pub declared_at: usize,
    pub has_getter: bool,
    /// An empty getter was emitted in place of a missing one
    pub synthesized_getter: bool,
}

impl PropertyBlock {
    pub fn new(name: &str, indent: &str, declared_at: usize) -> Self {
        Self {
            name: name.to_string(),
            indent: indent.to_string(),
            declared_at,
            has_getter: false,
            synthesized_getter: false,
        }
    }
}

/// Accessor methods of a legacy property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessor {
    Getter,
    Setter,
    Deleter,
}

impl Accessor {
    /// Legacy method name (`__get__`, ...)
    pub fn legacy_name(self) -> &'static str {
        match self {
            Accessor::Getter => "__get__",
            Accessor::Setter => "__set__",
            Accessor::Deleter => "__del__",
        }
    }

    /// Decorator suffix for setter/deleter (`@name.setter`)
    pub fn decorator_suffix(self) -> Option<&'static str> {
        match self {
            Accessor::Getter => None,
            Accessor::Setter => Some("setter"),
            Accessor::Deleter => Some("deleter"),
        }
    }
}

/// Opening delimiter of a relocatable docstring or comment, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    TripleDouble,
    TripleSingle,
    Double,
    Single,
    LineComment,
}

impl Delimiter {
    pub const ALL: [Delimiter; 5] = [
        Delimiter::TripleDouble,
        Delimiter::TripleSingle,
        Delimiter::Double,
        Delimiter::Single,
        Delimiter::LineComment,
    ];

    pub fn marker(self) -> &'static str {
        match self {
            Delimiter::TripleDouble => "\"\"\"",
            Delimiter::TripleSingle => "'''",
            Delimiter::Double => "\"",
            Delimiter::Single => "'",
            Delimiter::LineComment => "#",
        }
    }

    /// Match the start of a stripped line against the known delimiters
    pub fn detect(stripped: &str) -> Option<Delimiter> {
        Self::ALL
            .into_iter()
            .find(|d| stripped.starts_with(d.marker()))
    }

    pub fn is_line_comment(self) -> bool {
        self == Delimiter::LineComment
    }
}

/// Output produced for one input line.
///
/// `anchor` is the index of the line after which a pending docstring is
/// inserted (normally the signature line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub lines: Vec<String>,
    pub anchor: usize,
}

impl Emission {
    pub fn single(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            anchor: 0,
        }
    }

    pub fn with_anchor(lines: Vec<String>, anchor: usize) -> Self {
        Self { lines, anchor }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Leading whitespace of a line
pub fn get_indent(line: &str) -> &str {
    let indent_len = line.len() - line.trim_start().len();
    &line[..indent_len]
}

/// Whitespace-only lines count as blank
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
