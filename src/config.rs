use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How `cdef class` declarations are written in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ClassDeclaration {
    /// Keep `cdef class Spam:`
    #[default]
    #[value(alias = "cython")]
    Legacy,
    /// Rewrite to `@cython.cclass` + `class Spam:`
    #[value(alias = "pure_python")]
    Decorator,
}

/// What to do with a property whose setter/deleter has no getter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NoGetter {
    /// Leave the whole property block in legacy form
    #[default]
    Skip,
    /// Synthesize an empty getter and convert normally
    Convert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Mirror the whole input tree, then overwrite converted files
    #[default]
    AllFiles,
    /// Write converted files only
    ModifiedOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    pub class_declaration: ClassDeclaration,
    pub no_getter: NoGetter,
    pub output_mode: OutputMode,
    /// File extensions (without the dot) that are converted
    pub extensions: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            class_declaration: ClassDeclaration::Legacy,
            no_getter: NoGetter::Skip,
            output_mode: OutputMode::AllFiles,
            extensions: vec!["pyx".to_string(), "pxi".to_string()],
        }
    }
}

impl ConvertOptions {
    pub fn with_class_declaration(mut self, class_declaration: ClassDeclaration) -> Self {
        self.class_declaration = class_declaration;
        self
    }

    pub fn with_no_getter(mut self, no_getter: NoGetter) -> Self {
        self.no_getter = no_getter;
        self
    }

    pub fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    /// Check whether a file extension is one we convert
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}
