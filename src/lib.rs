pub mod config;
pub mod converter;
pub mod driver;
pub mod error;

pub use config::{ClassDeclaration, ConvertOptions, NoGetter, OutputMode};
pub use converter::{convert_lines, convert_source, Conversion};
pub use error::{ConvertError, Error, Result};
