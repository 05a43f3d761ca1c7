use anyhow::Context;
use clap::Parser;
use cyprop::{driver, ClassDeclaration, ConvertOptions, NoGetter, OutputMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Convert properties in Cython extension classes from the deprecated legacy
/// syntax to the decorator syntax.
#[derive(Debug, Parser)]
#[command(name = "cyprop", version)]
struct Cli {
    /// Folder containing the files to convert
    #[arg(short = 'i', long, default_value = ".")]
    input_dir: PathBuf,

    /// Folder to save converted files in
    #[arg(short = 'o', long, default_value = "new_syntax")]
    output_dir: PathBuf,

    /// Class declaration syntax: `cdef class Spam:` or `@cython.cclass` + `class Spam:`
    #[arg(short = 'c', long, value_enum, default_value_t = ClassDeclaration::Legacy)]
    class_declaration: ClassDeclaration,

    /// Properties with a setter/deleter but no getter: keep them as-is or add an empty getter
    #[arg(short = 'n', long, value_enum, default_value_t = NoGetter::Skip)]
    no_getter: NoGetter,

    /// Only write modified files instead of mirroring the whole input tree
    #[arg(short = 'm', long)]
    output_mod_only: bool,

    /// File extensions to convert
    #[arg(short = 'e', long, value_delimiter = ',', default_value = "pyx,pxi")]
    extensions: Vec<String>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        let output_mode = if self.output_mod_only {
            OutputMode::ModifiedOnly
        } else {
            OutputMode::AllFiles
        };
        ConvertOptions {
            class_declaration: self.class_declaration,
            no_getter: self.no_getter,
            output_mode,
            extensions: self
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
        }
    }
}

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "cyprop=info",
        1 => "cyprop=debug",
        _ => "cyprop=trace",
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let options = cli.options();
    let report = driver::run(&cli.input_dir, &cli.output_dir, &options).with_context(|| {
        format!("conversion of {} stopped", cli.input_dir.display())
    })?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
