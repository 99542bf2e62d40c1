//! Generate command - JSON Schema files from a definition catalog.

use crate::config::{ConvertConfig, InputConfig, OutputConfig, ResourceSchemaConfig};
use crate::generate::{Report, generate};
use crate::writer::FsWriter;
use anyhow::Context;
use clap::{Args, ValueEnum};
use resource_schema_catalog::{InputFormat, load_catalog};
use std::path::{Path, PathBuf};

/// Generate command arguments
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Definition catalog (JSON); overrides [input] path
    pub input: Option<PathBuf>,

    /// Input format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Output directory; overrides [output] dir
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extra config file, applied after global and project config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write indented JSON
    #[arg(long)]
    pub pretty: bool,

    /// Reuse expanded sub-schemas
    #[arg(long)]
    pub memoize: bool,

    /// Convert resources one at a time
    #[arg(long)]
    pub no_parallel: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// Detect from document content
    Auto,
    /// Object mapping reference to definition
    Definitions,
    /// Swagger 2.0 document
    Swagger,
    /// OpenAPI 3.x document
    #[value(name = "openapi")]
    OpenApi,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => InputFormat::Auto,
            FormatArg::Definitions => InputFormat::Definitions,
            FormatArg::Swagger => InputFormat::Swagger,
            FormatArg::OpenApi => InputFormat::OpenApi,
        }
    }
}

impl GenerateArgs {
    /// Flags as a config layer; unset flags leave lower layers alone.
    fn overrides(&self) -> ResourceSchemaConfig {
        ResourceSchemaConfig {
            input: InputConfig {
                path: self.input.clone(),
                format: self.format.map(InputFormat::from),
            },
            output: OutputConfig {
                dir: self.output.clone(),
                pretty: self.pretty.then_some(true),
            },
            convert: ConvertConfig {
                memoize: self.memoize.then_some(true),
                parallel: self.no_parallel.then_some(false),
            },
        }
    }
}

/// Run the generate command from `root`.
///
/// Per-resource failures are printed to stdout and do not change the exit
/// code; only setup failures return 1.
pub fn run(args: GenerateArgs, root: &Path) -> i32 {
    match execute(&args, root) {
        Ok(report) => {
            for failure in &report.failures {
                println!("{}", failure);
            }
            eprintln!(
                "Generated {} schemas ({} failed)",
                report.written.len(),
                report.failures.len()
            );
            0
        }
        Err(e) => {
            eprintln!("{:#}", e);
            1
        }
    }
}

fn execute(args: &GenerateArgs, root: &Path) -> anyhow::Result<Report> {
    let config = ResourceSchemaConfig::load(root, args.config.as_deref())?.merge(args.overrides());

    let input = root.join(config.input_path());
    let catalog = load_catalog(&input, config.input_format())
        .with_context(|| format!("failed to load catalog {}", input.display()))?;
    tracing::info!(definitions = catalog.len(), path = %input.display(), "catalog loaded");

    let dir = root.join(config.output_dir());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let writer = FsWriter::new(dir).pretty(config.pretty());
    Ok(generate(&catalog, &writer, config.generate_options()))
}
