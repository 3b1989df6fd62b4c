//! Command line interface
//!
//! `generate` runs the full pipeline against a description file and writes
//! the rendered modules; `check` runs everything except file writing and
//! reports what would be produced.

use crate::dialect::MappingExtractor;
use crate::extractor::ExtractorRegistry;
use crate::input::load_description;
use crate::pipeline::{self, DialectOutput};
use crate::{paths, project};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "jsrest-gen")]
#[command(about = "Generate JavaScript REST client modules", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate client modules from a resource description
    Generate {
        #[arg(short, long)]
        description: PathBuf,

        /// Directory the modules are written into
        #[arg(short, long, default_value = "generated")]
        output: PathBuf,

        #[arg(short, long, default_value_t = false)]
        force: bool,
    },
    /// Run the pipeline without writing files and report what it finds
    Check {
        #[arg(short, long)]
        description: PathBuf,
    },
}

fn registry() -> ExtractorRegistry {
    let mut registry = ExtractorRegistry::new();
    registry.register(Box::new(MappingExtractor));
    registry
}

fn run_pipeline(description: &Path) -> anyhow::Result<Vec<DialectOutput>> {
    let description = load_description(description)?;
    let types = description.type_registry();
    pipeline::generate(&registry(), &types, description.matches())
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate {
            description,
            output,
            force,
        } => {
            let outputs = run_pipeline(description)?;
            // one dialect writes straight into the output directory, more
            // than one gets a subdirectory per dialect
            let nested = outputs.len() > 1;
            for out in &outputs {
                let dir = if nested {
                    output.join(out.dialect)
                } else {
                    output.clone()
                };
                project::write_modules(&dir, &out.modules, *force)?;
            }
            Ok(())
        }
        Commands::Check { description } => {
            let outputs = run_pipeline(description)?;
            for out in &outputs {
                println!(
                    "dialect {}: {} endpoints, {} types",
                    out.dialect,
                    paths::endpoint_count(&out.path_tree),
                    out.types.len()
                );
            }
            Ok(())
        }
    }
}
