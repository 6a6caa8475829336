use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use console::style;
use tokio_stream::StreamExt;

use jread::{FsResourceReader, JsonReader, LoadState, ResourceContext};

/// jread — JSON resource loader
///
/// Resolves a named JSON document across bundled assets, direct paths,
/// and the documents area, then prints its generic value tree.
#[derive(Parser, Debug)]
#[command(name = "jread", version, about, long_about = None)]
struct Cli {
    /// Resource name or absolute path of the JSON document
    #[arg(value_name = "NAME")]
    name: String,

    /// Directory holding bundled assets (tried first)
    #[arg(short = 'b', long = "bundle-dir")]
    bundle_dir: Option<PathBuf>,

    /// Documents directory (tried last; defaults to the user documents folder)
    #[arg(short = 'd', long = "documents-dir")]
    documents_dir: Option<PathBuf>,

    /// Print the raw text instead of the converted value
    #[arg(short = 'r', long = "raw")]
    raw: bool,

    /// Compact single-line output
    #[arg(short = 'c', long = "compact")]
    compact: bool,

    /// Suppress state transitions on stderr
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut ctx = ResourceContext::new();
    if let Some(dir) = &cli.bundle_dir {
        ctx = ctx.with_bundle_dir(dir);
    }
    if let Some(dir) = &cli.documents_dir {
        ctx = ctx.with_documents_dir(dir);
    }

    let reader = JsonReader::builder()
        .resource_reader(Arc::new(FsResourceReader::new(ctx)))
        .build();

    let mut states = reader.load(&cli.name);
    while let Some(state) = states.next().await {
        match state {
            LoadState::Idle => {}
            LoadState::Loading => {
                if !cli.quiet {
                    eprintln!("{} {}", style("..").dim(), style(&cli.name).dim());
                }
            }
            LoadState::Success { raw, value } => {
                if !cli.quiet {
                    eprintln!("{} {}", style("[ok]").green(), cli.name);
                }
                if cli.raw {
                    println!("{}", raw.trim_end());
                } else if cli.compact {
                    println!("{value}");
                } else {
                    println!("{}", value.to_pretty());
                }
                return Ok(ExitCode::SUCCESS);
            }
            LoadState::Error { message, .. } => {
                eprintln!("{} {message}", style("[!!]").red());
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
