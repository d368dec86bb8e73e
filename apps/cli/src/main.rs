mod commands;
mod errors;
mod input;
mod models;
mod render;
mod style;
mod view;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(
    name = "cvforge",
    version,
    about = "Generates Word documents from structured CV data"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a .docx document from a CV data file
    Generate {
        /// CV data file (.json, .yaml or .yml)
        input: PathBuf,
        /// Output document path
        output: PathBuf,
        /// Optional style override file (.json, .yaml or .yml)
        #[arg(long)]
        style: Option<PathBuf>,
        /// Comma-separated section order, e.g. "personal_info,skills,experience"
        #[arg(long)]
        sections: Option<String>,
    },
    /// Validate a CV data file without generating a document
    Validate {
        /// CV data file to check
        input: PathBuf,
    },
    /// Convert a CV data file between JSON and YAML
    Convert {
        /// Source data file
        input: PathBuf,
        /// Destination file; format follows its extension
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}=info", env!("CARGO_PKG_NAME")))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            input,
            output,
            style,
            sections,
        } => commands::generate::run(&input, &output, style.as_deref(), sections.as_deref())?,
        Command::Validate { input } => commands::validate::run(&input)?,
        Command::Convert { input, output } => commands::convert::run(&input, &output)?,
    }
    Ok(())
}
