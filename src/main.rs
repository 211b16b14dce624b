//! md2xlsx CLI - Markdown-embedded JSON to Excel conversion tool

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use md2xlsx::ConverterBuilder;

#[derive(Parser)]
#[command(name = "md2xlsx")]
#[command(
    author,
    version,
    about = "Convert a JSON sheet description embedded in Markdown into a styled Excel workbook"
)]
struct Cli {
    /// Markdown file containing the JSON sheet array (output: same name with .xlsx)
    markdown_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            println!("Usage: md2xlsx <markdown_file>");
            process::exit(1);
        }
    };

    // 警告は記録時に出力する
    let converter = ConverterBuilder::new()
        .with_warning_handler(|warning| println!("Warning: {}", warning))
        .build()?;
    let report = converter
        .convert_file(&cli.markdown_file)
        .with_context(|| format!("Failed to convert '{}'", cli.markdown_file.display()))?;

    if let Some(output) = report.output_path() {
        println!("Excel file '{}' generated.", output.display());
    }

    Ok(())
}
