use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ridl_core::compile;

#[derive(Parser, Debug)]
#[command(version, about = "Compile RIDL interface definitions to C++ headers", long_about = None)]
struct Cli {
    /// Input .ridl file (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<String>,

    /// Output header path
    #[arg(short, long)]
    output: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    let (source, source_name) = match cli.input {
        Some(path) => {
            let source = fs::read_to_string(&path)
                .with_context(|| format!("failed to read input file {path}"))?;
            (source, path)
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (buffer, String::from("<stdin>"))
        }
    };

    match compile(&source, &source_name) {
        Ok(header) => write_output(&cli.output, header.as_bytes()),
        Err(err) => {
            let (line, column) = line_column(&source, err.position);
            Err(anyhow::anyhow!(
                "{source_name}:{line}:{column}: {}",
                err.message
            ))
        }
    }
}

fn write_output(path: &str, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = PathBuf::from(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("failed to write output file {path}"))?;
    Ok(())
}

/// Translate a byte offset into a 1-based line and column for error
/// display. Offsets past the end of the source land on its last line.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map(|start| offset - start - 1)
        .unwrap_or(offset)
        + 1;
    (line, column)
}
