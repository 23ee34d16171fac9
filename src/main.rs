use abi_converter::{Format, Interface};
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "abi-converter")]
#[command(about = "Convert Ethereum JSON ABIs to human-readable signatures and back")]
#[command(version)]
struct Cli {
    /// Path to an ABI file, a directory of ABI files, or `-` for stdin
    #[arg(short, long)]
    input: String,

    /// Output format: full, minimal, json or sighash
    #[arg(short, long, env = "ABI_FORMAT", default_value = "full", value_parser = parse_format)]
    format: Format,

    /// Drop repeated definitions, keeping the first of each
    #[arg(long)]
    dedup: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_format(value: &str) -> Result<Format, String> {
    value.parse::<Format>().map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    if cli.input == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read ABI from stdin")?;
        println!("{}", convert_source(&cli, &source)?);
        return Ok(());
    }

    let input_path = Path::new(&cli.input);
    if input_path.is_file() {
        process_single_file(&cli, input_path)
    } else if input_path.is_dir() {
        process_directory(&cli, input_path)
    } else {
        anyhow::bail!("Input path does not exist: {}", cli.input)
    }
}

fn convert_source(cli: &Cli, source: &str) -> Result<String> {
    let mut interface = Interface::parse(source)?;
    if cli.dedup {
        interface = interface.dedup();
    }
    Ok(interface.render(cli.format)?)
}

fn process_single_file(cli: &Cli, file_path: &Path) -> Result<()> {
    let source = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    let output = convert_source(cli, &source)
        .with_context(|| format!("Failed to convert {}", file_path.display()))?;
    println!("{}", output);
    Ok(())
}

fn process_directory(cli: &Cli, dir_path: &Path) -> Result<()> {
    let abi_files = find_abi_files(dir_path);
    let mut converted = 0;
    let mut failed = 0;

    for file_path in &abi_files {
        debug!("Converting {}", file_path.display());
        let result = fs::read_to_string(file_path)
            .context("Failed to read file")
            .and_then(|source| convert_source(cli, &source));

        match result {
            Ok(output) => {
                println!("{}", format!("// {}", file_path.display()).dimmed());
                println!("{}\n", output);
                converted += 1;
            }
            Err(e) => {
                warn!("Failed to process {}: {:#}", file_path.display(), e);
                failed += 1;
            }
        }
    }

    // Print combined summary
    println!("{} {} file(s) converted", "✔".green(), converted);
    if failed > 0 {
        println!("{} {} file(s) failed", "✘".red(), failed);
    }
    println!("   Total: {} ABI file(s) as {}", abi_files.len(), cli.format);

    Ok(())
}

fn find_abi_files(dir_path: &Path) -> Vec<PathBuf> {
    let mut abi_files: Vec<PathBuf> = WalkDir::new(dir_path)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map_or(false, |extension| extension == "json" || extension == "abi")
        })
        .collect();
    abi_files.sort();
    abi_files
}
