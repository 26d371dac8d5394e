//! PDF Splice CLI tool
//!
//! A command-line tool for merging two PDFs or splitting one into parts.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use pdf_splice::pdf::{inspect, merge, split, Direction, MergeMode, SplitMode};
use pdf_splice::ranges::parse_page_ranges;

/// PDF Splice - merge two PDFs or split one
#[derive(Parser)]
#[command(name = "pdf-splice")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Append B's pages after A's
    pdf-splice merge a.pdf b.pdf -o merged.pdf

    # Place pages side by side on one wide canvas
    pdf-splice merge a.pdf b.pdf -o merged.pdf --mode overlay --direction horizontal

    # Extract page ranges into separate files
    pdf-splice split input.pdf -o parts/ --mode pages --ranges \"1-3,4-8\"

    # Separate odd and even pages
    pdf-splice split input.pdf -o parts/ --mode alternate")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Merge policy selector
#[derive(Debug, Clone, Copy, ValueEnum)]
enum MergeKind {
    /// All of A's pages, then all of B's
    Append,
    /// Page i of both inputs drawn together on one larger page
    Overlay,
    /// Pages interleaved one at a time
    Alternate,
}

/// Split policy selector
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SplitKind {
    /// One output per page range (requires --ranges)
    Pages,
    /// Two outputs, each page cropped to one half of the original
    Content,
    /// Odd pages and even pages in separate outputs
    Alternate,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Axis {
    Horizontal,
    Vertical,
}

impl From<Axis> for Direction {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Direction::Horizontal,
            Axis::Vertical => Direction::Vertical,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Merge two PDF files into one
    Merge {
        /// First input PDF (its pages come first)
        input_a: PathBuf,

        /// Second input PDF
        input_b: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Merge policy
        #[arg(long, value_enum, default_value = "append")]
        mode: MergeKind,

        /// Axis for overlay mode
        #[arg(long, value_enum, default_value = "horizontal")]
        direction: Axis,
    },

    /// Split a PDF file into multiple parts
    Split {
        /// Input PDF file
        input: PathBuf,

        /// Output directory for the parts (created if missing)
        #[arg(short, long)]
        output: PathBuf,

        /// Split policy
        #[arg(long, value_enum, default_value = "pages")]
        mode: SplitKind,

        /// Page ranges for pages mode, 1-indexed inclusive, e.g. "1-3,4-8"
        #[arg(long)]
        ranges: Option<String>,

        /// Axis for content mode
        #[arg(long, value_enum, default_value = "horizontal")]
        direction: Axis,
    },

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Merge {
            input_a,
            input_b,
            output,
            mode,
            direction,
        } => cmd_merge(&input_a, &input_b, &output, mode, direction),
        Commands::Split {
            input,
            output,
            mode,
            ranges,
            direction,
        } => cmd_split(&input, &output, mode, ranges.as_deref(), direction),
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        bail!("Input file not found: {}", path.display());
    }
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Merge two PDFs into one
fn cmd_merge(
    input_a: &Path,
    input_b: &Path,
    output: &Path,
    mode: MergeKind,
    direction: Axis,
) -> Result<()> {
    let bytes_a = read_input(input_a)?;
    let bytes_b = read_input(input_b)?;

    let mode = match mode {
        MergeKind::Append => MergeMode::Append,
        MergeKind::Overlay => MergeMode::Overlay(direction.into()),
        MergeKind::Alternate => MergeMode::Alternate,
    };

    eprintln!(
        "Merging {} and {}...",
        input_a.display(),
        input_b.display()
    );

    let merged = merge(&bytes_a, &bytes_b, mode)?;
    fs::write(output, merged).with_context(|| format!("failed to write {}", output.display()))?;

    eprintln!("Merged to: {}", output.display());
    Ok(())
}

/// Split a PDF into parts written under the output directory
fn cmd_split(
    input: &Path,
    output_dir: &Path,
    mode: SplitKind,
    ranges: Option<&str>,
    direction: Axis,
) -> Result<()> {
    let bytes = read_input(input)?;

    let mode = match mode {
        SplitKind::Pages => {
            let spec = match ranges {
                Some(spec) => spec,
                None => bail!("--ranges is required with --mode pages"),
            };
            let parsed = parse_page_ranges(spec);
            if parsed.is_empty() {
                bail!("No valid page ranges in {:?}", spec);
            }
            SplitMode::ByRanges(parsed)
        }
        SplitKind::Content => SplitMode::ByContent(direction.into()),
        SplitKind::Alternate => SplitMode::ByAlternate,
    };

    eprintln!("Splitting {}...", input.display());
    let parts = split(&bytes, mode)?;

    if parts.is_empty() {
        bail!("No pages matched the requested split");
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    for part in &parts {
        let path = output_dir.join(&part.name);
        fs::write(&path, &part.bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Wrote: {}", path.display());
    }

    eprintln!("Split into {} file(s)", parts.len());
    Ok(())
}

/// Show information about a PDF
fn cmd_info(input: &Path) -> Result<()> {
    let info = inspect(input)?;

    println!("File: {}", input.display());
    println!("Pages: {}", info.page_count);

    if let Some(title) = info.title {
        println!("Title: {}", title);
    }
    if let Some(author) = info.author {
        println!("Author: {}", author);
    }

    Ok(())
}
