//! pdfoutline CLI - PDF outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{FileOutcome, FileReport};
use pdfoutline::{
    extract_outline_with_options, extract_records, render, BatchProcessor, ClassifierConfig,
    ExtractOptions, JsonFormat, PageSelection,
};

const DEFAULT_INPUT_DIR: &str = "input";
const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Extract titles and H1-H3 outlines from PDF files", long_about = None)]
struct Cli {
    /// Input directory of PDF files
    #[arg(value_name = "INPUT_DIR", env = "PDFOUTLINE_INPUT")]
    input: Option<PathBuf>,

    /// Output directory for JSON outlines
    #[arg(value_name = "OUTPUT_DIR", env = "PDFOUTLINE_OUTPUT")]
    output: Option<PathBuf>,

    /// Warn when a batch takes longer than this many seconds
    #[arg(long, env = "PDFOUTLINE_BUDGET", default_value = "10", global = true)]
    budget: f64,

    /// Left edge must be greater than this to count as centered
    #[arg(long, value_name = "X", global = true)]
    center_min: Option<f32>,

    /// Left edge must be less than this to count as centered
    #[arg(long, value_name = "X", global = true)]
    center_max: Option<f32>,

    /// Skip unreadable pages and documents instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Process documents one at a time
    #[arg(long, global = true)]
    sequential: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract outlines for every PDF in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "INPUT_DIR", default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,
    },

    /// Extract the outline of a single PDF
    File {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Dump normalized lines as JSON
    Lines {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// {"title": ..., "outline": [...]}
    Json,
    /// Indented table of contents
    Text,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = build_options(&cli);
    log::debug!("Extract options: {:?}", options);
    let budget = Duration::try_from_secs_f64(cli.budget.max(0.0)).unwrap_or(Duration::MAX);

    let result = match cli.command {
        Some(Commands::Batch { input, output }) => cmd_batch(&input, &output, options, budget),
        Some(Commands::File {
            input,
            output,
            format,
            compact,
            pages,
        }) => cmd_file(
            &input,
            output.as_deref(),
            format,
            compact,
            pages.as_deref(),
            options,
        ),
        Some(Commands::Lines { input, pages }) => cmd_lines(&input, pages.as_deref(), options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            let input = cli
                .input
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
            let output = cli
                .output
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
            cmd_batch(&input, &output, options, budget)
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_options(cli: &Cli) -> ExtractOptions {
    let defaults = ClassifierConfig::default();
    let classifier = defaults.clone().with_center_band(
        cli.center_min.unwrap_or(defaults.center_min_x),
        cli.center_max.unwrap_or(defaults.center_max_x),
    );

    let mut options = ExtractOptions::new()
        .with_classifier(classifier)
        .with_parallel(!cli.sequential);
    if cli.lenient {
        options = options.lenient();
    }
    options
}

fn parse_pages(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    match pages {
        Some(p) => Ok(PageSelection::parse(p)?),
        None => Ok(PageSelection::All),
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    options: ExtractOptions,
    budget: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "Starting PDF processing...".cyan());

    let processor = BatchProcessor::new(options);
    let total = processor.collect_inputs(input)?.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let report = processor.run_with(input, output, |file: &FileReport| {
        if let Some(name) = file.input.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    for file in &report.files {
        match &file.outcome {
            FileOutcome::Written { output, entries } => println!(
                "  {} {} -> {} ({} entries)",
                "✓".green(),
                file.input.display(),
                output.display(),
                entries
            ),
            FileOutcome::Failed(message) => println!(
                "  {} {}: {}",
                "✗".red(),
                file.input.display(),
                message
            ),
        }
    }

    println!();
    println!(
        "{} {} written, {} failed, {} outline entries",
        "Summary:".bold(),
        report.succeeded().to_string().green(),
        report.failed().to_string().red(),
        report.total_entries()
    );
    println!(
        "Processing completed in {:.2} seconds.",
        report.elapsed.as_secs_f64()
    );

    if report.exceeded(budget) {
        println!(
            "{} {:.0} seconds.",
            "Execution exceeded".yellow().bold(),
            budget.as_secs_f64()
        );
    } else {
        println!("{}", "Execution complete.".green().bold());
    }

    Ok(())
}

fn cmd_file(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    pages: Option<&str>,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = options.with_pages(parse_pages(pages)?);
    let outline = extract_outline_with_options(input, &options)?;

    let rendered = match format {
        OutputFormat::Json if compact => render::to_json(&outline, JsonFormat::Compact)?,
        OutputFormat::Json => render::to_json(&outline, JsonFormat::Pretty)?,
        OutputFormat::Text => render::to_text(&outline),
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_lines(
    input: &Path,
    pages: Option<&str>,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = options.with_pages(parse_pages(pages)?);
    let records = extract_records(input, &options)?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction tool");
    println!();
    println!("License: MIT");
}
