//! slidezone CLI - slide layout inference tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use slidezone::{render, DeckLayout, JsonFormat, LayoutConfig, LayoutEngine, Strategy};

#[derive(Parser)]
#[command(name = "slidezone")]
#[command(version)]
#[command(about = "Infer positioned layouts for slide decks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the layout plan as JSON
    Layout {
        /// Input deck (docling export or shape-tree JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Threshold overrides as JSON
        #[arg(long, value_name = "CFG", env = "SLIDEZONE_CONFIG")]
        config: Option<PathBuf>,

        /// Only emit this slide (1-indexed)
        #[arg(long, value_name = "N")]
        slide: Option<u32>,

        /// Disable parallel processing
        #[arg(long)]
        sequential: bool,
    },

    /// Print plain-text layout instructions
    Instructions {
        /// Input deck (docling export or shape-tree JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Threshold overrides as JSON
        #[arg(long, value_name = "CFG", env = "SLIDEZONE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show deck information
    Info {
        /// Input deck (docling export or shape-tree JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Layout {
            input,
            output,
            compact,
            config,
            slide,
            sequential,
        }) => cmd_layout(
            &input,
            output.as_deref(),
            compact,
            config.as_deref(),
            slide,
            sequential,
        ),
        Some(Commands::Instructions {
            input,
            output,
            config,
        }) => cmd_instructions(&input, output.as_deref(), config.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: slidezone <COMMAND> <FILE>".yellow());
            println!("       slidezone --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_engine(
    config: Option<&Path>,
    sequential: bool,
) -> Result<LayoutEngine, Box<dyn std::error::Error>> {
    let mut engine = LayoutEngine::new();
    if let Some(path) = config {
        let json = fs::read_to_string(path)?;
        engine = engine.with_config(LayoutConfig::from_json(&json)?);
        log::info!("Loaded layout thresholds from {}", path.display());
    }
    if sequential {
        engine = engine.sequential();
    }
    Ok(engine)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_layout(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    config: Option<&Path>,
    slide: Option<u32>,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = build_engine(config, sequential)?;
    let layout = engine.analyze_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = match slide {
        Some(number) => render::to_json(layout.slide(number)?, format)?,
        None => render::to_json(&layout, format)?,
    };

    write_output(output, &json)
}

fn cmd_instructions(
    input: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = build_engine(config, false)?;
    let layout = engine.analyze_file(input)?;
    let text = render::to_instructions(&layout);
    write_output(output, &text)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let layout: DeckLayout = LayoutEngine::new().analyze_file(input)?;

    println!("{}", "Deck Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Slides".bold(), layout.slides.len());
    if !layout.meta.detected_title.is_empty() {
        println!("{}: {}", "Recurring title".bold(), layout.meta.detected_title);
    }
    if !layout.meta.detected_footer.is_empty() {
        println!("{}: {}", "Recurring footer".bold(), layout.meta.detected_footer);
    }
    println!(
        "{}: {}",
        "Column slides".bold(),
        layout.column_slide_count()
    );

    println!();
    println!("{}", "Slides".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for slide in &layout.slides {
        let strategy = match slide.layout.strategy {
            Strategy::Columns => "columns".green(),
            Strategy::StandardFlow => "standard_flow".normal(),
        };
        let zones = &slide.layout.zones;
        println!(
            "  {:>3}  {:<14} top={} left={} right={} flow={}",
            slide.number,
            strategy,
            zones.top_content.len(),
            zones.left_column.len(),
            zones.right_column.len(),
            zones.flow_content.len()
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "slidezone".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Slide layout inference tool");
    println!();
    println!("License: MIT");
}
