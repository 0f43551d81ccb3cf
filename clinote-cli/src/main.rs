use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use clinote_core::{NoteProcessor, NoteProfile, OutputFormat, ParsingConfig, ProcessedNote};

#[derive(Parser)]
#[command(name = "clinote")]
#[command(about = "Segment clinical note text into sections, fields, items and prose blocks")]
struct Args {
    /// Path to the note text file to process
    #[arg(short, long)]
    input: Option<String>,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Output format: tree, flat, or sections
    #[arg(short = 'f', long, default_value = "tree")]
    output_format: String,

    /// Show available config options and exit
    #[arg(long)]
    show_configs: bool,

    /// Output file path (if not specified, auto-generated based on input)
    #[arg(short, long)]
    output: Option<String>,

    /// Enable step timings for segmentation and profiling
    #[arg(long)]
    profile: bool,

    /// Also write a run summary (profile plus config fingerprint) to this path
    #[arg(long)]
    summary: Option<String>,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    input: &'a str,
    captured_at: String,
    config_fingerprint: String,
    profile: &'a NoteProfile,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clinote=info,clinote_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    println!("🩺 Clinote Note Segmenter");

    if args.show_configs {
        show_help();
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        println!("⚠️  No input file given. Use --input <path> or --show-configs.");
        return Ok(());
    };

    if !Path::new(input).exists() {
        println!("⚠️  Input note not found at: {}", input);
        println!("   Please check the file path.");
        return Ok(());
    }

    let format: OutputFormat = args.output_format.parse()?;

    let config = ParsingConfig::load_with_fallback(args.config.as_deref());
    if let Some(config_path) = &args.config {
        println!("📋 Loaded config from: {}", config_path);
    } else {
        println!("📋 Using default config");
    }

    let processor = NoteProcessor::new(config)?;

    println!("📄 Processing: {}", input);

    match processor.process_file_with_profiling(Path::new(input), args.profile) {
        Ok(processed) => {
            println!("✅ Successfully segmented note");
            println!("📊 Note metrics:");
            println!("   - Items: {}", processed.profile.total_items);
            println!("   - Sections: {}", processed.profile.section_count);
            println!("   - Statement-like leaves: {}/{}", processed.profile.statement_like_leaves, processed.profile.leaf_count);

            let output_path = args.output.clone().unwrap_or_else(|| default_output_path(input, args.config.as_deref()));
            save_note(&processed, &output_path, format)?;

            if let Some(summary_path) = &args.summary {
                save_summary(&processed, input, processor.config(), summary_path)?;
            }
        }
        Err(e) => {
            eprintln!("❌ Processing failed: {e:#}");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// `<input stem>[_<config stem>]_clinote.json`
fn default_output_path(input: &str, config: Option<&str>) -> String {
    let input_name = Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let config_suffix = config
        .and_then(|p| Path::new(p).file_stem())
        .and_then(|s| s.to_str())
        .map(|s| format!("_{s}"))
        .unwrap_or_default();
    format!("{input_name}{config_suffix}_clinote.json")
}

fn show_help() {
    println!("\n📋 Available Configuration Options:");
    println!("  --config <path>         Load custom config file");
    println!("  --input <path>          Note text file to process");
    println!("  --output <path>         Output file path (auto-generated if not specified)");
    println!("  --output-format <fmt>   Output format: tree, flat, or sections");
    println!("  --profile               Log step timings");
    println!("  --summary <path>        Write a run summary JSON alongside the output");

    println!("\n📄 Output Formats:");
    println!("  tree      - Full nested note with schema version and profile (default)");
    println!("  flat      - Leaf texts in reading order");
    println!("  sections  - Section label with its fields");

    println!("\n⚙️  Config keys (YAML):");
    println!("  segmentation.block_min_chars   Minimum first-line length for a prose block (45)");
    println!("  segmentation.max_label_tokens  Maximum words in a header or key label (5)");
    println!("  limits.max_items               Cap on items per note or section (100000)");
    println!("  limits.max_block_lines         Cap on lines absorbed by one block (10000)");
    println!("  classify_spans                 Run the statement classifier (true)");

    println!("\n📝 Usage Examples:");
    println!("  clinote -i note.txt");
    println!("  clinote -i note.txt -o /path/to/output.json");
    println!("  clinote -i note.txt -c config.yaml -f sections");
    println!("  RUST_LOG=clinote_core=debug clinote -i note.txt");
}

fn save_note(processed: &ProcessedNote, output_path: &str, format: OutputFormat) -> Result<()> {
    processed.save_with_format(output_path, format)?;

    match format {
        OutputFormat::Tree => println!("💾 Tree format results saved to: {}", output_path),
        OutputFormat::Flat => println!("💾 Flat format results saved to: {}", output_path),
        OutputFormat::Sections => println!("💾 Sections format results saved to: {}", output_path),
    }

    Ok(())
}

fn save_summary(processed: &ProcessedNote, input: &str, config: &ParsingConfig, summary_path: &str) -> Result<()> {
    let summary = RunSummary {
        input,
        captured_at: chrono::Utc::now().to_rfc3339(),
        config_fingerprint: config.fingerprint()?,
        profile: &processed.profile,
    };
    std::fs::write(summary_path, serde_json::to_string_pretty(&summary)?)?;
    println!("  💾 {}", summary_path);
    Ok(())
}
