use anyhow::Context;
use chrono::DateTime;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rfollow_common::{ensure_config, load_config, IdentityRecord, ReconciliationResult};
use rfollow_core::{filter_result, ExportProcessor, ExportReport, Statistics};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rfollow")]
#[command(author = "RFollow Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Compare who you follow with who follows you, from a data export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an export archive (.zip) or an extracted export directory
    Analyze {
        /// Path to the export
        path: PathBuf,

        /// Output results as JSON
        #[arg(long)]
        json: bool,

        /// Only keep handles containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum entries listed per section in text output
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Reject archives larger than this many megabytes
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_size_mb: Option<u64>,

        /// Skip the auxiliary datasets
        #[arg(long)]
        skip_optional: bool,

        /// Use the configuration file next to the executable
        #[arg(long)]
        portable: bool,

        /// Disable ANSI colors in output
        #[arg(long)]
        no_color: bool,
    },

    /// Create the configuration file if needed and show the effective settings
    Config {
        /// Use the configuration file next to the executable
        #[arg(long)]
        portable: bool,
    },
}

struct AnalyzeOptions {
    path: PathBuf,
    json: bool,
    search: Option<String>,
    limit: usize,
    max_size_mb: Option<u64>,
    skip_optional: bool,
    portable: bool,
    no_color: bool,
}

fn main() {
    // Initialize tracing to stderr (so JSON output can go cleanly to stdout)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Analyze {
            path,
            json,
            search,
            limit,
            max_size_mb,
            skip_optional,
            portable,
            no_color,
        } => run_analyze(AnalyzeOptions {
            path,
            json,
            search,
            limit,
            max_size_mb,
            skip_optional,
            portable,
            no_color,
        }),
        Commands::Config { portable } => run_config(portable),
    };

    if let Err(e) = outcome {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run_analyze(options: AnalyzeOptions) -> anyhow::Result<()> {
    let loaded = load_config(options.portable)?;
    let mut config = loaded.config;

    if let Some(mb) = options.max_size_mb {
        config.max_archive_bytes = mb.saturating_mul(1024 * 1024);
    }
    if options.skip_optional {
        config.include_optional = false;
    }

    info!("Analyzing {}", options.path.display());

    let spinner = if !options.json && std::io::stdout().is_terminal() {
        Some(start_spinner())
    } else {
        None
    };

    let processor = ExportProcessor::new(config);
    let processed = processor
        .process_path(&options.path)
        .with_context(|| format!("Failed to process {}", options.path.display()));

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let mut result = processed?;

    if let Some(query) = options.search.as_deref() {
        result = filter_result(&result, query);
    }

    if options.json {
        let report = ExportReport::new(source_label(&options.path), &result);
        println!("{}", report.to_json_pretty()?);
        return Ok(());
    }

    let use_color = !options.no_color && std::io::stdout().is_terminal();
    print_text_report(&result, options.limit, use_color);
    Ok(())
}

fn run_config(portable: bool) -> anyhow::Result<()> {
    let loaded = ensure_config(portable)?;

    println!("Config file:       {}", loaded.path.display());
    println!("Portable mode:     {}", loaded.portable);
    println!("Max archive bytes: {}", loaded.config.max_archive_bytes);
    println!("Export folder:     {}", loaded.config.export_dir);
    println!("Optional datasets: {}", loaded.config.include_optional);
    Ok(())
}

fn start_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Reading export...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_text_report(result: &ReconciliationResult, limit: usize, use_color: bool) {
    let stats = Statistics::from_result(result);

    println!("\n{}", "=".repeat(80));
    println!("Relationship Summary");
    println!("{}", "=".repeat(80));

    print_section("Mutual", "\x1b[32m", &result.mutual, limit, use_color);
    print_section(
        "You follow, not following back",
        "\x1b[33m",
        &result.following_only,
        limit,
        use_color,
    );
    print_section(
        "Following you, not followed back",
        "\x1b[34m",
        &result.followers_only,
        limit,
        use_color,
    );

    let optional = [
        ("Close friends", &result.optional.close_friends),
        ("Pending follow requests", &result.optional.pending_follow_requests),
        ("Recent follow requests", &result.optional.recent_follow_requests),
        ("Recently unfollowed", &result.optional.recently_unfollowed),
    ];
    for (title, records) in optional {
        if let Some(records) = records {
            print_section(title, "\x1b[36m", records, limit, use_color);
        }
    }

    println!("\n{}", "=".repeat(80));
    println!("Summary:");
    println!("  Followers:        {}", stats.total_followers);
    println!("  Following:        {}", stats.total_following);
    println!("  Mutual:           {}", stats.mutual);
    println!("  Not following back: {}", stats.following_only);
    println!("  Not followed back:  {}", stats.followers_only);
    println!("{}", "=".repeat(80));
}

fn print_section(
    title: &str,
    color: &str,
    records: &[IdentityRecord],
    limit: usize,
    use_color: bool,
) {
    let (color, reset) = if use_color { (color, "\x1b[0m") } else { ("", "") };

    println!("\n{}{} ({}){}", color, title, records.len(), reset);
    println!("{}", "-".repeat(80));

    for record in records.iter().take(limit) {
        println!(
            "  {:<40} {}",
            truncate(&record.handle, 40),
            format_date(record.timestamp)
        );
    }
    if records.len() > limit {
        println!("  ... and {} more", records.len() - limit);
    }
}

fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
