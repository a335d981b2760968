//! docline - document directory → search-index JSON Lines
//!
//! Extracts text and bibliographic metadata from a folder of documents
//! and writes one bounded, sanitized record per document.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "docline")]
#[command(about = "Turn a directory of documents into search-index JSON Lines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./docline.toml or ~/.config/docline/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Extract records from a directory of documents
    Extract(cmd::extract::ExtractArgs),
    /// Check a JSON Lines file and report field coverage
    Inspect(cmd::inspect::InspectArgs),
    /// Show current configuration
    Config,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(docline_core::ProgressContext::new());

    // Logging:
    //   TTY:     warn unless --debug (the progress bar shows activity)
    //   non-TTY: info unless --debug (logs are the only progress indicator)
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = is_tty && !cli.debug;
    docline_core::init_logging(quiet, cli.debug, multi);

    if let Err(e) = docline_core::install_signal_handlers() {
        log::warn!("Failed to register signal handlers: {e}");
    }

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Extract(args) => cmd::extract::run(args, &config, &progress),
        Command::Inspect(args) => cmd::inspect::run(args).map(|()| ExitCode::SUCCESS),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec![
                "Max full_text chars",
                &config.extract.max_full_text_chars.to_string(),
            ]);
            table.add_row(vec![
                "Min title words",
                &config.extract.min_title_words.to_string(),
            ]);
            table.add_row(vec!["Workers", &config.extract.workers.to_string()]);
            table.add_row(vec![
                "Formats",
                &docline_extract::ExtractorRegistry::default()
                    .extensions()
                    .join(", "),
            ]);

            eprintln!("\n{table}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
