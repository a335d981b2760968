//! Inspect subcommand - validate a JSON Lines output and report field coverage

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use docline_core::fmt_num;
use docline_extract::{FieldCoverage, LoadStats, scan_jsonl};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// JSON Lines file produced by `docline extract`
    pub file: PathBuf,
}

fn format_table(stats: &LoadStats, coverage: &FieldCoverage) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Field").fg(Color::Cyan),
            Cell::new("Records").fg(Color::Cyan),
            Cell::new("%").fg(Color::Cyan),
        ]);

    table.add_row(vec![
        Cell::new("lines"),
        Cell::new(fmt_num(stats.lines)),
        Cell::new(""),
    ]);
    let malformed = Cell::new(fmt_num(stats.malformed));
    table.add_row(vec![
        Cell::new("malformed"),
        if stats.malformed > 0 {
            malformed.fg(Color::Yellow)
        } else {
            malformed
        },
        Cell::new(""),
    ]);
    for (name, count) in [
        ("title", coverage.title),
        ("authors", coverage.authors),
        ("year", coverage.year),
        ("abstract", coverage.abstract_text),
    ] {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(fmt_num(count)),
            Cell::new(format!("{:.1}", coverage.pct(count))),
        ]);
    }
    table.to_string()
}

pub fn run(args: InspectArgs) -> Result<()> {
    let (stats, coverage) = scan_jsonl(&args.file)?;
    log::info!(
        "{}: {} records, {} malformed lines",
        args.file.display(),
        fmt_num(stats.records),
        fmt_num(stats.malformed)
    );
    eprintln!("\n{}", format_table(&stats, &coverage));
    Ok(())
}
