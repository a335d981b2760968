//! Extract subcommand - turn a document directory into JSON Lines records

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use docline_core::SharedProgress;
use docline_extract::ExtractorRegistry;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Directory of source documents (*.pdf, *.txt)
    #[arg(short, long)]
    pub source_dir: PathBuf,

    /// Output JSON Lines file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Truncate full_text to this many characters
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Minimum words for a line to be taken as the title
    #[arg(long)]
    pub min_title_words: Option<usize>,

    /// Number of parallel workers
    #[arg(short, long)]
    pub workers: Option<usize>,
}

impl ExtractArgs {
    /// Merge flags over file configuration
    fn to_config(&self, config: &Config) -> docline_extract::Config {
        docline_extract::Config {
            source_dir: self.source_dir.clone(),
            output_path: self.output.clone(),
            max_full_text_chars: self
                .max_chars
                .unwrap_or(config.extract.max_full_text_chars),
            min_title_words: self
                .min_title_words
                .unwrap_or(config.extract.min_title_words),
            workers: self.workers.unwrap_or(config.extract.workers),
        }
    }
}

pub fn run(args: ExtractArgs, config: &Config, progress: &SharedProgress) -> Result<ExitCode> {
    let extract_config = args.to_config(config);
    let registry = ExtractorRegistry::default();

    let summary = docline_extract::run(&extract_config, &registry, progress)?;
    if progress.is_tty() {
        summary.print();
    } else {
        summary.log();
    }

    if summary.interrupted {
        return Ok(ExitCode::from(130));
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(max_chars: Option<usize>, workers: Option<usize>) -> ExtractArgs {
        ExtractArgs {
            source_dir: PathBuf::from("pdfs"),
            output: PathBuf::from("docs.jsonl"),
            max_chars,
            min_title_words: None,
            workers,
        }
    }

    #[test]
    fn flags_override_file_config() {
        let mut config = Config::default();
        config.extract.max_full_text_chars = 1_000;
        config.extract.workers = 3;
        let merged = args(Some(200), None).to_config(&config);
        assert_eq!(merged.max_full_text_chars, 200);
        assert_eq!(merged.workers, 3);
        assert_eq!(merged.min_title_words, 4);
        assert_eq!(merged.source_dir, PathBuf::from("pdfs"));
    }
}
