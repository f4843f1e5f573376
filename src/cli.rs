use clap::Parser;
use std::path::PathBuf;

use crate::config::ExtractorConfig;

/// Extracts player stats from card screenshots into goalie and skater CSVs.
#[derive(Parser, Debug)]
#[command(name = "card-stats")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory of 1920x1080 .png card captures; CSVs are written here too
    #[arg(short, long)]
    pub directory: PathBuf,

    /// Tesseract data directory containing the traineddata files
    #[arg(short, long)]
    pub tessdata: Option<PathBuf>,

    /// Number of worker threads (default: available parallelism)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Config file (default: config.json next to the executable)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Command-line values take precedence over the config file.
    pub fn apply_overrides(&self, config: &mut ExtractorConfig) {
        if let Some(tessdata) = &self.tessdata {
            config.tessdata_dir = Some(tessdata.clone());
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
    }
}
