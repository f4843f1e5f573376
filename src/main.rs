//! Card Stats Extractor
//!
//! Reads fixed-layout 1920x1080 player card screenshots with Tesseract and
//! writes one CSV per card type (goalies, skaters).

mod batch;
mod cli;
mod config;
mod extract;
mod layout;
mod ocr;
mod paths;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Arc;

use cli::Cli;
use extract::{CardStatsExtractor, NormalizationRules, PropertySchema};
use layout::Layout;
use ocr::TesseractEngine;

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("card_stats.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        log(&format!("[PANIC]{} {}", location, msg));
    }));

    let cli = Cli::parse();

    paths::ensure_directories()?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let mut loaded = config::load_config(&config_path);
    cli.apply_overrides(&mut loaded);
    config::init_config(loaded);
    let config = config::get_config();

    if !cli.directory.is_dir() {
        bail!("Input directory not found: {}", cli.directory.display());
    }

    let layout = Arc::new(match &config.layout_path {
        Some(path) => {
            log(&format!("Using layout from {}", path.display()));
            Layout::from_json_file(path)?
        }
        None => Layout::default(),
    });
    let rules = Arc::new(NormalizationRules::standard()?);
    let schema = PropertySchema::new(&layout, &config.column_aliases);

    let tesseract = ocr::ensure_tesseract(
        config.tesseract_path.as_deref(),
        config.tessdata_dir.as_deref(),
        &config.language,
    )?;

    let images = paths::list_card_images(&cli.directory).with_context(|| {
        format!("Failed to list images in {}", cli.directory.display())
    })?;
    if images.is_empty() {
        log(&format!("No .png files found in {}", cli.directory.display()));
    }

    let output = batch::run_batch(images, config.worker_count(), || {
        let engine = TesseractEngine::new(
            tesseract.executable.clone(),
            tesseract.tessdata.clone(),
            config.tesseract_options(),
        );
        CardStatsExtractor::new(engine, layout.clone(), rules.clone())
    });

    batch::write_outputs(
        &cli.directory,
        &output,
        &schema,
        &config.goalies_csv,
        &config.skaters_csv,
    );

    Ok(())
}
