//! Fans card images out over a pool of workers and collects the records.

use std::path::{Path, PathBuf};
use std::thread;

use super::csv_writer::write_csv;
use super::queue::{create_result_channel, create_work_queue, WorkItem, WorkOutcome, WorkResult};
use super::worker::run_worker;
use crate::extract::{CardStatsExtractor, ExtractedCardStats, PropertySchema};
use crate::layout::CardType;
use crate::ocr::Recognizer;

/// Counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub extracted: usize,
    pub no_record: usize,
    pub unreadable: usize,
}

/// Records from one batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchOutput {
    pub cards: Vec<ExtractedCardStats>,
    /// Images that produced no record, for manual review
    pub skipped: Vec<PathBuf>,
    pub summary: BatchSummary,
}

impl BatchOutput {
    pub fn of_type(&self, card_type: CardType) -> Vec<&ExtractedCardStats> {
        self.cards
            .iter()
            .filter(|c| c.card_type() == card_type)
            .collect()
    }
}

/// Processes every image with `workers` threads.
///
/// `make_extractor` is called once per worker so each worker owns its own
/// recognizer.
pub fn run_batch<R, F>(images: Vec<PathBuf>, workers: usize, make_extractor: F) -> BatchOutput
where
    R: Recognizer + Send + 'static,
    F: Fn() -> CardStatsExtractor<R>,
{
    let workers = workers.clamp(1, images.len().max(1));
    crate::log(&format!(
        "Processing {} images with {} workers",
        images.len(),
        workers
    ));

    let (sender, receiver) = create_work_queue();
    let (result_sender, result_receiver) = create_result_channel();

    let handles: Vec<_> = (0..workers)
        .map(|id| {
            let receiver = receiver.clone();
            let results = result_sender.clone();
            let extractor = make_extractor();
            thread::spawn(move || run_worker(id, receiver, results, extractor))
        })
        .collect();
    drop(result_sender);

    for (index, path) in images.into_iter().enumerate() {
        if sender.send(WorkItem::new(index, path)).is_err() {
            crate::log("All workers exited early");
            break;
        }
    }
    drop(sender);

    let mut results: Vec<WorkResult> = result_receiver.iter().collect();

    for (id, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            crate::log(&format!("Worker {} panicked", id));
        }
    }

    results.sort_by_key(|r| r.index);

    let mut output = BatchOutput::default();
    for result in results {
        output.summary.processed += 1;
        match result.outcome {
            WorkOutcome::Extracted(stats) => {
                output.summary.extracted += 1;
                output.cards.push(stats);
            }
            WorkOutcome::NoRecord => {
                output.summary.no_record += 1;
                output.skipped.push(result.path);
            }
            WorkOutcome::Unreadable => {
                output.summary.unreadable += 1;
                output.skipped.push(result.path);
            }
        }
    }

    for path in &output.skipped {
        crate::log(&format!("Skipped: {}", path.display()));
    }

    crate::log(&format!(
        "Batch complete: {} processed, {} extracted, {} without record, {} unreadable",
        output.summary.processed,
        output.summary.extracted,
        output.summary.no_record,
        output.summary.unreadable
    ));

    output
}

/// Writes one CSV per card type into `dir`. A failed file is logged and
/// does not stop the other.
pub fn write_outputs(
    dir: &Path,
    output: &BatchOutput,
    schema: &PropertySchema,
    goalies_csv: &str,
    skaters_csv: &str,
) {
    for (card_type, file_name) in [(CardType::Goalie, goalies_csv), (CardType::Skater, skaters_csv)] {
        let path = dir.join(file_name);
        let cards = output.of_type(card_type);
        if let Err(e) = write_csv(&path, schema.columns(card_type), &cards) {
            crate::log(&format!("Problem writing CSV to {}: {:#}", path.display(), e));
        }
    }
}
