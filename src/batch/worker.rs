//! Worker thread loop.

use std::sync::mpsc::Sender;

use super::queue::{SharedReceiver, WorkOutcome, WorkResult};
use crate::extract::CardStatsExtractor;
use crate::ocr::{load_card_image, Recognizer};

/// Runs one worker until the work queue closes.
///
/// The worker owns its extractor, and with it its recognizer, so no two
/// workers ever share a recognition engine.
pub fn run_worker<R: Recognizer>(
    worker_id: usize,
    receiver: SharedReceiver,
    results: Sender<WorkResult>,
    extractor: CardStatsExtractor<R>,
) {
    crate::log(&format!("Worker {} started", worker_id));

    loop {
        let next = match receiver.lock() {
            Ok(queue) => queue.recv(),
            Err(_) => {
                crate::log(&format!("Worker {}: work queue poisoned, exiting", worker_id));
                break;
            }
        };

        let Ok(item) = next else {
            // Channel closed, sender was dropped
            break;
        };

        crate::log(&format!("Processing \"{}\"...", item.path.display()));

        let outcome = match load_card_image(&item.path) {
            Ok(img) => match extractor.extract(&img) {
                Some(stats) => WorkOutcome::Extracted(stats),
                None => {
                    crate::log(&format!("No record for \"{}\"", item.path.display()));
                    WorkOutcome::NoRecord
                }
            },
            Err(e) => {
                crate::log(&format!("Worker {}: {:#}", worker_id, e));
                WorkOutcome::Unreadable
            }
        };

        let result = WorkResult {
            index: item.index,
            path: item.path,
            outcome,
        };
        if results.send(result).is_err() {
            crate::log(&format!("Worker {}: result channel closed, exiting", worker_id));
            break;
        }
    }

    crate::log(&format!("Worker {} finished", worker_id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::queue::{create_result_channel, create_work_queue, WorkItem};
    use crate::extract::testing::ScriptedRecognizer;
    use crate::extract::NormalizationRules;
    use crate::layout::Layout;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;
    use tempfile::tempdir;

    fn extractor() -> CardStatsExtractor<ScriptedRecognizer> {
        CardStatsExtractor::new(
            ScriptedRecognizer::new(),
            Arc::new(Layout::default()),
            Arc::new(NormalizationRules::standard().unwrap()),
        )
    }

    #[test]
    fn test_worker_exits_when_channel_closes() {
        let (sender, receiver) = create_work_queue();
        let (result_sender, _result_receiver) = create_result_channel();

        let handle = thread::spawn(move || run_worker(0, receiver, result_sender, extractor()));

        drop(sender);
        handle.join().expect("Worker thread panicked");
    }

    #[test]
    fn test_worker_reports_each_item() {
        let dir = tempdir().unwrap();
        let small = dir.path().join("small.png");
        image::RgbaImage::new(8, 8).save(&small).unwrap();
        let missing = dir.path().join("missing.png");

        let (sender, receiver) = create_work_queue();
        let (result_sender, result_receiver) = create_result_channel();

        sender.send(WorkItem::new(0, small.clone())).unwrap();
        sender.send(WorkItem::new(1, missing.clone())).unwrap();
        drop(sender);

        run_worker(0, receiver, result_sender, extractor());

        let results: Vec<WorkResult> = result_receiver.iter().collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].path, small);
        assert_eq!(results[0].outcome, WorkOutcome::NoRecord);
        assert_eq!(results[1].path, PathBuf::from(&missing));
        assert_eq!(results[1].outcome, WorkOutcome::Unreadable);
    }
}
