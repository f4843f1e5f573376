//! Channels between the batch runner and its worker threads.
//!
//! Work items fan out to every worker through one shared receiver; results
//! come back on a second channel.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::extract::ExtractedCardStats;

/// One card image to process.
#[derive(Debug, Clone)]
pub struct WorkItem {
    /// Position in the sorted input list, used to restore order
    pub index: usize,
    pub path: PathBuf,
}

impl WorkItem {
    pub fn new(index: usize, path: PathBuf) -> Self {
        Self { index, path }
    }
}

/// What happened to one work item.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkOutcome {
    Extracted(ExtractedCardStats),
    /// Image loaded but produced no record (wrong size or failed read)
    NoRecord,
    /// Image could not be loaded
    Unreadable,
}

#[derive(Debug, Clone)]
pub struct WorkResult {
    pub index: usize,
    pub path: PathBuf,
    pub outcome: WorkOutcome,
}

/// Receiver shared by all workers.
pub type SharedReceiver = Arc<Mutex<Receiver<WorkItem>>>;

/// Creates the work queue.
///
/// The channel is unbounded; all items are queued up front and workers
/// drain it until the sender is dropped.
pub fn create_work_queue() -> (Sender<WorkItem>, SharedReceiver) {
    let (sender, receiver) = channel();
    (sender, Arc::new(Mutex::new(receiver)))
}

/// Creates the channel workers report results on.
pub fn create_result_channel() -> (Sender<WorkResult>, Receiver<WorkResult>) {
    channel()
}
