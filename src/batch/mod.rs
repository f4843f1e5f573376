//! Batch processing of a directory of card captures.
//!
//! This module provides:
//! - A work queue shared by a pool of worker threads
//! - Worker threads that each own one recognition engine
//! - CSV output, one file per card type

pub mod csv_writer;
pub mod queue;
pub mod runner;
pub mod worker;

pub use runner::{run_batch, write_outputs, BatchOutput, BatchSummary};
