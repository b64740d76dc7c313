// Dotviz
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Bounded-rate batch draining of a bursty intake queue
//!
//! Producers append freely; `process` drains the queue in fixed-size batches
//! in strict FIFO order, awaiting an async handler per batch and sleeping
//! between batches. A handler failure is retried a bounded number of times,
//! then recorded, and the remaining batches continue. The queue lock is never
//! held across an await.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::{debug, warn};

use dotviz_common::Diagnostic;

const MIN_BATCH_SIZE: usize = 1;
const MAX_BATCH_SIZE: usize = 100;
const MAX_DELAY_MS: u64 = 1_000;
const MAX_RETRIES: u32 = 10;

/// Batch draining configuration, clamped at construction
///
/// `batch_size` to `[1, 100]`, `delay_ms` to `[0, 1000]`, `max_retries` to
/// `[0, 10]`.
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    batch_size: usize,
    delay_ms: u64,
    max_retries: u32,
}

impl BatchConfig {
    pub fn new(batch_size: usize, delay_ms: u64, max_retries: u32) -> Self {
        Self {
            batch_size: batch_size.clamp(MIN_BATCH_SIZE, MAX_BATCH_SIZE),
            delay_ms: delay_ms.min(MAX_DELAY_MS),
            max_retries: max_retries.min(MAX_RETRIES),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new(10, 50, 3)
    }
}

/// Result of handling one batch
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome<R> {
    Completed(R),
    Failed(Diagnostic),
}

impl<R> BatchOutcome<R> {
    pub fn is_failed(&self) -> bool {
        matches!(self, BatchOutcome::Failed(_))
    }
}

/// Clears the draining flag when a drain ends, including on cancellation
///
/// `process` can be dropped at an await point; without this the flag would
/// stay set and every later drain would be a permanent no-op.
struct DrainGuard<'a>(&'a AtomicBool);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Unbounded intake queue drained at a bounded rate
pub struct BatchProcessor<T> {
    queue: Mutex<VecDeque<T>>,
    draining: AtomicBool,
    config: BatchConfig,
}

impl<T: Clone> BatchProcessor<T> {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            draining: AtomicBool::new(false),
            config,
        }
    }

    /// Appends a single item to the intake queue
    pub fn add(&self, item: T) {
        self.queue.lock().push_back(item);
    }

    /// Appends many items, preserving their order
    pub fn add_batch(&self, items: impl IntoIterator<Item = T>) {
        self.queue.lock().extend(items);
    }

    pub fn queue_len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::SeqCst)
    }

    /// Drains the queue in FIFO batches through `handler`
    ///
    /// A no-op returning no outcomes if a drain is already running or the
    /// queue is empty. A failing batch is retried up to the configured
    /// limit, then recorded as failed; later batches still run. Sleeps the
    /// configured delay between batches.
    pub async fn process<H, Fut, R, E>(&self, mut handler: H) -> Vec<BatchOutcome<R>>
    where
        H: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: fmt::Display,
    {
        if self.draining.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_err() {
            debug!("drain already in progress, skipping");
            return Vec::new();
        }
        let _guard = DrainGuard(&self.draining);

        let mut outcomes = Vec::new();
        loop {
            let batch = self.take_batch();
            if batch.is_empty() {
                break;
            }

            outcomes.push(self.run_batch(&mut handler, batch).await);

            let more_pending = !self.queue.lock().is_empty();
            if more_pending && self.config.delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.config.delay_ms)).await;
            }
        }

        outcomes
    }

    fn take_batch(&self) -> Vec<T> {
        let mut queue = self.queue.lock();
        let take = self.config.batch_size.min(queue.len());
        queue.drain(..take).collect()
    }

    async fn run_batch<H, Fut, R, E>(&self, handler: &mut H, batch: Vec<T>) -> BatchOutcome<R>
    where
        H: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: fmt::Display,
    {
        let mut attempt = 0;
        loop {
            match handler(batch.clone()).await {
                Ok(result) => return BatchOutcome::Completed(result),
                Err(err) => {
                    attempt += 1;
                    if attempt > self.config.max_retries {
                        return BatchOutcome::Failed(
                            Diagnostic::computation_failure("batch_processor", err.to_string()).emit(),
                        );
                    }
                    warn!(attempt, error = %err, "batch handler failed, retrying");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn processor(batch_size: usize) -> BatchProcessor<i32> {
        BatchProcessor::new(BatchConfig::new(batch_size, 0, 0))
    }

    #[test]
    fn test_config_clamps() {
        let config = BatchConfig::new(0, 99_999, 99);
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.delay_ms, 1_000);
        assert_eq!(config.max_retries, 10);

        let config = BatchConfig::new(500, 0, 0);
        assert_eq!(config.batch_size, 100);
    }

    #[tokio::test]
    async fn test_fifo_batches_of_configured_size() {
        let processor = processor(2);
        processor.add_batch(vec![1, 2, 3, 4, 5]);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let outcomes = processor
            .process(move |batch| {
                let seen = Arc::clone(&seen_clone);
                async move {
                    seen.lock().push(batch);
                    Ok::<_, String>(())
                }
            })
            .await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(*seen.lock(), vec![vec![1, 2], vec![3, 4], vec![5]]);
        assert_eq!(processor.queue_len(), 0);
        assert!(!processor.is_draining());
    }

    #[tokio::test]
    async fn test_empty_queue_is_a_noop() {
        let processor = processor(2);
        let outcomes = processor.process(|_| async { Ok::<_, String>(()) }).await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_failed_batch_does_not_abort_the_rest() {
        let processor = processor(2);
        processor.add_batch(vec![1, 2, 3, 4]);

        let outcomes = processor
            .process(|batch| async move {
                if batch.contains(&1) { Err("poisoned batch".to_string()) } else { Ok(batch.len()) }
            })
            .await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].is_failed());
        assert_eq!(outcomes[1], BatchOutcome::Completed(2));
    }

    #[tokio::test]
    async fn test_failed_batch_is_retried_up_to_limit() {
        let processor: BatchProcessor<i32> = BatchProcessor::new(BatchConfig::new(10, 0, 2));
        processor.add(1);

        let attempts = Arc::new(Mutex::new(0u32));
        let attempts_clone = Arc::clone(&attempts);
        let outcomes = processor
            .process(move |_| {
                let attempts = Arc::clone(&attempts_clone);
                async move {
                    *attempts.lock() += 1;
                    Err::<(), _>("always fails")
                }
            })
            .await;

        // Initial attempt plus two retries
        assert_eq!(*attempts.lock(), 3);
        assert!(outcomes[0].is_failed());
    }

    #[tokio::test]
    async fn test_cancelled_drain_releases_the_flag() {
        let processor = Arc::new(BatchProcessor::new(BatchConfig::new(1, 1_000, 0)));
        processor.add_batch(vec![1, 2]);

        let draining = Arc::clone(&processor);
        let handle = tokio::spawn(async move { draining.process(|batch| async move { Ok::<_, String>(batch) }).await });

        // Let the drain reach its inter-batch sleep, then cancel it there
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        handle.abort();
        let _ = handle.await;

        assert!(!processor.is_draining());

        // A later drain still runs and picks up the remaining item
        let outcomes = processor.process(|batch| async move { Ok::<_, String>(batch) }).await;
        assert_eq!(outcomes, vec![BatchOutcome::Completed(vec![2])]);
    }

    #[tokio::test]
    async fn test_items_added_during_drain_are_processed() {
        let processor = Arc::new(processor(2));
        processor.add_batch(vec![1, 2]);

        let late_adder = Arc::clone(&processor);
        let outcomes = processor
            .process(move |batch| {
                let late_adder = Arc::clone(&late_adder);
                async move {
                    if batch == vec![1, 2] {
                        late_adder.add(99);
                    }
                    Ok::<_, String>(batch)
                }
            })
            .await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[1], BatchOutcome::Completed(vec![99]));
    }
}
