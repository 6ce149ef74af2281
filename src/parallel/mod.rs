//! Multi-document execution
//!
//! Each document is filtered independently: it owns its tree, and the parsed
//! filter set is shared read-only. Small batches run on the calling thread;
//! larger ones run on a dedicated rayon pool sized from the CPU count and
//! the `[parallel]` settings.
//!
//! ```rust
//! use fieldcut::parallel::ExecutionStrategy;
//!
//! let strategy = ExecutionStrategy::auto(100, 50, 8);
//! assert!(matches!(strategy, ExecutionStrategy::Parallel { workers: 8 }));
//!
//! let squares = strategy.execute(&[1, 2, 3], |n| n * n).unwrap();
//! assert_eq!(squares, vec![1, 4, 9]);
//! ```

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::config::ParallelSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: usize },
}

impl ExecutionStrategy {
    /// Threshold decision between sequential and parallel execution.
    ///
    /// Parallel only pays off with at least `min_items_for_parallel` items and
    /// more than one worker.
    #[must_use]
    pub fn auto(
        work_items_count: usize,
        min_items_for_parallel: usize,
        optimal_workers: usize,
    ) -> Self {
        if work_items_count >= min_items_for_parallel && optimal_workers > 1 {
            ExecutionStrategy::Parallel {
                workers: optimal_workers,
            }
        } else {
            ExecutionStrategy::Sequential
        }
    }

    /// Strategy for `document_count` documents under the configured limits
    #[must_use]
    pub fn for_documents(settings: &ParallelSettings, document_count: usize) -> Self {
        let max_workers =
            Self::calculate_optimal_workers(settings.max_threads, settings.thread_percentage);
        let workers = std::cmp::min(max_workers, document_count);
        let strategy = Self::auto(document_count, settings.min_documents, workers);
        tracing::debug!("{} documents, strategy {:?}", document_count, strategy);
        strategy
    }

    /// Workers from available cores and configuration limits.
    ///
    /// ```text
    /// cores * thread_percentage / 100, at least 1,
    /// capped by max_threads_config unless it is 0
    /// ```
    #[must_use]
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();

        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }

    /// Apply `processor` to every item. Results are in item order.
    pub fn execute<T, R, F>(&self, work_items: &[T], processor: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync,
    {
        match self {
            ExecutionStrategy::Sequential => Ok(work_items.iter().map(processor).collect()),
            ExecutionStrategy::Parallel { workers } => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(*workers)
                    .thread_name(|index| format!("fieldcut-worker-{index}"))
                    .build()
                    .context("Failed to start worker pool")?;
                Ok(pool.install(|| work_items.par_iter().map(processor).collect()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(max_threads: usize, min_documents: usize) -> ParallelSettings {
        ParallelSettings {
            max_threads,
            thread_percentage: 100,
            min_documents,
        }
    }

    #[test]
    fn test_auto_strategy() {
        assert_eq!(ExecutionStrategy::auto(5, 10, 8), ExecutionStrategy::Sequential);
        assert_eq!(ExecutionStrategy::auto(10, 10, 8), ExecutionStrategy::Parallel { workers: 8 });
        // a single worker is sequential work with extra overhead
        assert_eq!(ExecutionStrategy::auto(100, 10, 1), ExecutionStrategy::Sequential);
    }

    #[test]
    fn test_calculate_optimal_workers() {
        assert!(ExecutionStrategy::calculate_optimal_workers(0, 75) >= 1);
        assert!(ExecutionStrategy::calculate_optimal_workers(2, 100) <= 2);
        assert_eq!(ExecutionStrategy::calculate_optimal_workers(1, 100), 1);
        assert_eq!(ExecutionStrategy::calculate_optimal_workers(0, 1), 1);
    }

    #[test]
    fn test_for_documents_respects_threshold() {
        assert_eq!(
            ExecutionStrategy::for_documents(&settings(0, 8), 3),
            ExecutionStrategy::Sequential
        );
        assert_eq!(
            ExecutionStrategy::for_documents(&settings(1, 1), 50),
            ExecutionStrategy::Sequential
        );
    }

    #[test]
    fn test_workers_never_exceed_documents() {
        let strategy = ExecutionStrategy::for_documents(&settings(0, 2), 2);
        if let ExecutionStrategy::Parallel { workers } = strategy {
            assert!(workers <= 2);
        }
    }

    #[test]
    fn test_execution_keeps_order() {
        let items: Vec<u32> = (0..200).collect();
        let expected: Vec<u32> = items.iter().map(|n| n * 3).collect();

        let sequential = ExecutionStrategy::Sequential.execute(&items, |n| n * 3).unwrap();
        assert_eq!(sequential, expected);

        let parallel = ExecutionStrategy::Parallel { workers: 4 }
            .execute(&items, |n| n * 3)
            .unwrap();
        assert_eq!(parallel, expected);
    }
}
