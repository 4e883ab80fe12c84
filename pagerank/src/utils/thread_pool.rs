/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::Partition;
use crate::error::PageRankError;
use std::ops::Range;

/// A fixed-size pool of worker threads executing fork-join phases.
///
/// The threads are started once, when the pool is created, and reused by all
/// subsequent phases. A phase, started by [`run_phase`](Self::run_phase),
/// splits an index range using a [`Partition`] with one part per worker; each
/// worker processes exactly its own part, and the call returns only after all
/// workers are done, so successive phases are separated by a join barrier.
#[derive(Debug)]
pub struct PhasePool {
    thread_pool: rayon::ThreadPool,
}

impl PhasePool {
    /// Creates a pool with `num_threads` worker threads.
    pub fn new(num_threads: usize) -> Result<Self, PageRankError> {
        if num_threads == 0 {
            return Err(PageRankError::ZeroThreads);
        }
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("webrank-worker-{i}"))
            .build()?;
        log::debug!("Using {} threads", thread_pool.current_num_threads());
        Ok(Self { thread_pool })
    }

    /// Returns the number of worker threads.
    pub fn num_threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    /// Runs a phase over `[0 . . len)`.
    ///
    /// The closure is called exactly once on each worker, with the index of
    /// the worker and its part of the range (possibly empty). The results are
    /// returned in worker order.
    pub fn run_phase<R: Send>(
        &self,
        len: usize,
        op: impl Fn(usize, Range<usize>) -> R + Sync,
    ) -> Vec<R> {
        let partition = Partition::new(len, self.num_threads());
        self.thread_pool.broadcast(|ctx| {
            let worker = ctx.index();
            op(worker, partition.part(worker))
        })
    }
}
