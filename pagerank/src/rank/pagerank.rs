/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Multithreaded PageRank by power iteration.
//!
//! # The formula
//!
//! If we denote with *P* the row-normalized adjacency matrix of the network
//! (with zero rows for dangling pages), with **d** the characteristic vector of
//! dangling pages, with *n* the number of pages and with α the damping
//! factor, PageRank is the stationary distribution **x** of
//!
//! > **x** = **x** ( α *P*  +  α **d**ᵀ **1** / *n*  +  (1 − α) **1**ᵀ **1** / *n* ),
//!
//! that is, dangling pages distribute their rank uniformly over all pages.
//! Links are counted with multiplicity: a page linking twice to another one
//! passes it twice the rank, and self-loops are ordinary links.
//!
//! # The iteration
//!
//! Starting from the uniform vector, each iteration computes a new
//! approximation **x**⁽*ᵗ* ⁺ ¹⁾ from a snapshot of the previous one:
//!
//! > *xᵢ*⁽*ᵗ* ⁺ ¹⁾ = α *D* / *n*  +  (1 − α) / *n*  +  α ∑_(*j* → *i*) *xⱼ*⁽*ᵗ*⁾ / *dⱼ*,
//!
//! where *D* is the sum of the ranks of dangling pages in **x**⁽*ᵗ*⁾ and *dⱼ*
//! is the outdegree of *j*. The computation stops as soon as
//! ‖**x**⁽*ᵗ* ⁺ ¹⁾ − **x**⁽*ᵗ*⁾‖₁ is smaller than the tolerance; if this does not
//! happen within the given number of iterations, the computation fails.
//!
//! # Parallelism
//!
//! All phases are executed on a [`PhasePool`] whose threads are started when
//! the [`MultiThreadedPageRank`] is created. Every iteration is made of two
//! phases:
//!
//! 1. the _dangling-sum_ phase, in which each worker sums the ranks of its
//!    part of the dangling pages;
//! 2. the _rank-update_ phase, in which each worker computes the new rank of
//!    the pages of its part, and the ℓ₁ norm of their change.
//!
//! Workers accumulate in local (compensated) sums, which are merged into a
//! shared accumulator under a lock only once per phase. The rank vector is
//! shared among workers via [`SyncCell`]: each worker writes only the entries
//! of its own part, whereas the previous approximation is read-only during
//! the phase.
//!
//! [`SyncCell`]: sync_cell_slice::SyncCell

pub mod preds {
    //! Predicates implementing stopping conditions.
    //!
    //! The engine evaluates two predicates after each iteration: an
    //! [`L1Norm`] predicate telling whether the computation has converged,
    //! and a [`MaxIter`] predicate telling whether the iteration budget is
    //! exhausted.
    //!
    //! # Examples
    //! ```
    //! use predicates::prelude::*;
    //! use webrank::rank::pagerank::preds::{L1Norm, MaxIter, PredParams};
    //!
    //! let converged = L1Norm::try_from(1E-6).unwrap();
    //! let exhausted = MaxIter::from(100);
    //! let params = PredParams { iteration: 3, difference: 1E-7 };
    //! assert!(converged.eval(&params));
    //! assert!(!exhausted.eval(&params));
    //! ```

    use crate::error::PageRankError;
    use predicates::{Predicate, reflection::PredicateReflection};
    use std::fmt::Display;

    /// This structure is passed to stopping predicates to provide the
    /// information that is needed to evaluate them.
    #[derive(Debug)]
    pub struct PredParams {
        /// The number of iterations performed so far.
        pub iteration: usize,
        /// The ℓ₁ norm of the difference between the last two approximations.
        pub difference: f64,
    }

    /// Stops after the provided number of iterations.
    #[derive(Debug, Clone)]
    pub struct MaxIter {
        max_iter: usize,
    }

    impl MaxIter {
        pub const DEFAULT_MAX_ITER: usize = 100;
    }

    impl From<usize> for MaxIter {
        fn from(max_iter: usize) -> Self {
            MaxIter { max_iter }
        }
    }

    impl Default for MaxIter {
        fn default() -> Self {
            Self::from(Self::DEFAULT_MAX_ITER)
        }
    }

    impl Display for MaxIter {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_fmt(format_args!("(max iter: {})", self.max_iter))
        }
    }

    impl PredicateReflection for MaxIter {}

    impl Predicate<PredParams> for MaxIter {
        fn eval(&self, pred_params: &PredParams) -> bool {
            pred_params.iteration >= self.max_iter
        }
    }

    /// Stops when the ℓ₁ norm of the difference between successive
    /// approximations is strictly smaller than a given tolerance.
    #[derive(Debug, Clone)]
    pub struct L1Norm {
        tolerance: f64,
    }

    impl L1Norm {
        pub const DEFAULT_TOLERANCE: f64 = 1E-6;
    }

    impl TryFrom<f64> for L1Norm {
        type Error = PageRankError;
        fn try_from(tolerance: f64) -> Result<Self, PageRankError> {
            if tolerance.is_nan() || tolerance <= 0.0 {
                return Err(PageRankError::InvalidTolerance(tolerance));
            }
            Ok(L1Norm { tolerance })
        }
    }

    impl Default for L1Norm {
        fn default() -> Self {
            L1Norm {
                tolerance: Self::DEFAULT_TOLERANCE,
            }
        }
    }

    impl Display for L1Norm {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_fmt(format_args!("(norm: {})", self.tolerance))
        }
    }

    impl PredicateReflection for L1Norm {}

    impl Predicate<PredParams> for L1Norm {
        fn eval(&self, pred_params: &PredParams) -> bool {
            pred_params.difference < self.tolerance
        }
    }
}

use super::{Indices, PageIdAndRank, assign_ids};
use crate::error::PageRankError;
use crate::traits::{Network, PageRankComputer};
use crate::utils::PhasePool;
use dsi_progress_logger::{ConcurrentProgressLog, ProgressLog, no_logging};
use kahan::KahanSum;
use predicates::Predicate;
use std::collections::HashMap;
use std::sync::Mutex;
use sync_cell_slice::SyncSlice;

/// Computes PageRank by power iteration on a fixed pool of threads.
///
/// The threads are started by the [constructor](Self::new) and reused by all
/// computations. Each computation assigns identifiers to the pages, builds the
/// supporting [`Indices`], and then iterates until convergence (see the
/// [module-level documentation](self)).
///
/// # Examples
///
/// ```
/// use webrank::graphs::vec_network::VecNetwork;
/// use webrank::rank::MultiThreadedPageRank;
/// use webrank::traits::PageRankComputer;
///
/// // a → b, b → c, c → a, d → a
/// let mut network: VecNetwork = VecNetwork::default();
/// network.add_page("a", ["b"])?;
/// network.add_page("b", ["c"])?;
/// network.add_page("c", ["a"])?;
/// network.add_page("d", ["a"])?;
///
/// let pr = MultiThreadedPageRank::new(2)?;
/// assert_eq!(pr.name(), "MultiThreadedPageRank[2]");
///
/// let ranks = pr.compute_for_network(&network, 0.85, 1000, 1E-9)?;
/// assert_eq!(ranks.len(), 4);
/// assert!((ranks.iter().map(|r| r.rank).sum::<f64>() - 1.0).abs() < 1E-9);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct MultiThreadedPageRank {
    pool: PhasePool,
}

impl MultiThreadedPageRank {
    /// Creates a new PageRank computer using `num_threads` threads.
    ///
    /// Fails with [`PageRankError::ZeroThreads`] if `num_threads` is zero; in
    /// that case, no thread is started.
    ///
    /// Otherwise, the worker threads are started here and reused by every
    /// computation, so they exist before the damping factor and the
    /// tolerance of a computation are known. Those are validated by
    /// [`compute_for_network`](PageRankComputer::compute_for_network) before
    /// any phase runs.
    pub fn new(num_threads: usize) -> Result<Self, PageRankError> {
        Ok(Self {
            pool: PhasePool::new(num_threads)?,
        })
    }

    /// Returns the number of threads used by the computation.
    pub fn num_threads(&self) -> usize {
        self.pool.num_threads()
    }

    /// Computes PageRank, logging progress.
    ///
    /// `pl` is a sequential [`ProgressLog`] used for iteration counting. `cpl`
    /// is a [`ConcurrentProgressLog`] used for page-level progress inside each
    /// phase. Their options will be preserved, making thus possible to
    /// customize the logs.
    ///
    /// It is possible to specify either `pl` or `cpl` as
    /// [`no_logging![]`](dsi_progress_logger::no_logging) if you don't want to
    /// log the corresponding part of the computation.
    ///
    /// See [`PageRankComputer::compute_for_network`] for the meaning of the
    /// other arguments. The result contains one entry per page, in page order.
    pub fn compute_for_network_with_logging<N: Network + ?Sized>(
        &self,
        network: &N,
        alpha: f64,
        iterations: usize,
        tolerance: f64,
        pl: &mut impl ProgressLog,
        cpl: &mut impl ConcurrentProgressLog,
    ) -> Result<Vec<PageIdAndRank>, PageRankError> {
        // Note that 0.0..1.0 is [0.0..1.0) in mathematical notation
        if alpha == 0.0 || !(0.0..1.0).contains(&alpha) {
            return Err(PageRankError::InvalidAlpha(alpha));
        }
        let converged = preds::L1Norm::try_from(tolerance)?;
        let exhausted = preds::MaxIter::from(iterations);
        let n = network.size();
        if n == 0 {
            return Err(PageRankError::EmptyNetwork);
        }
        if network.pages().len() != n {
            return Err(PageRankError::InternalInconsistency {
                expected: n,
                found: network.pages().len(),
            });
        }

        log::info!("Computer: {}", self.name());
        log::info!("Alpha: {}", alpha);
        log::info!("Stopping criterion: {} or {}", converged, exhausted);

        let ids = assign_ids(network, &self.pool, cpl)?;
        let indices = Indices::build(network, &ids, &self.pool, cpl)?;

        // From now on pages are addressed by their index
        let position: HashMap<_, _> = ids.iter().enumerate().map(|(i, id)| (id, i)).collect();

        let resolved = self.pool.run_phase(n, |_, range| {
            let mut predecessors = Vec::with_capacity(range.len());
            let mut inv_outdegrees = Vec::with_capacity(range.len());
            for i in range {
                predecessors.push(
                    indices
                        .in_edges(&ids[i])
                        .iter()
                        .map(|source| position[source])
                        .collect::<Box<[usize]>>(),
                );
                inv_outdegrees.push(match indices.outdegree(&ids[i]) {
                    Some(0) | None => 0.0,
                    Some(d) => 1.0 / d as f64,
                });
            }
            (predecessors, inv_outdegrees)
        });
        let mut predecessors = Vec::with_capacity(n);
        let mut inv_outdegrees = Vec::with_capacity(n);
        for (p, d) in resolved {
            predecessors.extend(p);
            inv_outdegrees.extend(d);
        }
        let dangling = indices
            .dangling()
            .iter()
            .map(|id| position[id])
            .collect::<Box<[usize]>>();

        let mut rank = ids
            .iter()
            .map(|id| indices.rank()[id])
            .collect::<Box<[f64]>>();
        let mut previous = rank.clone();
        drop(position);
        drop(indices);

        let inv_n = 1.0 / n as f64;
        let mut difference = f64::INFINITY;
        let mut iteration = 0;

        pl.item_name("iteration");
        pl.expected_updates(Some(iterations));
        pl.start(format!("Computing PageRank (alpha={alpha})..."));

        loop {
            if exhausted.eval(&preds::PredParams {
                iteration,
                difference,
            }) {
                pl.done();
                return Err(PageRankError::NonConvergence {
                    iterations,
                    difference,
                });
            }

            previous.copy_from_slice(&rank);

            // Dangling-sum phase
            let dangle_sum_accum = Mutex::new(0.0f64);
            self.pool.run_phase(dangling.len(), |_, range| {
                let mut local_dangle_sum: KahanSum<f64> = KahanSum::new();
                for &d in &dangling[range] {
                    local_dangle_sum += previous[d];
                }
                *dangle_sum_accum.lock().unwrap() += local_dangle_sum.sum();
            });
            let dangle_sum = alpha * dangle_sum_accum.into_inner().unwrap();

            // Rank-update phase
            let difference_accum = Mutex::new(0.0f64);
            let base = dangle_sum * inv_n + (1.0 - alpha) * inv_n;
            let rank_sync = rank.as_sync_slice();

            cpl.item_name("page");
            cpl.expected_updates(Some(n));
            cpl.start(format!("Iteration {}...", iteration + 1));

            self.pool.run_phase(n, |_, range| {
                let mut local_cpl = cpl.clone();
                let mut local_difference: KahanSum<f64> = KahanSum::new();

                for i in range.clone() {
                    let mut sigma: KahanSum<f64> = KahanSum::new();
                    for &j in predecessors[i].iter() {
                        sigma += previous[j] * inv_outdegrees[j];
                    }
                    let new_rank = base + alpha * sigma.sum();
                    local_difference += (previous[i] - new_rank).abs();
                    // SAFETY: each worker writes only the entries of its own
                    // part, and nobody reads the rank vector during the phase.
                    unsafe {
                        rank_sync[i].set(new_rank);
                    }
                }

                local_cpl.update_with_count(range.len());
                *difference_accum.lock().unwrap() += local_difference.sum();
            });

            cpl.done();

            difference = difference_accum.into_inner().unwrap();
            iteration += 1;

            log::info!("Iteration {}: difference = {}", iteration, difference);

            pl.update_and_display();

            if converged.eval(&preds::PredParams {
                iteration,
                difference,
            }) {
                break;
            }
        }

        pl.done();

        let result = ids
            .iter()
            .zip(rank.iter())
            .map(|(id, &rank)| PageIdAndRank::new(id.clone(), rank))
            .collect::<Vec<_>>();

        if result.len() != n {
            return Err(PageRankError::InternalInconsistency {
                expected: n,
                found: result.len(),
            });
        }

        log::info!("Converged after {} iteration(s)", iteration);

        Ok(result)
    }
}

impl PageRankComputer for MultiThreadedPageRank {
    fn compute_for_network<N: Network>(
        &self,
        network: &N,
        alpha: f64,
        iterations: usize,
        tolerance: f64,
    ) -> Result<Vec<PageIdAndRank>, PageRankError> {
        self.compute_for_network_with_logging(
            network,
            alpha,
            iterations,
            tolerance,
            no_logging![],
            no_logging![],
        )
    }

    fn name(&self) -> String {
        format!("MultiThreadedPageRank[{}]", self.num_threads())
    }
}
