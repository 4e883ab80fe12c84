/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::Network;
use crate::error::PageRankError;
use crate::rank::PageIdAndRank;

/// A PageRank computation over a [`Network`].
pub trait PageRankComputer {
    /// Computes the PageRank of every page of `network`.
    ///
    /// # Arguments
    ///
    /// * `network`: the pages to rank.
    ///
    /// * `alpha`: the damping factor, in the open interval (0 . . 1).
    ///
    /// * `iterations`: the maximum number of iterations; if the computation
    ///   has not converged after this many iterations, it fails with
    ///   [`PageRankError::NonConvergence`].
    ///
    /// * `tolerance`: the computation stops as soon as the ℓ₁ norm of the
    ///   difference between two successive approximations is smaller than this
    ///   value.
    ///
    /// The result contains one entry per page, in no particular order.
    fn compute_for_network<N: Network>(
        &self,
        network: &N,
        alpha: f64,
        iterations: usize,
        tolerance: f64,
    ) -> Result<Vec<PageIdAndRank>, PageRankError>;

    /// Returns a human-readable name for this computer.
    fn name(&self) -> String;
}
