/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! PageRank computation.
//!
//! A computation is organized in stages, each made of one or more fork-join
//! phases executed on a [`PhasePool`](crate::utils::PhasePool):
//!
//! 1. [identifier assignment](assign_ids);
//! 2. [preprocessing](Indices::build), building the initial rank vector, the
//!    outdegrees, the dangling pages and the in-edges of every page;
//! 3. the [power iteration](pagerank), alternating a dangling-sum phase and a
//!    rank-update phase until convergence.

mod assign;
pub use assign::assign_ids;

mod preprocess;
pub use preprocess::Indices;

pub mod pagerank;
pub use pagerank::MultiThreadedPageRank;

use crate::graphs::PageId;

/// A page identifier together with its rank.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PageIdAndRank {
    pub id: PageId,
    pub rank: f64,
}

impl PageIdAndRank {
    pub fn new(id: PageId, rank: f64) -> Self {
        Self { id, rank }
    }
}
