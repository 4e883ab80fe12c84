/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Errors of a PageRank computation.
//!
//! No error is recovered inside the engine: every failure aborts the
//! computation and is returned to the caller as a [`PageRankError`]. The
//! variants fall into four classes:
//!
//! - _configuration errors_ (see [`PageRankError::is_configuration`]), which
//!   are detected before any parallel phase is started;
//! - [generation failures](PageRankError::Generation), raised when the
//!   identifier generator of the network fails on some page;
//! - [non-convergence](PageRankError::NonConvergence), raised when the
//!   iteration budget is exhausted;
//! - [internal inconsistencies](PageRankError::InternalInconsistency), which
//!   signal a defect (or pages with colliding identifiers).

use crate::graphs::PageId;

#[derive(thiserror::Error, Debug)]
pub enum PageRankError {
    #[error("The damping factor must be in (0 . . 1), got {0}")]
    InvalidAlpha(f64),

    #[error("The tolerance must be positive, got {0}")]
    InvalidTolerance(f64),

    #[error("The number of threads must be greater than 0")]
    ZeroThreads,

    #[error("The network has no pages")]
    EmptyNetwork,

    /// A link points to an identifier that no page of the network has.
    #[error("Page {page} links to {target}, which is not a page of the network")]
    UnknownLinkTarget { page: usize, target: PageId },

    #[error("Could not build the thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Could not generate the identifier of page {page}")]
    Generation {
        page: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("Not able to find result in {iterations} iteration(s) (last difference: {difference})")]
    NonConvergence { iterations: usize, difference: f64 },

    #[error("Invalid result size {found} for a network of {expected} pages")]
    InternalInconsistency { expected: usize, found: usize },
}

impl PageRankError {
    /// Returns true if the error is due to an invalid configuration (parameters
    /// or network) rather than to the computation itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidAlpha(_)
                | Self::InvalidTolerance(_)
                | Self::ZeroThreads
                | Self::EmptyNetwork
                | Self::UnknownLinkTarget { .. }
                | Self::ThreadPool(_)
        )
    }
}
