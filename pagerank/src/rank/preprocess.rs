/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::PageRankError;
use crate::graphs::PageId;
use crate::traits::Network;
use crate::utils::PhasePool;
use dsi_progress_logger::ConcurrentProgressLog;
use std::collections::HashMap;
use std::sync::Mutex;

/// The supporting indices of a PageRank computation.
///
/// The indices are built once per computation by [`build`](Self::build) and
/// are read-only afterwards:
///
/// - the initial rank vector, mapping each page to 1/*n*;
/// - the outdegree of each page, counting duplicate links and self-loops;
/// - the list of dangling pages, that is, pages without outbound links;
/// - the in-edges of each page, that is, the list of the pages linking to it,
///   with one entry per link occurrence.
#[derive(Debug, Clone)]
pub struct Indices {
    rank: HashMap<PageId, f64>,
    outdegrees: HashMap<PageId, usize>,
    dangling: Vec<PageId>,
    in_edges: HashMap<PageId, Vec<PageId>>,
}

impl Indices {
    /// Builds the indices of `network` in parallel.
    ///
    /// `ids` must contain the identifiers of the pages of the network, in page
    /// order, as returned by [`assign_ids`](super::assign_ids).
    ///
    /// Each worker of `pool` processes the pages of its part and inserts the
    /// results into the four indices, each of which is protected by its own
    /// lock. A lock is held only for the duration of a single insertion, and
    /// never together with another one.
    ///
    /// After all workers are done, this method checks that the identifiers are
    /// distinct (otherwise the rank vector would have fewer entries than pages)
    /// and that every link points to a page of the network.
    pub fn build<N: Network + ?Sized>(
        network: &N,
        ids: &[PageId],
        pool: &PhasePool,
        cpl: &mut impl ConcurrentProgressLog,
    ) -> Result<Self, PageRankError> {
        let pages = network.pages();
        let n = pages.len();
        if ids.len() != n {
            return Err(PageRankError::InternalInconsistency {
                expected: n,
                found: ids.len(),
            });
        }
        let inv_n = 1.0 / n as f64;

        let rank = Mutex::new(HashMap::with_capacity(n));
        let outdegrees = Mutex::new(HashMap::with_capacity(n));
        let dangling = Mutex::new(Vec::new());
        let in_edges = Mutex::new(HashMap::<PageId, Vec<PageId>>::with_capacity(n));

        cpl.item_name("page");
        cpl.expected_updates(Some(n));
        cpl.start("Building indices...");

        pool.run_phase(n, |_, range| {
            let mut local_cpl = cpl.clone();
            for i in range.clone() {
                let id = &ids[i];
                let links = pages[i].links();

                rank.lock().unwrap().insert(id.clone(), inv_n);
                outdegrees.lock().unwrap().insert(id.clone(), links.len());
                if links.is_empty() {
                    dangling.lock().unwrap().push(id.clone());
                }
                for target in links {
                    in_edges
                        .lock()
                        .unwrap()
                        .entry(target.clone())
                        .or_default()
                        .push(id.clone());
                }
            }
            local_cpl.update_with_count(range.len());
        });

        cpl.done();

        let indices = Self {
            rank: rank.into_inner().unwrap(),
            outdegrees: outdegrees.into_inner().unwrap(),
            dangling: dangling.into_inner().unwrap(),
            in_edges: in_edges.into_inner().unwrap(),
        };

        if indices.rank.len() != n {
            return Err(PageRankError::InternalInconsistency {
                expected: n,
                found: indices.rank.len(),
            });
        }

        // Links towards identifiers that are not pages would leak rank
        let unknown = pool.run_phase(n, |_, range| {
            range.into_iter().find_map(|page| {
                pages[page]
                    .links()
                    .iter()
                    .find(|target| !indices.rank.contains_key(*target))
                    .map(|target| (page, target.clone()))
            })
        });
        if let Some((page, target)) = unknown.into_iter().flatten().next() {
            return Err(PageRankError::UnknownLinkTarget { page, target });
        }

        log::info!(
            "{} pages, {} links, {} dangling pages",
            n,
            indices.num_links(),
            indices.dangling.len()
        );

        Ok(indices)
    }

    /// Returns the initial rank vector.
    pub fn rank(&self) -> &HashMap<PageId, f64> {
        &self.rank
    }

    /// Returns the outdegree of the page with identifier `id`, if any.
    pub fn outdegree(&self, id: &PageId) -> Option<usize> {
        self.outdegrees.get(id).copied()
    }

    /// Returns the identifiers of the dangling pages, in no particular order.
    pub fn dangling(&self) -> &[PageId] {
        &self.dangling
    }

    /// Returns the identifiers of the pages linking to the page with
    /// identifier `id`, in no particular order.
    ///
    /// A page linking `k` times to `id` appears `k` times.
    pub fn in_edges(&self, id: &PageId) -> &[PageId] {
        self.in_edges.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the number of pages.
    pub fn num_pages(&self) -> usize {
        self.rank.len()
    }

    /// Returns the number of links, counting duplicates.
    pub fn num_links(&self) -> usize {
        self.in_edges.values().map(Vec::len).sum()
    }
}
