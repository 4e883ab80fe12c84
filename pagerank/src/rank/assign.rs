/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::PageRankError;
use crate::graphs::PageId;
use crate::traits::{IdGenerator, Network};
use crate::utils::PhasePool;
use dsi_progress_logger::ConcurrentProgressLog;

/// Assigns an identifier to every page of `network`, in parallel.
///
/// Each worker of `pool` calls the generator of the network on the content of
/// the pages of its part. The returned identifiers are in page order. If the
/// generator fails, the computation is aborted with
/// [`PageRankError::Generation`]; if it fails on pages of different parts,
/// the failure of the first part is reported.
pub fn assign_ids<N: Network + ?Sized>(
    network: &N,
    pool: &PhasePool,
    cpl: &mut impl ConcurrentProgressLog,
) -> Result<Box<[PageId]>, PageRankError> {
    let pages = network.pages();
    let generator = network.generator();

    cpl.item_name("page");
    cpl.expected_updates(Some(pages.len()));
    cpl.start("Assigning identifiers...");

    let parts = pool.run_phase(
        pages.len(),
        |_, range| -> Result<Vec<PageId>, PageRankError> {
            let mut local_cpl = cpl.clone();
            let mut ids = Vec::with_capacity(range.len());
            for page in range.clone() {
                let id = generator
                    .generate_id(pages[page].content())
                    .map_err(|source| PageRankError::Generation { page, source })?;
                ids.push(id);
            }
            local_cpl.update_with_count(range.len());
            Ok(ids)
        },
    );

    cpl.done();

    let mut ids = Vec::with_capacity(pages.len());
    for part in parts {
        ids.extend(part?);
    }
    Ok(ids.into_boxed_slice())
}
