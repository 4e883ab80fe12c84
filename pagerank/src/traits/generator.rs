/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::PageId;

/// A capability deriving page identifiers from page content.
///
/// Implementations must be deterministic (the same content must always yield
/// the same identifier) and are called concurrently from several threads.
/// Failures are not retried: an error aborts the whole computation.
///
/// Closures with the right signature are generators, too:
///
/// ```
/// use webrank::graphs::PageId;
/// use webrank::traits::IdGenerator;
///
/// let upper = |content: &str| anyhow::Ok(PageId::new(content.to_uppercase()));
/// assert_eq!(upper.generate_id("a").unwrap(), PageId::from("A"));
/// ```
pub trait IdGenerator: Sync {
    /// Returns the identifier of a page with the given content.
    fn generate_id(&self, content: &str) -> anyhow::Result<PageId>;
}

impl<F: Fn(&str) -> anyhow::Result<PageId> + Sync> IdGenerator for F {
    fn generate_id(&self, content: &str) -> anyhow::Result<PageId> {
        self(content)
    }
}
