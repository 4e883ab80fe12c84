/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Page, PageId};
use crate::ids::Sha256IdGenerator;
use crate::traits::{IdGenerator, Network};

/// A [`Network`] implementation based on a vector of pages.
///
/// Pages are added in index order; links are given as page contents and
/// resolved to identifiers using the generator of the network, so that they
/// always agree with the identifiers the engine will assign.
///
/// ```
/// use webrank::graphs::vec_network::VecNetwork;
/// use webrank::traits::Network;
///
/// let mut network: VecNetwork = VecNetwork::default();
/// network.add_page("a", ["b"])?;
/// network.add_page("b", ["a", "a"])?;
/// assert_eq!(network.size(), 2);
/// assert_eq!(network.pages()[1].outdegree(), 2);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct VecNetwork<G: IdGenerator = Sha256IdGenerator> {
    pages: Vec<Page>,
    generator: G,
}

impl<G: IdGenerator + Default> core::default::Default for VecNetwork<G> {
    fn default() -> Self {
        Self::new(G::default())
    }
}

impl<G: IdGenerator> VecNetwork<G> {
    /// Creates a new empty network using the given generator.
    pub fn new(generator: G) -> Self {
        Self {
            pages: vec![],
            generator,
        }
    }

    /// Creates a new network from already built pages.
    pub fn with_pages(generator: G, pages: impl IntoIterator<Item = Page>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
            generator,
        }
    }

    /// Appends a page whose links are given as the contents of the target
    /// pages, and returns its index.
    ///
    /// The targets need not have been added yet.
    pub fn add_page<S: AsRef<str>>(
        &mut self,
        content: impl Into<String>,
        links: impl IntoIterator<Item = S>,
    ) -> anyhow::Result<usize> {
        let links = links
            .into_iter()
            .map(|target| self.generator.generate_id(target.as_ref()))
            .collect::<anyhow::Result<Vec<PageId>>>()?;
        Ok(self.push(Page::new(content, links)))
    }

    /// Appends a page and returns its index.
    pub fn push(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Returns the number of links of the network, counting duplicates.
    pub fn num_links(&self) -> usize {
        self.pages.iter().map(Page::outdegree).sum()
    }
}

impl<G: IdGenerator> Network for VecNetwork<G> {
    type Generator = G;

    fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn generator(&self) -> &G {
        &self.generator
    }
}
