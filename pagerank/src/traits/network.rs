/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::IdGenerator;
use crate::graphs::Page;

/// A read-only view over a network of pages.
///
/// Pages are accessed by index in `[0 . . size)`; the outbound links of a
/// page are identifiers of other pages, so an implementation must also
/// provide the [`IdGenerator`] deriving those identifiers from page content.
///
/// The view must not change during a computation: the engine reads it
/// concurrently from all worker threads.
pub trait Network: Sync {
    /// The identifier generator of the network.
    type Generator: IdGenerator + ?Sized;

    /// Returns the number of pages.
    fn size(&self) -> usize {
        self.pages().len()
    }

    /// Returns the pages, in index order.
    fn pages(&self) -> &[Page];

    /// Returns the generator deriving identifiers from page content.
    fn generator(&self) -> &Self::Generator;
}

impl<N: Network + ?Sized> Network for &N {
    type Generator = N::Generator;

    fn size(&self) -> usize {
        (**self).size()
    }

    fn pages(&self) -> &[Page] {
        (**self).pages()
    }

    fn generator(&self) -> &Self::Generator {
        (**self).generator()
    }
}
