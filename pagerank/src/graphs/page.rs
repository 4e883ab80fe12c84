/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::fmt::Display;
use std::sync::Arc;

/// An opaque, content-derived page identifier.
///
/// Identifiers are produced by an [`IdGenerator`](crate::traits::IdGenerator)
/// and never mutated. Equality and hashing depend only on the byte content of
/// the identifier; cloning is cheap, as the text is shared.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(Arc<str>);

impl PageId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A page: its content and the ordered sequence of identifiers of the pages
/// it links to.
///
/// Links are kept as given: a page linking twice to the same target, or to
/// itself, contributes one arc per occurrence.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    content: String,
    links: Vec<PageId>,
}

impl Page {
    /// Creates a new page with the given content and outbound links.
    pub fn new(content: impl Into<String>, links: impl IntoIterator<Item = PageId>) -> Self {
        Self {
            content: content.into(),
            links: links.into_iter().collect(),
        }
    }

    /// Creates a new page without outbound links.
    pub fn dangling(content: impl Into<String>) -> Self {
        Self::new(content, [])
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn links(&self) -> &[PageId] {
        &self.links
    }

    /// Returns the number of outbound links, counting duplicates.
    pub fn outdegree(&self) -> usize {
        self.links.len()
    }
}
