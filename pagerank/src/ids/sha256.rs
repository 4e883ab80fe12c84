/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::PageId;
use crate::traits::IdGenerator;
use sha2::{Digest, Sha256};

/// Derives identifiers as the lowercase hexadecimal SHA-256 digest of the
/// page content.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256IdGenerator;

impl Sha256IdGenerator {
    /// Returns the hexadecimal SHA-256 digest of `content`.
    pub fn digest(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl IdGenerator for Sha256IdGenerator {
    fn generate_id(&self, content: &str) -> anyhow::Result<PageId> {
        Ok(PageId::from(Self::digest(content)))
    }
}
