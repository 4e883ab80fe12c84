/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Traits describing the capabilities consumed by the engine.
//!
//! A [`Network`] is a read-only view over a sequence of [pages](crate::graphs::Page),
//! bundled with the [`IdGenerator`] that derives page identifiers from page
//! content. A [`PageRankComputer`] turns a network into a rank assignment.

mod generator;
pub use generator::*;

mod network;
pub use network::*;

mod computer;
pub use computer::*;
