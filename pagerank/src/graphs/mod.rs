/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Pages, page identifiers and in-memory networks.

mod page;
pub use page::*;

pub mod vec_network;

pub mod prelude {
    pub use super::page::*;
    pub use super::vec_network::VecNetwork;
}
