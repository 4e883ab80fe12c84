/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]
#![allow(clippy::type_complexity)]

pub mod error;
pub mod graphs;
pub mod ids;
pub mod rank;
pub mod traits;
pub mod utils;

pub mod prelude {
    pub use crate::error::PageRankError;
    pub use crate::graphs::prelude::*;
    pub use crate::ids::*;
    pub use crate::rank::*;
    pub use crate::traits::*;
    pub use crate::utils::*;
}
