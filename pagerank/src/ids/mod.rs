/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Identifier generators.

mod sha256;
pub use sha256::Sha256IdGenerator;
