/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![allow(dead_code)]

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use webrank::graphs::vec_network::VecNetwork;
use webrank::ids::Sha256IdGenerator;
use webrank::rank::PageIdAndRank;
use webrank::traits::{IdGenerator, Network};

/// Builds a network with pages `"0"`, `"1"`, … `n − 1` and the given arcs.
///
/// Arcs are kept with multiplicity, in the given order.
pub fn network_from_arcs(n: usize, arcs: &[(usize, usize)]) -> VecNetwork {
    let mut succ = vec![Vec::new(); n];
    for &(u, v) in arcs {
        succ[u].push(v.to_string());
    }
    let mut network: VecNetwork = VecNetwork::default();
    for (u, links) in succ.into_iter().enumerate() {
        network.add_page(u.to_string(), links).unwrap();
    }
    network
}

/// Returns the ranks of a computation in page order.
pub fn ranks_by_page(network: &VecNetwork, ranks: &[PageIdAndRank]) -> Vec<f64> {
    let by_id: HashMap<_, _> = ranks.iter().map(|r| (r.id.clone(), r.rank)).collect();
    assert_eq!(by_id.len(), ranks.len(), "Duplicate identifiers in result");
    network
        .pages()
        .iter()
        .map(|page| by_id[&Sha256IdGenerator.generate_id(page.content()).unwrap()])
        .collect()
}

/// Generates a random list of arcs on `n` nodes, each present with
/// probability `p`; self-loops are included.
pub fn random_arcs(n: usize, p: f64, seed: u64) -> Vec<(usize, usize)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut arcs = Vec::new();
    for u in 0..n {
        for v in 0..n {
            if rng.random_bool(p) {
                arcs.push((u, v));
            }
        }
    }
    arcs
}

/// Computes PageRank using a sequential power method with uniform
/// redistribution of the rank of dangling nodes.
///
/// Iterates until the ℓ₁ norm of the difference between two successive
/// approximations is below 1E-15, or for at most 10000 iterations.
pub fn power_method(n: usize, arcs: &[(usize, usize)], alpha: f64) -> Vec<f64> {
    let mut outdegree = vec![0usize; n];
    for &(u, _) in arcs {
        outdegree[u] += 1;
    }
    let inv_n = 1.0 / n as f64;
    let mut x = vec![inv_n; n];
    for _ in 0..10_000 {
        let dangling: f64 = (0..n).filter(|&u| outdegree[u] == 0).map(|u| x[u]).sum();
        let mut y = vec![(1.0 - alpha) * inv_n + alpha * dangling * inv_n; n];
        for &(u, v) in arcs {
            y[v] += alpha * x[u] / outdegree[u] as f64;
        }
        let delta: f64 = x.iter().zip(&y).map(|(a, b)| (a - b).abs()).sum();
        x = y;
        if delta < 1E-15 {
            break;
        }
    }
    x
}

/// Returns the 𝓁-∞ distance (maximum absolute difference) between two vectors.
pub fn l_inf_distance(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
