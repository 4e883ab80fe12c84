/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

mod common;

use anyhow::{Result, bail};
use common::*;
use dsi_progress_logger::prelude::*;
use webrank::prelude::*;

const ALPHA: f64 = 0.85;

#[test]
fn test_cycle() -> Result<()> {
    let network = network_from_arcs(3, &[(0, 1), (1, 2), (2, 0)]);
    let pr = MultiThreadedPageRank::new(2)?;
    let ranks = ranks_by_page(&network, &pr.compute_for_network(&network, ALPHA, 100, 1E-6)?);
    for (page, &rank) in ranks.iter().enumerate() {
        assert!(
            (rank - 1.0 / 3.0).abs() < 1E-6,
            "Page {page} has rank {rank}, expected 1/3"
        );
    }
    Ok(())
}

#[test]
fn test_single_page_with_self_loop() -> Result<()> {
    let network = network_from_arcs(1, &[(0, 0)]);
    let pr = MultiThreadedPageRank::new(4)?;
    let ranks = pr.compute_for_network(&network, ALPHA, 1, 1E-6)?;
    assert_eq!(ranks.len(), 1);
    assert!((ranks[0].rank - 1.0).abs() < 1E-12, "{}", ranks[0].rank);
    Ok(())
}

#[test]
fn test_two_pages_one_dangling() -> Result<()> {
    // A → B, B dangling: the fixed point is 1/(2 + α), (1 + α)/(2 + α)
    let network = network_from_arcs(2, &[(0, 1)]);
    for alpha in [0.5, ALPHA, 0.99] {
        let pr = MultiThreadedPageRank::new(2)?;
        let ranks = ranks_by_page(
            &network,
            &pr.compute_for_network(&network, alpha, 10_000, 1E-13)?,
        );
        let expected = [1.0 / (2.0 + alpha), (1.0 + alpha) / (2.0 + alpha)];
        assert!(
            l_inf_distance(&ranks, &expected) < 1E-9,
            "alpha = {alpha}: got {ranks:?}, expected {expected:?}"
        );
    }
    Ok(())
}

#[test]
fn test_all_dangling() -> Result<()> {
    // With no links at all the uniform vector is reached in one step
    let network = network_from_arcs(7, &[]);
    let pr = MultiThreadedPageRank::new(3)?;
    let ranks = ranks_by_page(&network, &pr.compute_for_network(&network, ALPHA, 1, 1E-9)?);
    for rank in ranks {
        assert!((rank - 1.0 / 7.0).abs() < 1E-12, "{rank}");
    }
    Ok(())
}

#[test]
fn test_disjoint_cliques() -> Result<()> {
    // Every page has the same indegree and outdegree structure
    let mut arcs = vec![];
    for base in [0, 4] {
        for u in 0..4 {
            for v in 0..4 {
                if u != v {
                    arcs.push((base + u, base + v));
                }
            }
        }
    }
    let network = network_from_arcs(8, &arcs);
    let pr = MultiThreadedPageRank::new(3)?;
    let ranks = ranks_by_page(&network, &pr.compute_for_network(&network, ALPHA, 100, 1E-9)?);
    assert!(l_inf_distance(&ranks, &[1.0 / 8.0; 8]) < 1E-9, "{ranks:?}");
    Ok(())
}

#[test]
fn test_sum_to_one() -> Result<()> {
    for (n, p, seed) in [(10, 0.2, 0), (50, 0.05, 1), (200, 0.01, 2), (500, 0.003, 3)] {
        let arcs = random_arcs(n, p, seed);
        let network = network_from_arcs(n, &arcs);
        let pr = MultiThreadedPageRank::new(4)?;
        let ranks = pr.compute_for_network(&network, ALPHA, 1000, 1E-10)?;
        assert_eq!(ranks.len(), n);
        let sum = ranks.iter().map(|r| r.rank).sum::<f64>();
        assert!((sum - 1.0).abs() < 1E-9, "n = {n}: sum = {sum}");
        assert!(ranks.iter().all(|r| r.rank > 0.0));
    }
    Ok(())
}

#[test]
fn test_against_power_method() -> Result<()> {
    for (n, p, seed) in [(20, 0.1, 10), (100, 0.02, 11), (300, 0.005, 12)] {
        let arcs = random_arcs(n, p, seed);
        let network = network_from_arcs(n, &arcs);
        let expected = power_method(n, &arcs, ALPHA);
        let pr = MultiThreadedPageRank::new(3)?;
        let ranks = ranks_by_page(
            &network,
            &pr.compute_for_network(&network, ALPHA, 1000, 1E-12)?,
        );
        let distance = l_inf_distance(&ranks, &expected);
        assert!(distance < 1E-9, "n = {n}: distance from reference {distance}");
    }
    Ok(())
}

#[test]
fn test_duplicate_links_and_self_loops() -> Result<()> {
    // Each occurrence of a link carries its own share of rank
    let arcs = [(0, 1), (0, 1), (0, 2), (1, 1), (1, 0), (2, 0), (2, 3)];
    let network = network_from_arcs(4, &arcs);
    let expected = power_method(4, &arcs, ALPHA);
    let pr = MultiThreadedPageRank::new(2)?;
    let ranks = ranks_by_page(
        &network,
        &pr.compute_for_network(&network, ALPHA, 1000, 1E-12)?,
    );
    assert!(
        l_inf_distance(&ranks, &expected) < 1E-9,
        "got {ranks:?}, expected {expected:?}"
    );
    // Page 1 receives two thirds of the share of page 0
    assert!(ranks[1] > ranks[2]);
    Ok(())
}

#[test]
fn test_thread_count_independence() -> Result<()> {
    let n = 257;
    let arcs = random_arcs(n, 0.01, 42);
    let network = network_from_arcs(n, &arcs);
    let reference = ranks_by_page(
        &network,
        &MultiThreadedPageRank::new(1)?.compute_for_network(&network, ALPHA, 1000, 1E-12)?,
    );
    for num_threads in [2, 3, 4, 7, 16, 300] {
        let ranks = ranks_by_page(
            &network,
            &MultiThreadedPageRank::new(num_threads)?.compute_for_network(
                &network, ALPHA, 1000, 1E-12,
            )?,
        );
        let distance = l_inf_distance(&ranks, &reference);
        assert!(
            distance < 1E-10,
            "{num_threads} threads: distance from single-threaded result {distance}"
        );
    }
    Ok(())
}

#[test]
fn test_more_threads_than_pages() -> Result<()> {
    let network = network_from_arcs(2, &[(0, 1)]);
    let pr = MultiThreadedPageRank::new(8)?;
    let ranks = pr.compute_for_network(&network, ALPHA, 1000, 1E-9)?;
    assert_eq!(ranks.len(), 2);
    Ok(())
}

#[test]
fn test_idempotence() -> Result<()> {
    let n = 100;
    let network = network_from_arcs(n, &random_arcs(n, 0.03, 7));
    let pr = MultiThreadedPageRank::new(4)?;
    let first = ranks_by_page(&network, &pr.compute_for_network(&network, ALPHA, 1000, 1E-10)?);
    let second = ranks_by_page(&network, &pr.compute_for_network(&network, ALPHA, 1000, 1E-10)?);
    assert!(l_inf_distance(&first, &second) < 1E-12);
    Ok(())
}

#[test]
fn test_result_order() -> Result<()> {
    let network = network_from_arcs(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
    let pr = MultiThreadedPageRank::new(2)?;
    let ranks = pr.compute_for_network(&network, ALPHA, 100, 1E-6)?;
    for (page, PageIdAndRank { id, .. }) in network.pages().iter().zip(&ranks) {
        assert_eq!(id, &Sha256IdGenerator.generate_id(page.content())?);
    }
    Ok(())
}

#[test]
fn test_with_logging() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let network = network_from_arcs(30, &random_arcs(30, 0.1, 5));
    let pr = MultiThreadedPageRank::new(3)?;
    let ranks = pr.compute_for_network_with_logging(
        &network,
        ALPHA,
        1000,
        1E-9,
        &mut progress_logger![],
        &mut concurrent_progress_logger![],
    )?;
    assert_eq!(ranks.len(), 30);
    Ok(())
}

#[test]
fn test_name() -> Result<()> {
    assert_eq!(
        MultiThreadedPageRank::new(3)?.name(),
        "MultiThreadedPageRank[3]"
    );
    assert_eq!(MultiThreadedPageRank::new(1)?.num_threads(), 1);
    Ok(())
}

#[test]
fn test_zero_iterations() -> Result<()> {
    let network = network_from_arcs(3, &[(0, 1), (1, 2), (2, 0)]);
    let pr = MultiThreadedPageRank::new(2)?;
    match pr.compute_for_network(&network, ALPHA, 0, 1E-6) {
        Err(PageRankError::NonConvergence {
            iterations,
            difference,
        }) => {
            assert_eq!(iterations, 0);
            assert!(difference.is_infinite());
        }
        other => bail!("Unexpected result {other:?}"),
    }
    Ok(())
}

#[test]
fn test_non_convergence() -> Result<()> {
    let network = network_from_arcs(2, &[(0, 1)]);
    let pr = MultiThreadedPageRank::new(2)?;
    let err = pr
        .compute_for_network(&network, ALPHA, 2, 1E-12)
        .unwrap_err();
    assert!(!err.is_configuration());
    match err {
        PageRankError::NonConvergence {
            iterations,
            difference,
        } => {
            assert_eq!(iterations, 2);
            assert!(difference >= 1E-12 && difference.is_finite());
        }
        other => bail!("Unexpected error {other}"),
    }
    Ok(())
}

#[test]
fn test_difference_trend() -> Result<()> {
    // A ring guarantees that no page is dangling
    let n = 60;
    let mut arcs = random_arcs(n, 0.05, 3);
    arcs.extend((0..n).map(|u| (u, (u + 1) % n)));
    let network = network_from_arcs(n, &arcs);
    let pr = MultiThreadedPageRank::new(3)?;

    let mut differences = vec![];
    for budget in 1..=40 {
        match pr.compute_for_network(&network, ALPHA, budget, 1E-300) {
            Err(PageRankError::NonConvergence {
                iterations,
                difference,
            }) => {
                assert_eq!(iterations, budget);
                differences.push(difference);
            }
            other => bail!("Unexpected result with {budget} iterations: {other:?}"),
        }
    }

    for (iteration, &difference) in differences.iter().enumerate() {
        assert!(
            difference.is_finite() && difference >= 0.0,
            "Iteration {}: difference {difference}",
            iteration + 1
        );
    }
    let (first, last) = (differences[0], differences[differences.len() - 1]);
    assert!(
        last < first * 1E-2,
        "The difference did not decrease: {differences:?}"
    );
    Ok(())
}

#[test]
fn test_invalid_alpha() -> Result<()> {
    let network = network_from_arcs(2, &[(0, 1), (1, 0)]);
    let pr = MultiThreadedPageRank::new(2)?;
    for alpha in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
        let err = pr
            .compute_for_network(&network, alpha, 100, 1E-6)
            .unwrap_err();
        assert!(
            matches!(err, PageRankError::InvalidAlpha(_)),
            "alpha = {alpha}: {err}"
        );
        assert!(err.is_configuration());
    }
    Ok(())
}

#[test]
fn test_invalid_tolerance() -> Result<()> {
    let network = network_from_arcs(2, &[(0, 1), (1, 0)]);
    let pr = MultiThreadedPageRank::new(2)?;
    for tolerance in [0.0, -1E-6, f64::NAN] {
        let err = pr
            .compute_for_network(&network, ALPHA, 100, tolerance)
            .unwrap_err();
        assert!(
            matches!(err, PageRankError::InvalidTolerance(_)),
            "tolerance = {tolerance}: {err}"
        );
        assert!(err.is_configuration());
    }
    Ok(())
}

#[test]
fn test_zero_threads() {
    let err = MultiThreadedPageRank::new(0).unwrap_err();
    assert!(matches!(err, PageRankError::ZeroThreads));
    assert!(err.is_configuration());
}

#[test]
fn test_empty_network() -> Result<()> {
    let network: VecNetwork = VecNetwork::default();
    let err = MultiThreadedPageRank::new(2)?
        .compute_for_network(&network, ALPHA, 100, 1E-6)
        .unwrap_err();
    assert!(matches!(err, PageRankError::EmptyNetwork));
    assert!(err.is_configuration());
    Ok(())
}

#[test]
fn test_generation_failure() -> Result<()> {
    let generator = |content: &str| -> anyhow::Result<PageId> {
        if content.starts_with("bad") {
            bail!("Cannot hash {content}");
        }
        Ok(PageId::new(content))
    };
    let pages = (0..20).map(|i| {
        let content = if i == 13 || i == 17 {
            format!("bad{i}")
        } else {
            i.to_string()
        };
        Page::new(content, [PageId::new(((i + 1) % 20).to_string())])
    });
    let network = VecNetwork::with_pages(generator, pages);

    for num_threads in [1, 2, 4] {
        let err = MultiThreadedPageRank::new(num_threads)?
            .compute_for_network(&network, ALPHA, 100, 1E-6)
            .unwrap_err();
        match &err {
            PageRankError::Generation { page, .. } => {
                assert!(*page == 13 || *page == 17, "page {page}");
                if num_threads == 1 {
                    assert_eq!(*page, 13);
                }
            }
            other => bail!("Unexpected error {other}"),
        }
        assert!(!err.is_configuration());
        assert!(std::error::Error::source(&err).is_some());
    }
    Ok(())
}

#[test]
fn test_unknown_link_target() -> Result<()> {
    let mut network: VecNetwork = VecNetwork::default();
    network.add_page("a", ["b"])?;
    network.add_page("b", ["nowhere"])?;
    let err = MultiThreadedPageRank::new(2)?
        .compute_for_network(&network, ALPHA, 100, 1E-6)
        .unwrap_err();
    match &err {
        PageRankError::UnknownLinkTarget { page, target } => {
            assert_eq!(*page, 1);
            assert_eq!(target.as_str(), Sha256IdGenerator::digest("nowhere"));
        }
        other => bail!("Unexpected error {other}"),
    }
    assert!(err.is_configuration());
    Ok(())
}

#[test]
fn test_duplicate_content() -> Result<()> {
    let mut network: VecNetwork = VecNetwork::default();
    network.add_page("a", ["b"])?;
    network.add_page("b", ["a"])?;
    network.add_page("a", ["b"])?;
    let err = MultiThreadedPageRank::new(2)?
        .compute_for_network(&network, ALPHA, 100, 1E-6)
        .unwrap_err();
    match err {
        PageRankError::InternalInconsistency { expected, found } => {
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => bail!("Unexpected error {other}"),
    }
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_serialize_ranks() -> Result<()> {
    let network = network_from_arcs(1, &[(0, 0)]);
    let ranks = MultiThreadedPageRank::new(1)?.compute_for_network(&network, ALPHA, 10, 1E-6)?;
    let json = serde_json::to_value(&ranks)?;
    assert_eq!(json[0]["id"], Sha256IdGenerator::digest("0"));
    assert!(json[0]["rank"].as_f64().is_some());
    Ok(())
}

#[cfg_attr(feature = "slow_tests", test)]
#[cfg_attr(not(feature = "slow_tests"), allow(dead_code))]
fn test_large_network() -> Result<()> {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    let n = 50_000;
    let mut rng = SmallRng::seed_from_u64(0);
    let arcs = (0..n)
        .flat_map(|u| {
            let outdegree = rng.random_range(0..8);
            (0..outdegree)
                .map(|_| (u, rng.random_range(0..n)))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let network = network_from_arcs(n, &arcs);
    let expected = power_method(n, &arcs, ALPHA);
    for num_threads in [1, 8] {
        let ranks = ranks_by_page(
            &network,
            &MultiThreadedPageRank::new(num_threads)?.compute_for_network(
                &network, ALPHA, 1000, 1E-12,
            )?,
        );
        assert!((ranks.iter().sum::<f64>() - 1.0).abs() < 1E-9);
        assert!(l_inf_distance(&ranks, &expected) < 1E-10);
    }
    Ok(())
}
