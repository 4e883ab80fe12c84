/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::network::read_network;
use crate::{ArcsArgs, GlobalArgs, NumThreadsArg, RankFormat, RankedPage, open_input};
use anyhow::{Context, Result};
use clap::Parser;
use dsi_progress_logger::prelude::*;
use itertools::Itertools;
use std::path::PathBuf;
use webrank::prelude::*;
use webrank::rank::pagerank::preds::{L1Norm, MaxIter};

#[derive(Parser, Debug)]
#[command(
    name = "pagerank",
    about = "Compute the PageRank of a network read from a list of arcs. Pages are the distinct labels appearing in the arcs, and their identifiers are the SHA-256 digests of the labels. Ranks are stored by decreasing value.",
    long_about = None
)]
pub struct CliArgs {
    /// The file containing the arcs, or "-" for standard input.
    pub arcs: PathBuf,

    #[arg(short, long)]
    /// Where to store the ranks ("-" for standard output).
    pub output: PathBuf,

    #[arg(short, long, default_value_t = 0.85)]
    /// The damping factor α (must be in the interval (0 . . 1)).
    pub alpha: f64,

    #[arg(long, default_value_t = MaxIter::DEFAULT_MAX_ITER)]
    /// Maximum number of iterations.
    pub max_iter: usize,

    #[arg(short, long, default_value_t = L1Norm::DEFAULT_TOLERANCE)]
    /// The ℓ₁ error threshold to stop.
    pub tolerance: f64,

    #[arg(long, value_enum, default_value_t = RankFormat::Ascii)]
    /// The output format for the ranks.
    pub fmt: RankFormat,

    #[arg(long)]
    /// Decimal digits for the ranks.
    pub precision: Option<usize>,

    #[arg(long, default_value_t = false)]
    /// Store also the label of each page.
    pub labels: bool,

    #[clap(flatten)]
    pub arcs_args: ArcsArgs,

    #[clap(flatten)]
    pub num_threads: NumThreadsArg,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let mut pl = progress_logger![display_memory = true];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }

    let mut cpl = concurrent_progress_logger![display_memory = true];
    if let Some(log_interval) = global_args.log_interval {
        cpl.log_interval(log_interval);
    }

    log::info!("Loading the network from {}", args.arcs.display());
    let network = read_network(open_input(&args.arcs)?, &args.arcs_args, &mut pl)
        .with_context(|| format!("Could not read the network from {}", args.arcs.display()))?;

    let pr = MultiThreadedPageRank::new(args.num_threads.num_threads)?;
    let ranks = pr.compute_for_network_with_logging(
        &network,
        args.alpha,
        args.max_iter,
        args.tolerance,
        &mut pl,
        &mut cpl,
    )?;

    let pages = ranks
        .iter()
        .zip(network.pages())
        .map(|(PageIdAndRank { id, rank }, page)| RankedPage {
            id,
            label: args.labels.then(|| page.content()),
            rank: *rank,
        })
        .sorted_by(|a, b| b.rank.total_cmp(&a.rank).then_with(|| a.id.cmp(b.id)))
        .collect::<Vec<_>>();

    args.fmt.store(&args.output, &pages, args.precision)?;

    Ok(())
}
