/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Reading networks from lists of arcs.

use crate::ArcsArgs;
use anyhow::{Context, Result, ensure};
use dsi_progress_logger::prelude::*;
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::BufRead;
use webrank::prelude::*;

/// Reads a network from a list of arcs, one per line.
///
/// Each line contains a source label and a target label in the columns
/// specified by `arcs_args`; a line without the target column declares a
/// page with no links. Pages are the distinct labels, in order of first
/// appearance, and the content of a page is its label. Duplicate arcs are
/// kept, so they count as multiple links.
pub fn read_network(
    reader: impl BufRead,
    arcs_args: &ArcsArgs,
    pl: &mut impl ProgressLog,
) -> Result<VecNetwork> {
    let mut labels: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut succ: Vec<Vec<usize>> = Vec::new();

    let mut page_of = |label: &str, succ: &mut Vec<Vec<usize>>| -> usize {
        if let Some(&page) = index.get(label) {
            return page;
        }
        let page = labels.len();
        labels.push(label.to_owned());
        index.insert(label.to_owned(), page);
        succ.push(Vec::new());
        page
    };

    pl.item_name("line");
    pl.start("Reading arcs...");

    let mut num_arcs = 0;
    let lines = reader
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            line.as_ref().map_or(true, |l| {
                !l.trim().is_empty() && !l.trim().starts_with(arcs_args.line_comment_symbol)
            })
        })
        .skip(arcs_args.lines_to_skip);

    for (line_num, line) in lines {
        if let Some(max_arcs) = arcs_args.max_arcs {
            if num_arcs >= max_arcs {
                break;
            }
        }
        let line = line.with_context(|| format!("Could not read line {}", line_num + 1))?;
        let line = line.trim_end_matches(['\r', '\n']);
        let vals = line.split(arcs_args.separator).collect::<Vec<_>>();

        let Some(src) = vals.get(arcs_args.source_column) else {
            log::warn!(
                "Line {}: {:?} does not have enough columns: got {} columns but expected at least {} columns separated by {:?} (you can change the separator using the --separator option)",
                line_num + 1,
                line,
                vals.len(),
                arcs_args.source_column + 1,
                arcs_args.separator,
            );
            continue;
        };
        let src = page_of(src, &mut succ);
        if let Some(dst) = vals.get(arcs_args.target_column) {
            let dst = page_of(dst, &mut succ);
            succ[src].push(dst);
            num_arcs += 1;
        }
        pl.light_update();
    }
    pl.done();

    ensure!(
        !labels.is_empty(),
        "No pages read! Check that the --separator={:?} value is correct and that the --source-column={:?} and --target-column={:?} values are correct.",
        arcs_args.separator,
        arcs_args.source_column,
        arcs_args.target_column
    );
    log::info!("Arcs read: {} Pages: {}", num_arcs, labels.len());

    let generator = Sha256IdGenerator;
    let ids = labels
        .par_iter()
        .map(|label| generator.generate_id(label))
        .collect::<Result<Vec<_>>>()?;

    Ok(VecNetwork::with_pages(
        generator,
        labels.into_iter().zip(succ).map(|(label, succ)| {
            Page::new(label, succ.into_iter().map(|page| ids[page].clone()))
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str, arcs_args: &ArcsArgs) -> Result<VecNetwork> {
        read_network(input.as_bytes(), arcs_args, no_logging![])
    }

    #[test]
    fn test_read_network() -> Result<()> {
        let network = read("a\tb\nb\tc\n# comment\nc\ta\na\tc\nd\n", &ArcsArgs::default())?;
        let contents = network
            .pages()
            .iter()
            .map(Page::content)
            .collect::<Vec<_>>();
        assert_eq!(contents, ["a", "b", "c", "d"]);
        let outdegrees = network
            .pages()
            .iter()
            .map(Page::outdegree)
            .collect::<Vec<_>>();
        assert_eq!(outdegrees, [2, 1, 1, 0]);
        assert_eq!(
            network.pages()[0].links(),
            &[
                PageId::new(Sha256IdGenerator::digest("b")),
                PageId::new(Sha256IdGenerator::digest("c"))
            ]
        );
        Ok(())
    }

    #[test]
    fn test_duplicate_arcs() -> Result<()> {
        let network = read("a\tb\na\tb\nb\tb\n", &ArcsArgs::default())?;
        assert_eq!(network.size(), 2);
        assert_eq!(network.pages()[0].outdegree(), 2);
        assert_eq!(network.num_links(), 3);
        Ok(())
    }

    #[test]
    fn test_custom_columns() -> Result<()> {
        let arcs_args = ArcsArgs {
            separator: ',',
            source_column: 1,
            target_column: 2,
            lines_to_skip: 1,
            ..Default::default()
        };
        let network = read("src,dst\n0,x,y\n1,y,z\n2\n", &arcs_args)?;
        let contents = network
            .pages()
            .iter()
            .map(Page::content)
            .collect::<Vec<_>>();
        assert_eq!(contents, ["x", "y", "z"]);
        assert_eq!(network.num_links(), 2);
        Ok(())
    }

    #[test]
    fn test_max_arcs() -> Result<()> {
        let arcs_args = ArcsArgs {
            max_arcs: Some(1),
            ..Default::default()
        };
        let network = read("a\tb\nb\tc\n", &arcs_args)?;
        assert_eq!(network.size(), 2);
        Ok(())
    }

    #[test]
    fn test_empty() {
        assert!(read("# nothing\n\n", &ArcsArgs::default()).is_err());
    }
}
