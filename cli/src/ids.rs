/*
 * SPDX-FileCopyrightText: 2025 The webrank developers
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::{GlobalArgs, open_input};
use anyhow::{Context, Result};
use clap::Parser;
use dsi_progress_logger::prelude::*;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use webrank::prelude::*;

#[derive(Parser, Debug)]
#[command(
    about = "Print the identifier of each line of a file, that is, the SHA-256 digest of the line, followed by a TAB and by the line itself.",
    long_about = None
)]
pub struct CliArgs {
    #[arg(default_value = "-")]
    /// The input file, or "-" for standard input.
    pub input: PathBuf,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let mut pl = progress_logger![item_name = "line"];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }
    let stdout = std::io::stdout().lock();
    write_ids(open_input(&args.input)?, BufWriter::new(stdout), &mut pl)
        .with_context(|| format!("Could not compute identifiers of {}", args.input.display()))
}

/// Writes to `writer` the identifier of each line of `reader`, followed by a
/// TAB and by the line.
pub fn write_ids(
    reader: impl BufRead,
    mut writer: impl Write,
    pl: &mut impl ProgressLog,
) -> Result<()> {
    let generator = Sha256IdGenerator;
    pl.start("Computing identifiers...");
    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Could not read line {}", line_num + 1))?;
        writeln!(writer, "{}\t{}", generator.generate_id(&line)?, line)?;
        pl.light_update();
    }
    pl.done();
    writer.flush()?;
    Ok(())
}
