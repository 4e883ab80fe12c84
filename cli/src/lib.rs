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

use anyhow::{Context, Result, bail, ensure};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use std::time::SystemTime;
use webrank::graphs::PageId;

pub mod build_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));

    pub fn version_string() -> String {
        format!(
            "{}
build info: {} build for {} with {}",
            PKG_VERSION, PROFILE, TARGET, RUSTC_VERSION
        )
    }
}

#[derive(Args, Debug)]
/// Shared CLI arguments for reading files containing arcs.
pub struct ArcsArgs {
    #[arg(long, default_value_t = '#')]
    /// Ignore lines that start with this symbol.
    pub line_comment_symbol: char,

    #[arg(long, default_value_t = 0)]
    /// How many lines to skip, ignoring comment lines.
    pub lines_to_skip: usize,

    #[arg(long)]
    /// How many lines to parse, after skipping the first lines_to_skip and
    /// ignoring comment lines.
    pub max_arcs: Option<usize>,

    #[arg(long, default_value_t = '\t')]
    /// The column separator.
    pub separator: char,

    #[arg(long, default_value_t = 0)]
    /// The index of the column containing the source page of an arc.
    pub source_column: usize,

    #[arg(long, default_value_t = 1)]
    /// The index of the column containing the target page of an arc. Lines
    /// without this column declare a page without links.
    pub target_column: usize,
}

impl Default for ArcsArgs {
    fn default() -> Self {
        Self {
            line_comment_symbol: '#',
            lines_to_skip: 0,
            max_arcs: None,
            separator: '\t',
            source_column: 0,
            target_column: 1,
        }
    }
}

/// Parses the number of threads from a string.
///
/// This function is meant to be used with `#[arg(...,  value_parser =
/// num_threads_parser)]`.
pub fn num_threads_parser(arg: &str) -> Result<usize> {
    let num_threads = arg.parse::<usize>()?;
    ensure!(num_threads > 0, "Number of threads must be greater than 0");
    Ok(num_threads)
}

/// Shared CLI arguments for commands that specify a number of threads.
#[derive(Args, Debug)]
pub struct NumThreadsArg {
    #[arg(short = 'j', long, default_value_t = rayon::current_num_threads().max(1), value_parser = num_threads_parser)]
    /// The number of threads to use.
    pub num_threads: usize,
}

/// A ranked page, as written by [`RankFormat::store`].
#[derive(Serialize, Debug, Clone, Copy)]
pub struct RankedPage<'a> {
    pub id: &'a PageId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a str>,
    pub rank: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
/// Formats for storing ranks.
pub enum RankFormat {
    /// ASCII format, one page per line: identifier, label (if available) and
    /// rank, separated by a TAB.
    Ascii,
    /// A JSON array of objects with fields `id`, `label` (if available), and
    /// `rank`.
    Json,
}

impl RankFormat {
    /// Stores ranked pages in the specified `path` using the format defined
    /// by `self`; the path `-` denotes the standard output.
    ///
    /// `precision` will be used to truncate the ranks to the specified number
    /// of decimal digits. If `None`, the shortest representation that parses
    /// back to the same value will be used.
    pub fn store(
        &self,
        path: impl AsRef<Path>,
        pages: &[RankedPage<'_>],
        precision: Option<usize>,
    ) -> Result<()> {
        let path = path.as_ref();
        if path == Path::new("-") {
            return self.write(std::io::stdout().lock(), pages, precision);
        }
        create_parent_dir(path)?;
        let path_display = path.display();
        let file = std::fs::File::create(path)
            .with_context(|| format!("Could not create rank file at {}", path_display))?;
        log::info!("Storing ranks at {}", path_display);
        self.write(BufWriter::new(file), pages, precision)
            .with_context(|| format!("Could not write ranks to {}", path_display))
    }

    /// Writes ranked pages to `writer` using the format defined by `self`.
    pub fn write(
        &self,
        mut writer: impl Write,
        pages: &[RankedPage<'_>],
        precision: Option<usize>,
    ) -> Result<()> {
        match self {
            RankFormat::Ascii => {
                for page in pages {
                    write!(writer, "{}\t", page.id)?;
                    if let Some(label) = page.label {
                        write!(writer, "{}\t", label)?;
                    }
                    match precision {
                        None => writeln!(writer, "{}", page.rank),
                        Some(precision) => writeln!(writer, "{:.precision$}", page.rank),
                    }?;
                }
            }
            RankFormat::Json => match precision {
                None => serde_json::to_writer_pretty(&mut writer, pages)?,
                Some(precision) => {
                    let rounded = pages
                        .iter()
                        .map(|page| RankedPage {
                            rank: round(page.rank, precision),
                            ..*page
                        })
                        .collect::<Vec<_>>();
                    serde_json::to_writer_pretty(&mut writer, &rounded)?
                }
            },
        }
        writer.flush()?;
        Ok(())
    }
}

/// Rounds `value` to `precision` decimal digits.
fn round(value: f64, precision: usize) -> f64 {
    format!("{value:.precision$}").parse().unwrap_or(value)
}

/// Opens the given path for buffered reading; the path `-` denotes the
/// standard input.
pub fn open_input(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    if path == Path::new("-") {
        log::info!("Reading from standard input...");
        return Ok(Box::new(BufReader::new(std::io::stdin())));
    }
    let file = std::fs::File::open(path)
        .with_context(|| format!("Could not open {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Creates all parent directories of the given file path.
pub fn create_parent_dir(file_path: impl AsRef<Path>) -> Result<()> {
    // ensure that the dst directory exists
    if let Some(parent_dir) = file_path.as_ref().parent() {
        std::fs::create_dir_all(parent_dir).with_context(|| {
            format!(
                "Failed to create the directory {:?}",
                parent_dir.to_string_lossy()
            )
        })?;
    }
    Ok(())
}

/// Parses a duration such as `1m30s` or `500`.
///
/// Amounts may be followed by `s`, `m`, `h` or `d`; a trailing amount without
/// unit is in milliseconds.
fn parse_duration(value: &str) -> Result<Duration> {
    ensure!(
        !value.trim().is_empty(),
        "Empty duration string, use `0` to log at every update"
    );
    let mut duration = Duration::ZERO;
    let mut digits = String::new();
    for c in value.chars().filter(|c| !c.is_whitespace()) {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let amount = digits
            .parse::<u64>()
            .with_context(|| format!("Missing amount before {c:?}"))?;
        let unit = match c {
            's' => 1,
            'm' => 60,
            'h' => 60 * 60,
            'd' => 24 * 60 * 60,
            _ => bail!("Invalid duration suffix: {c}"),
        };
        duration += Duration::from_secs(amount * unit);
        digits.clear();
    }
    if !digits.is_empty() {
        duration += Duration::from_millis(digits.parse()?);
    }
    Ok(duration)
}

/// Initializes the `env_logger` logger with a custom format including
/// timestamps with elapsed time since initialization.
pub fn init_env_logger() -> Result<()> {
    use jiff::SpanRound;
    use jiff::fmt::friendly::{Designator, Spacing, SpanPrinter};

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    let start = std::time::Instant::now();
    let printer = SpanPrinter::new()
        .spacing(Spacing::None)
        .designator(Designator::Compact);
    let span_round = SpanRound::new()
        .largest(jiff::Unit::Day)
        .smallest(jiff::Unit::Millisecond)
        .days_are_24_hours();

    builder.format(move |buf, record| {
        let Ok(ts) = jiff::Timestamp::try_from(SystemTime::now()) else {
            return Err(std::io::Error::other("Failed to get timestamp"));
        };
        let style = buf.default_level_style(record.level());
        let elapsed = start.elapsed();
        let span = jiff::Span::new()
            .seconds(elapsed.as_secs() as i64)
            .milliseconds(elapsed.subsec_millis() as i64);
        let span = span.round(span_round).map_err(std::io::Error::other)?;
        writeln!(
            buf,
            "{} {} {style}{}{style:#} [{:?}] {} - {}",
            ts.strftime("%F %T%.3f"),
            printer.span_to_string(&span),
            record.level(),
            std::thread::current().id(),
            record.target(),
            record.args()
        )
    });
    builder.try_init()?;
    Ok(())
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    #[arg(long, value_parser = parse_duration, global=true, display_order = 1000)]
    /// How often to log progress (default: 10s), e.g. "30s", "2m", or "1m30s";
    /// a number without unit is in milliseconds.
    pub log_interval: Option<Duration>,
}

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    #[clap(name = "pagerank", visible_alias = "pr")]
    PageRank(rank::pagerank::CliArgs),
    Ids(ids::CliArgs),
}

#[derive(Parser, Debug)]
#[command(name = "webrank", version=build_info::version_string())]
/// Tools to compute the PageRank of networks of content-addressed pages.
///
/// Logging is controlled by the RUST_LOG environment variable (default:
/// info).
pub struct Cli {
    #[command(subcommand)]
    pub command: SubCommands,
    #[clap(flatten)]
    pub args: GlobalArgs,
}

pub mod ids;
pub mod network;
pub mod rank;

/// The entry point of the command-line interface.
pub fn cli_main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let start = std::time::Instant::now();
    let cli = Cli::parse_from(args);
    match cli.command {
        SubCommands::PageRank(args) => {
            rank::pagerank::main(cli.args, args)?;
        }
        SubCommands::Ids(args) => {
            ids::main(cli.args, args)?;
        }
    }

    log::info!(
        "The command took {}",
        pretty_print_elapsed(start.elapsed().as_secs_f64())
    );

    Ok(())
}

/// Formats an elapsed time in seconds as minutes and seconds.
fn pretty_print_elapsed(elapsed: f64) -> String {
    match (elapsed / 60.0) as u64 {
        0 => format!("{elapsed:.3}s"),
        minutes => format!("{minutes}m {:.3}s ({elapsed:.3}s)", elapsed % 60.0),
    }
}
