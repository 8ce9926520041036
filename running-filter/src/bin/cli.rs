//! Command-line front end for running-filter.
//!
//! Feeds samples from the command line, or from stdin as they arrive when
//! none are given, through a running filter and prints one line per
//! sample: the sample, the running statistic, and `rejected` if the sample
//! fell outside the valid range.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;

use running_filter::tracing::prelude::*;
use running_filter::{FilterConfig, RunningFilter, Sample, StatisticKind};

#[derive(Debug, Parser)]
#[command(name = "running-filter-cli", version = running_filter::VERSION)]
#[command(about = "Smooth a stream of samples with a running statistic")]
struct Args {
    /// Statistic to compute: average, median, minimum or maximum.
    /// Unknown names fall back to average.
    #[arg(short, long)]
    kind: Option<String>,

    /// Window size (3-11; forced odd for median).
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Lowest accepted sample, clamped into the sample domain.
    #[arg(long, allow_negative_numbers = true)]
    low: Option<f64>,

    /// Highest accepted sample, clamped into the sample domain.
    #[arg(long, allow_negative_numbers = true)]
    high: Option<f64>,

    /// JSON filter configuration. Command-line options override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Treat samples as floating point instead of 16-bit unsigned.
    #[arg(long)]
    float: bool,

    /// Print the effective settings and the window after each sample.
    #[arg(short, long)]
    verbose: bool,

    /// Samples to filter. Read whitespace-separated from stdin if omitted.
    #[arg(allow_negative_numbers = true)]
    samples: Vec<String>,
}

fn main() -> Result<()> {
    running_filter::tracing::init(running_filter::tracing::DEFAULT_DIRECTIVE);

    let args = Args::parse();

    if args.float {
        run::<f64>(&args)
    } else {
        run::<u16>(&args)
    }
}

fn run<T>(args: &Args) -> Result<()>
where
    T: Sample + FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let config = build_config::<T>(args)?;
    let stdout = io::stdout();
    let mut session = Session::new(RunningFilter::new(&config), stdout.lock(), args.verbose)?;

    if args.samples.is_empty() {
        session.feed_lines(io::stdin().lock())?;
    } else {
        for token in &args.samples {
            session.feed(token)?;
        }
    }

    session.finish();
    Ok(())
}

/// Build the filter configuration: defaults, then the config file, then
/// command-line options.
fn build_config<T: Sample>(args: &Args) -> Result<FilterConfig<T>> {
    let mut config = match &args.config {
        Some(path) => FilterConfig::load(path)?,
        None => FilterConfig::default(),
    };

    if let Some(kind) = &args.kind {
        config.kind = StatisticKind::from_name(kind);
    }
    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    if let Some(low) = args.low {
        config.low = T::from_f64_clamped(low);
    }
    if let Some(high) = args.high {
        config.high = T::from_f64_clamped(high);
    }

    Ok(config)
}

/// A filter wired to an output, printing one line per sample.
struct Session<T: Sample, W: Write> {
    filter: RunningFilter<T>,
    out: W,
    verbose: bool,
    samples: usize,
    rejected: usize,
}

impl<T, W> Session<T, W>
where
    T: Sample + FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    W: Write,
{
    fn new(filter: RunningFilter<T>, mut out: W, verbose: bool) -> Result<Self> {
        if verbose {
            let range = filter.valid_range();
            writeln!(
                out,
                "# kind={} capacity={} low={} high={}",
                filter.kind(),
                filter.capacity(),
                range.low(),
                range.high()
            )?;
            out.flush()?;
        }
        Ok(Self {
            filter,
            out,
            verbose,
            samples: 0,
            rejected: 0,
        })
    }

    /// Filter samples line by line as they arrive, so a live sensor pipe
    /// sees each result immediately.
    fn feed_lines(&mut self, input: impl BufRead) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read samples from stdin")?;
            for token in line.split_whitespace() {
                self.feed(token)?;
            }
        }
        Ok(())
    }

    fn feed(&mut self, token: &str) -> Result<()> {
        let sample: T = token
            .parse()
            .with_context(|| format!("not a valid sample: {token:?}"))?;
        self.samples += 1;

        match self.filter.try_update(sample) {
            Ok(statistic) => write!(self.out, "{sample}\t{statistic}")?,
            Err(reason) => {
                self.rejected += 1;
                debug!(%reason, "Sample outside valid range");
                write!(self.out, "{sample}\t{}\trejected", self.filter.statistic())?;
            }
        }
        if self.verbose {
            write!(self.out, "\t{}", format_window(self.filter.window()))?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(self) {
        info!(
            samples = self.samples,
            rejected = self.rejected,
            statistic = %self.filter.statistic(),
            "Finished filtering"
        );
    }
}

fn format_window<T: Display>(window: impl Iterator<Item = T>) -> String {
    let items: Vec<String> = window.map(|sample| sample.to_string()).collect();
    format!("[{}]", items.join(", "))
}
