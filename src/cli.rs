//! Command-line front ends shared by the benchmark binaries.
//!
//! Records go to stdout, logs go to stderr (filtered by `RUST_LOG`, default
//! `warn`), and failures map to [`Error::exit_code`].

use std::io;
use std::process::ExitCode;

use clap::{Args, Parser};
use tracing_subscriber::EnvFilter;

use crate::backend::BackendKind;
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::harness;
use crate::histogram::Variant;
use crate::record::{OutputFormat, RecordWriter};

/// Flags common to every binary.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Smallest generated value (inclusive)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub min: i32,

    /// Largest generated value (inclusive); swapped with --min if smaller
    #[arg(long, default_value_t = 255, allow_hyphen_values = true)]
    pub max: i32,

    /// Base seed; each worker derives its own stream from it
    #[arg(long, default_value_t = 12345)]
    pub seed: u32,

    /// Repetitions per configuration, one record each
    #[arg(long, default_value_t = 1)]
    pub rep: usize,

    /// Print the CSV header and exit without running anything
    #[arg(long)]
    pub csv_header: bool,

    /// Record format: csv or json (one object per line)
    #[arg(long, default_value = "csv")]
    pub format: OutputFormat,
}

/// Parallel histogram benchmark on a single backend
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ParallelCli {
    /// Number of values to generate
    #[arg(long, default_value_t = 10_000_000)]
    pub n: u64,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Counting strategy: private | atomic | mutex
    #[arg(long, default_value = "private")]
    pub variant: String,

    /// Requested team size (backend default if omitted)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Pin worker i to core i mod cores
    #[arg(long)]
    pub affinity: bool,
}

/// Sequential histogram baseline
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct SeqCli {
    /// Number of values to generate
    #[arg(long, default_value_t = 1_000_000)]
    pub n: u64,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Installs the stderr log subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Converts a run outcome into a process exit status.
///
/// This is the only place a failure is reported; lower layers just return it.
pub fn exit_status(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn report_failure(err: &Error) {
    if err.is_config() {
        tracing::error!(error = %err, "configuration rejected");
    } else {
        tracing::error!(error = %err, "run aborted");
    }
}

/// Writes the CSV header when `--csv-header` was given; returns true if the
/// caller should stop there. The header is printed for `--format json` too.
pub fn header_only(
    common: &CommonArgs,
    writer: &mut RecordWriter<impl io::Write>,
) -> Result<bool> {
    if !common.csv_header {
        return Ok(false);
    }
    writer.csv_header()?;
    Ok(true)
}

/// Runs every repetition of `config` on a fresh `kind` backend, writing one
/// record per repetition to stdout.
pub fn run_config(
    config: &RunConfig,
    kind: BackendKind,
    affinity: bool,
    writer: &mut RecordWriter<impl io::Write>,
) -> Result<()> {
    let backend = kind.build(config.threads(), affinity)?;
    tracing::debug!(
        backend = backend.name(),
        variant = %config.variant(),
        n = config.n(),
        bins = config.bins(),
        "starting run"
    );
    harness::run(config, backend.as_ref(), |record| writer.write(record))
}

fn parallel(
    kind: BackendKind,
    cli: ParallelCli,
    writer: &mut RecordWriter<impl io::Write>,
) -> Result<()> {
    if header_only(&cli.common, writer)? {
        return Ok(());
    }
    let c = &cli.common;
    let config = RunConfig::parse(cli.n, c.min, c.max, c.seed, c.rep, &cli.variant, cli.threads)?;
    run_config(&config, kind, cli.affinity, writer)
}

fn sequential(cli: SeqCli, writer: &mut RecordWriter<impl io::Write>) -> Result<()> {
    if header_only(&cli.common, writer)? {
        return Ok(());
    }
    let c = &cli.common;
    let config = RunConfig::new(cli.n, c.min, c.max, c.seed, c.rep, Variant::Private, Some(1))?;
    run_config(&config, BackendKind::Seq, false, writer)
}

/// Entry point of `hist_rayon` and `hist_threads`.
pub fn main_parallel(kind: BackendKind) -> ExitCode {
    let cli = ParallelCli::parse();
    init_tracing();
    let mut writer = RecordWriter::new(io::stdout().lock(), cli.common.format);
    exit_status(parallel(kind, cli, &mut writer))
}

/// Entry point of `hist_seq`.
pub fn main_seq() -> ExitCode {
    let cli = SeqCli::parse();
    init_tracing();
    let mut writer = RecordWriter::new(io::stdout().lock(), cli.common.format);
    exit_status(sequential(cli, &mut writer))
}
