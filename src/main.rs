// Sweep runner: every backend x thread count x variant in one process.
// Prints a single CSV header followed by one line per repetition.
//
//   run_all_benchmarks --n 10000000 --threads 1,2,4,8,16 --rep 5 > results.csv
//   run_all_benchmarks --backends threads --variants atomic,mutex --no-baseline

use std::io;
use std::process::ExitCode;

use clap::Parser;
use hist_contention::cli::{self, CommonArgs};
use hist_contention::record::RecordWriter;
use hist_contention::{BackendKind, Error, Result, RunConfig, Variant};

/// Histogram contention sweep across backends, variants and team sizes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct SweepCli {
    /// Number of values to generate per repetition
    #[arg(long, default_value_t = 10_000_000)]
    n: u64,

    #[command(flatten)]
    common: CommonArgs,

    /// Backends to sweep: seq, rayon, threads
    #[arg(long, value_delimiter = ',', default_value = "rayon,threads")]
    backends: Vec<String>,

    /// Counting strategies to sweep
    #[arg(long, value_delimiter = ',', default_value = "private,atomic,mutex")]
    variants: Vec<String>,

    /// Team sizes to sweep
    #[arg(long, value_delimiter = ',', default_value = "1,2,4,8")]
    threads: Vec<usize>,

    /// Skip the sequential baseline rows
    #[arg(long)]
    no_baseline: bool,

    /// Pin worker i to core i mod cores
    #[arg(long)]
    affinity: bool,
}

struct Plan {
    base: RunConfig,
    /// One sequential row set ahead of the grid.
    baseline: bool,
    /// Parallel backends only; `seq` is folded into `baseline`.
    backends: Vec<BackendKind>,
    variants: Vec<Variant>,
    threads: Vec<usize>,
}

// Everything is parsed up front so a bad name aborts before any data is generated.
fn plan(cli: &SweepCli) -> Result<Plan> {
    let mut backends = cli
        .backends
        .iter()
        .map(|b| b.parse::<BackendKind>())
        .collect::<Result<Vec<BackendKind>>>()?;
    // A single worker has no contention to compare, so seq runs once per sweep.
    let baseline = !cli.no_baseline || backends.contains(&BackendKind::Seq);
    backends.retain(|&kind| kind != BackendKind::Seq);
    let variants = cli
        .variants
        .iter()
        .map(|v| v.parse::<Variant>())
        .collect::<Result<Vec<Variant>>>()?;
    if let Some(&bad) = cli.threads.iter().find(|&&t| t == 0) {
        return Err(Error::InvalidThreadCount(bad));
    }
    let c = &cli.common;
    let base = RunConfig::new(cli.n, c.min, c.max, c.seed, c.rep, Variant::Private, None)?;
    Ok(Plan {
        base,
        baseline,
        backends,
        variants,
        threads: cli.threads.clone(),
    })
}

fn sweep(cli: SweepCli, writer: &mut RecordWriter<impl io::Write>) -> Result<()> {
    if cli::header_only(&cli.common, writer)? {
        return Ok(());
    }
    let plan = plan(&cli)?;
    writer.header()?;

    if plan.baseline {
        let config = plan.base.with_variant(Variant::Private, Some(1))?;
        cli::run_config(&config, BackendKind::Seq, false, writer)?;
    }

    for &kind in &plan.backends {
        for &threads in &plan.threads {
            for &variant in &plan.variants {
                let config = plan.base.with_variant(variant, Some(threads))?;
                cli::run_config(&config, kind, cli.affinity, writer)?;
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = SweepCli::parse();
    cli::init_tracing();
    let mut writer = RecordWriter::new(io::stdout().lock(), cli.common.format);
    cli::exit_status(sweep(cli, &mut writer))
}
