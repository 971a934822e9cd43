// Histogram on an implicit worker team (rayon pool, one broadcast per phase).
//
//   hist_rayon --n 5000000 --variant private --threads 4 --seed 42
//   hist_rayon --n 5000000 --variant atomic  --seed 42     (team = logical CPUs)

use std::process::ExitCode;

use hist_contention::BackendKind;

fn main() -> ExitCode {
    hist_contention::cli::main_parallel(BackendKind::Rayon)
}
