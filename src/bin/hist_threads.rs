// Histogram on explicitly spawned and joined scoped threads.
//
//   hist_threads --n 5000000 --variant mutex --threads 8 --seed 42

use std::process::ExitCode;

use hist_contention::BackendKind;

fn main() -> ExitCode {
    hist_contention::cli::main_parallel(BackendKind::Threads)
}
