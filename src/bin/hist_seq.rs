// Sequential baseline: one worker, no synchronization in the counting loop.
//
//   hist_seq --csv-header
//   hist_seq --n 5000000 --min 0 --max 255 --seed 42

use std::process::ExitCode;

fn main() -> ExitCode {
    hist_contention::cli::main_seq()
}
