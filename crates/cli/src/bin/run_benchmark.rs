//! Build and run every benchmark kernel, then print and save the results.

use clap::Parser;
use langbench_cli::{run_benchmark, Args};

fn main() {
    if let Err(e) = run_benchmark(Args::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
