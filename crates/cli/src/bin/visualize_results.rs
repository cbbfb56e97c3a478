//! Chart the most recent benchmark results.

use clap::Parser;
use langbench_cli::{visualize_results, Args};

fn main() {
    if let Err(e) = visualize_results(Args::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
