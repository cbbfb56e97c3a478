//! Rust benchmark kernel.
//!
//! Prints one `<test>: <millis> ms` line per workload to stdout.

mod workloads;

use std::hint::black_box;
use std::time::Instant;

const PRIME_LIMIT: usize = 100_000;
const FIBONACCI_N: u32 = 35;
const MATRIX_SIZE: usize = 200;
const SORT_LEN: usize = 1_000_000;

fn measure<T>(name: &str, workload: impl FnOnce() -> T) -> f64 {
    let start = Instant::now();
    black_box(workload());
    let millis = start.elapsed().as_secs_f64() * 1000.0;
    println!("{name}: {millis:.2} ms");
    millis
}

fn main() {
    println!("Rust Benchmark");
    println!("==============");

    let mut rng = rand::thread_rng();

    measure("Prime numbers (up to 100,000)", || {
        workloads::primes_up_to(black_box(PRIME_LIMIT))
    });
    measure("Fibonacci (n=35)", || workloads::fibonacci(black_box(FIBONACCI_N)));
    measure("Matrix multiplication (200x200)", || {
        let a = workloads::random_matrix(&mut rng, MATRIX_SIZE);
        let b = workloads::random_matrix(&mut rng, MATRIX_SIZE);
        workloads::multiply(&a, &b)
    });
    measure("Array sort (1,000,000 elements)", || {
        workloads::sort_random(&mut rng, SORT_LEN)
    });
}
