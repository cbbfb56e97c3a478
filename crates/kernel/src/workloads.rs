//! The four benchmark workloads shared by every language.

use rand::Rng;

/// Primes up to and including `limit`, by sieve of Eratosthenes.
pub fn primes_up_to(limit: usize) -> Vec<usize> {
    let mut composite = vec![false; limit + 1];
    let mut primes = Vec::new();
    for i in 2..=limit {
        if composite[i] {
            continue;
        }
        primes.push(i);
        let mut j = i * i;
        while j <= limit {
            composite[j] = true;
            j += i;
        }
    }
    primes
}

/// Naive doubly-recursive Fibonacci.
pub fn fibonacci(n: u32) -> u64 {
    match n {
        0 | 1 => u64::from(n),
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}

/// Square matrix of uniform random values in `[0, 1)`.
pub fn random_matrix<R: Rng>(rng: &mut R, size: usize) -> Vec<Vec<f64>> {
    (0..size)
        .map(|_| (0..size).map(|_| rng.gen::<f64>()).collect())
        .collect()
}

/// Triple-loop product of two square matrices.
pub fn multiply(a: &[Vec<f64>], b: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = a.len();
    let mut out = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += a[i][k] * b[k][j];
            }
            out[i][j] = sum;
        }
    }
    out
}

/// Sort `len` random integers in `[0, 1_000_000)` and return them.
pub fn sort_random<R: Rng>(rng: &mut R, len: usize) -> Vec<i32> {
    let mut data: Vec<i32> = (0..len).map(|_| rng.gen_range(0..1_000_000)).collect();
    data.sort_unstable();
    data
}
