//! Mixed short-kernel loop
//!
//! Repeats a recursive Fibonacci, a trial-division prime scan and a nested
//! product sum until a minimum wall time has passed. Suited to samplers with
//! coarse intervals that need a run of known minimum length.

use super::fibonacci::fibonacci_recursive;
use super::primes::trial_division_primes;
use std::hint::black_box;
use std::time::{Duration, Instant};

const FIBONACCI_N: u32 = 25;
const PRIME_LIMIT: u32 = 500;
const PRODUCT_SIZE: u64 = 1000;

/// Result of [`run_for`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixedReport {
    pub iterations: u64,
    pub elapsed: Duration,
    pub checksum: u64,
}

/// `sum(i * j)` over `0..n` for both indices
pub fn pairwise_product_sum(n: u64) -> u64 {
    let mut result = 0u64;
    for i in 0..n {
        for j in 0..n {
            result = result.wrapping_add(i * j);
        }
    }
    result
}

/// One pass over the three kernels
pub fn iteration() -> u64 {
    let fib = fibonacci_recursive(black_box(FIBONACCI_N));
    let primes = trial_division_primes(black_box(PRIME_LIMIT));
    let products = pairwise_product_sum(black_box(PRODUCT_SIZE));
    fib.wrapping_add(primes.len() as u64).wrapping_add(products)
}

/// Repeat [`iteration`] until at least `min_duration` has elapsed
///
/// Always runs at least one iteration.
pub fn run_for(min_duration: Duration) -> MixedReport {
    let start = Instant::now();
    let mut iterations = 0u64;
    let mut checksum = 0u64;

    loop {
        checksum = checksum.wrapping_add(black_box(iteration()));
        iterations += 1;
        if start.elapsed() >= min_duration {
            break;
        }
    }

    MixedReport {
        iterations,
        elapsed: start.elapsed(),
        checksum,
    }
}
