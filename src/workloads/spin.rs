//! Floating-point accumulation loop
//!
//! The driver alternates this with sleeps so samplers see both on-CPU and
//! off-CPU stretches.

/// `sum(i * 0.1)` for `i in 0..n`
pub fn accumulate(n: u64) -> f64 {
    let mut sum = 0.0;
    for i in 0..n {
        sum += i as f64 * 0.1;
    }
    sum
}
