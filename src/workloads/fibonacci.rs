//! Naive recursive Fibonacci
//!
//! Exponential on purpose: the deep, repetitive call tree is what stack
//! samplers should see.

/// Largest `n` whose Fibonacci number fits in a `u64`
pub const MAX_FIBONACCI_N: u32 = 92;

/// Compute `fib(n)` with two recursive calls per level
pub fn fibonacci_recursive(n: u32) -> u64 {
    if n <= 1 {
        return u64::from(n);
    }
    fibonacci_recursive(n - 1) + fibonacci_recursive(n - 2)
}
