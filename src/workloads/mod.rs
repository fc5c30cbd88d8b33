//! Synthetic workloads
//!
//! Each submodule is one self-contained computation. None of them does I/O
//! or logging; the driver in [`crate::runner`] owns timing and output.
//!
//! Routines that need random input take `&mut impl Rng` so a run can be
//! replayed from a seed.

pub mod fibonacci;
pub mod mandelbrot;
pub mod matrix;
pub mod memory;
pub mod mixed;
pub mod nbody;
pub mod primes;
pub mod sort;
pub mod spin;
pub mod strings;

pub use fibonacci::fibonacci_recursive;
pub use mandelbrot::{escape_ratio, MandelbrotSummary};
pub use matrix::{Matrix, MatrixError};
pub use memory::MemoryStressReport;
pub use nbody::{Body, Simulation};
pub use primes::sieve;
pub use sort::{bubble_sort, is_sorted};
pub use strings::transform;
