//! Profload - synthetic CPU and memory workloads for profiler fixtures
//!
//! This library provides the workloads (matrix multiply, sieve, recursive
//! Fibonacci, bubble sort, string transforms, allocation churn, Mandelbrot,
//! N-body) and the sequential driver that times them, so an external
//! profiler or tracer has a known, repeatable target.

pub mod cli;
pub mod config;
pub mod filter;
pub mod json_output;
pub mod phase;
pub mod profiling;
pub mod runner;
pub mod stats;
pub mod workloads;
