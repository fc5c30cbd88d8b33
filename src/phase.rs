//! Phase catalog
//!
//! Every workload the driver can run, in the order it runs them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A workload as scheduled by the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Matrix,
    Primes,
    Fibonacci,
    Sort,
    Strings,
    Memory,
    Mandelbrot,
    Nbody,
    Spin,
    Mixed,
}

/// Named groups usable in selection expressions
pub const CLASSES: &[&str] = &["cpu", "heap", "float", "native", "extra", "all"];

impl Phase {
    /// All phases in run order
    pub const ALL: [Phase; 10] = [
        Phase::Matrix,
        Phase::Primes,
        Phase::Fibonacci,
        Phase::Sort,
        Phase::Strings,
        Phase::Memory,
        Phase::Mandelbrot,
        Phase::Nbody,
        Phase::Spin,
        Phase::Mixed,
    ];

    /// Phases run when no selection is given
    pub const NATIVE: [Phase; 8] = [
        Phase::Matrix,
        Phase::Primes,
        Phase::Fibonacci,
        Phase::Sort,
        Phase::Strings,
        Phase::Memory,
        Phase::Mandelbrot,
        Phase::Nbody,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Phase::Matrix => "matrix",
            Phase::Primes => "primes",
            Phase::Fibonacci => "fibonacci",
            Phase::Sort => "sort",
            Phase::Strings => "strings",
            Phase::Memory => "memory",
            Phase::Mandelbrot => "mandelbrot",
            Phase::Nbody => "nbody",
            Phase::Spin => "spin",
            Phase::Mixed => "mixed",
        }
    }

    /// 1-based position in run order, used as the progress line number
    pub fn ordinal(self) -> usize {
        self as usize + 1
    }

    pub fn description(self) -> &'static str {
        match self {
            Phase::Matrix => "naive O(n^3) dense matrix multiply",
            Phase::Primes => "sieve of Eratosthenes",
            Phase::Fibonacci => "naive recursive Fibonacci",
            Phase::Sort => "O(n^2) bubble sort of random integers",
            Phase::Strings => "reverse / swap-case / rotate string transform",
            Phase::Memory => "allocation churn of randomly sized blocks",
            Phase::Mandelbrot => "Mandelbrot escape-time grid",
            Phase::Nbody => "direct-sum N-body simulation",
            Phase::Spin => "float accumulation loop with sleeps",
            Phase::Mixed => "short kernels repeated for a minimum duration",
        }
    }

    /// Classes this phase belongs to (besides `all`)
    pub fn classes(self) -> &'static [&'static str] {
        match self {
            Phase::Matrix => &["cpu", "float", "native"],
            Phase::Primes => &["cpu", "heap", "native"],
            Phase::Fibonacci | Phase::Sort | Phase::Strings => &["cpu", "native"],
            Phase::Memory => &["heap", "native"],
            Phase::Mandelbrot | Phase::Nbody => &["cpu", "float", "native"],
            Phase::Spin => &["float", "extra"],
            Phase::Mixed => &["cpu", "extra"],
        }
    }

    pub fn from_name(name: &str) -> Option<Phase> {
        Phase::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Phases in a named class, or `None` for an unknown class
    pub fn class_members(class: &str) -> Option<Vec<Phase>> {
        if class == "all" {
            return Some(Phase::ALL.to_vec());
        }
        if !CLASSES.contains(&class) {
            return None;
        }
        Some(
            Phase::ALL
                .into_iter()
                .filter(|p| p.classes().contains(&class))
                .collect(),
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_follow_run_order() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.ordinal(), i + 1);
        }
        assert_eq!(Phase::Nbody.ordinal(), 8);
    }

    #[test]
    fn test_name_round_trip() {
        for phase in Phase::ALL {
            assert_eq!(Phase::from_name(phase.name()), Some(phase));
        }
        assert_eq!(Phase::from_name("bogus"), None);
    }

    #[test]
    fn test_native_class_is_default_suite() {
        assert_eq!(Phase::class_members("native").unwrap(), Phase::NATIVE.to_vec());
    }

    #[test]
    fn test_extra_class() {
        assert_eq!(
            Phase::class_members("extra").unwrap(),
            vec![Phase::Spin, Phase::Mixed]
        );
    }

    #[test]
    fn test_float_class() {
        let float = Phase::class_members("float").unwrap();
        assert!(float.contains(&Phase::Matrix));
        assert!(float.contains(&Phase::Nbody));
        assert!(!float.contains(&Phase::Sort));
    }

    #[test]
    fn test_unknown_class() {
        assert!(Phase::class_members("gpu").is_none());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Phase::Nbody).unwrap();
        assert_eq!(json, "\"nbody\"");
    }
}
