//! Phase selection for --only expressions
//!
//! Supports:
//! - Individual phases: --only matrix,primes
//! - Phase classes: --only cpu, --only float, --only extra
//! - Regex patterns: --only /^m/
//! - Negation: --only '!fibonacci' or --only 'all,!spin'
//!
//! An expression made only of negations starts from the native suite.

use crate::phase::Phase;
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::collections::BTreeSet;

/// Set of phases selected for a run
#[derive(Debug, Clone)]
pub struct PhaseFilter {
    include: BTreeSet<Phase>,
}

impl PhaseFilter {
    /// The eight native workloads, run when no --only is given
    pub fn native() -> Self {
        Self {
            include: Phase::NATIVE.into_iter().collect(),
        }
    }

    /// Parse a comma-separated selection expression
    pub fn from_expr(expr: &str) -> Result<Self> {
        let mut include = BTreeSet::new();
        let mut exclude = BTreeSet::new();
        let mut saw_include = false;

        for part in expr.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            if let Some(negated) = part.strip_prefix('!') {
                exclude.extend(Self::resolve_item(negated.trim())?);
            } else {
                saw_include = true;
                include.extend(Self::resolve_item(part)?);
            }
        }

        if !saw_include && exclude.is_empty() {
            bail!("Empty phase selection: {:?}. Expected e.g. --only matrix,primes", expr);
        }
        if !saw_include {
            include.extend(Phase::NATIVE);
        }

        include.retain(|p| !exclude.contains(p));
        Ok(Self { include })
    }

    /// Resolve a single item: phase name, class name or /regex/
    fn resolve_item(item: &str) -> Result<Vec<Phase>> {
        if let Some(pattern) = item.strip_prefix('/').and_then(|s| s.strip_suffix('/')) {
            let regex = Regex::new(pattern)
                .with_context(|| format!("Invalid phase pattern: /{}/", pattern))?;
            return Ok(Phase::ALL
                .into_iter()
                .filter(|p| regex.is_match(p.name()))
                .collect());
        }

        if let Some(phase) = Phase::from_name(item) {
            return Ok(vec![phase]);
        }

        if let Some(members) = Phase::class_members(item) {
            return Ok(members);
        }

        bail!(
            "Unknown phase or class: {:?}. Run with --list to see available phases",
            item
        );
    }

    /// Selected phases in run order
    pub fn phases(&self) -> Vec<Phase> {
        self.include.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }
}

impl Default for PhaseFilter {
    fn default() -> Self {
        Self::native()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_native_suite() {
        let filter = PhaseFilter::default();
        assert_eq!(filter.phases(), Phase::NATIVE.to_vec());
        assert!(!filter.phases().contains(&Phase::Spin));
    }

    #[test]
    fn test_individual_phases() {
        let filter = PhaseFilter::from_expr("primes,matrix").unwrap();
        assert!(filter.phases().contains(&Phase::Matrix));
        assert!(filter.phases().contains(&Phase::Primes));
        assert!(!filter.phases().contains(&Phase::Sort));
    }

    #[test]
    fn test_run_order_is_canonical() {
        let filter = PhaseFilter::from_expr("nbody,sort,matrix").unwrap();
        assert_eq!(
            filter.phases(),
            vec![Phase::Matrix, Phase::Sort, Phase::Nbody]
        );
    }

    #[test]
    fn test_float_class() {
        let filter = PhaseFilter::from_expr("float").unwrap();
        assert!(filter.phases().contains(&Phase::Matrix));
        assert!(filter.phases().contains(&Phase::Mandelbrot));
        assert!(filter.phases().contains(&Phase::Nbody));
        assert!(filter.phases().contains(&Phase::Spin));
        assert!(!filter.phases().contains(&Phase::Fibonacci));
    }

    #[test]
    fn test_heap_class_and_phase() {
        let filter = PhaseFilter::from_expr("heap").unwrap();
        assert!(filter.phases().contains(&Phase::Memory));
        assert!(filter.phases().contains(&Phase::Primes));
        assert!(!filter.phases().contains(&Phase::Matrix));
    }

    #[test]
    fn test_regex_pattern() {
        let filter = PhaseFilter::from_expr("/^m/").unwrap();
        assert_eq!(
            filter.phases(),
            vec![Phase::Matrix, Phase::Memory, Phase::Mandelbrot, Phase::Mixed]
        );
    }

    #[test]
    fn test_invalid_regex() {
        let result = PhaseFilter::from_expr("/[unclosed/");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid phase pattern"));
    }

    #[test]
    fn test_negation_only_starts_from_native() {
        let filter = PhaseFilter::from_expr("!fibonacci,!sort").unwrap();
        assert_eq!(filter.phases().len(), 6);
        assert!(!filter.phases().contains(&Phase::Fibonacci));
        assert!(!filter.phases().contains(&Phase::Sort));
        assert!(!filter.phases().contains(&Phase::Mixed));
    }

    #[test]
    fn test_class_with_negation() {
        let filter = PhaseFilter::from_expr("all,!spin").unwrap();
        assert!(filter.phases().contains(&Phase::Mixed));
        assert!(!filter.phases().contains(&Phase::Spin));
        assert_eq!(filter.phases().len(), 9);
    }

    #[test]
    fn test_negated_regex() {
        let filter = PhaseFilter::from_expr("cpu,!/^(fib|sort)/").unwrap();
        assert!(filter.phases().contains(&Phase::Matrix));
        assert!(!filter.phases().contains(&Phase::Fibonacci));
        assert!(!filter.phases().contains(&Phase::Sort));
    }

    #[test]
    fn test_unknown_name() {
        let result = PhaseFilter::from_expr("matrix,bogus");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("bogus"));
    }

    #[test]
    fn test_empty_expression() {
        assert!(PhaseFilter::from_expr("").is_err());
        assert!(PhaseFilter::from_expr(" , ").is_err());
    }

    #[test]
    fn test_everything_excluded_is_empty() {
        let filter = PhaseFilter::from_expr("matrix,!matrix").unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_whitespace_handling() {
        let filter = PhaseFilter::from_expr(" matrix , primes ").unwrap();
        assert_eq!(filter.phases(), vec![Phase::Matrix, Phase::Primes]);
    }

    #[test]
    fn test_all_class() {
        let filter = PhaseFilter::from_expr("all").unwrap();
        assert_eq!(filter.phases(), Phase::ALL.to_vec());
    }
}
