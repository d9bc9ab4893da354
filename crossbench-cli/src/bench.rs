//! Benchmark orchestration across implementations
//!
//! A comparison runs the same workload against several implementations
//! and collects their timings. A failure in one implementation never
//! aborts the batch; the failing entry is recorded without a result so
//! downstream reports can mark it as unavailable.

use crate::engine;
use crossbench_core::{HarnessError, Registry};
use crossbench_report::RunResult;
use std::collections::BTreeMap;
use tracing::warn;

/// Timings keyed by implementation name. `None` marks an implementation
/// whose lifecycle failed during the batch.
pub type Comparison = BTreeMap<String, Option<RunResult>>;

/// Benchmark a single implementation.
pub fn benchmark(
    registry: &Registry,
    repetitions: u32,
    name: &str,
    args: &[String],
) -> Result<RunResult, HarnessError> {
    let implementation = registry.load(name)?;
    engine::run_lifecycle(&implementation, args, repetitions)
}

/// Benchmark a selection of implementations and aggregate the results.
///
/// Names are resolved up front so a typo fails fast, but lifecycle
/// errors during execution are contained per implementation.
pub fn compare(
    registry: &Registry,
    names: &str,
    repetitions: u32,
    args: &[String],
    print_results: bool,
) -> anyhow::Result<Comparison> {
    let (selected, wildcard) = registry.select(names)?;
    if wildcard {
        println!("Selected by wildcard: {}", selected.join(", "));
    }

    let mut comparison = Comparison::new();
    for name in &selected {
        println!();
        println!("Benchmarking '{name}'");
        match benchmark(registry, repetitions, name, args) {
            Ok(result) => {
                comparison.insert(name.clone(), Some(result));
            }
            Err(e) => {
                warn!(implementation = %name, error = %e, "benchmark failed");
                eprintln!("'{name}' failed to complete: {e}");
                comparison.insert(name.clone(), None);
            }
        }
    }

    if print_results {
        println!();
        println!("Results");
        println!("-------");
        for (name, result) in &comparison {
            match result {
                Some(result) => println!("{}: {} seconds", name, result.mean()),
                None => println!("{name}: None"),
            }
        }
    }

    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbench_core::DESCRIPTOR_FILE;
    use tempfile::TempDir;

    fn scaffold(root: &std::path::Path, name: &str, run: &str) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(DESCRIPTOR_FILE),
            format!(
                r#"
                [lifecycle]
                setup = ["true"]
                build = ["true"]
                run = [{run}]
                "#
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_failure_is_contained_per_implementation() {
        let tmp = TempDir::new().unwrap();
        scaffold(tmp.path(), "good", "\"true\"");
        scaffold(tmp.path(), "bad", "\"false\"");

        let registry = Registry::new(tmp.path());
        let comparison = compare(&registry, "good,bad", 1, &[], false).unwrap();

        assert!(comparison["good"].is_some());
        assert!(comparison["bad"].is_none());
    }

    #[test]
    fn test_unknown_name_fails_before_execution() {
        let tmp = TempDir::new().unwrap();
        scaffold(tmp.path(), "good", "\"true\"");

        let registry = Registry::new(tmp.path());
        assert!(compare(&registry, "good,missing", 1, &[], false).is_err());
    }
}
