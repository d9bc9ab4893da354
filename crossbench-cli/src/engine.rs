//! Lifecycle execution engine
//!
//! Drives an implementation through setup, build and timed run phases.
//! The run phase is repeated a configurable number of times and each
//! wall-clock duration is recorded individually.

use crossbench_core::{HarnessError, Implementation};
use crossbench_report::RunResult;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Execute the full setup/build/run lifecycle of an implementation,
/// timing each of `repetitions` runs.
pub fn run_lifecycle(
    implementation: &Implementation,
    args: &[String],
    repetitions: u32,
) -> Result<RunResult, HarnessError> {
    implementation.lifecycle.setup()?;
    implementation.lifecycle.build()?;

    if let Some(artifact) = implementation.lifecycle.artifact_path() {
        if !artifact.exists() {
            return Err(HarnessError::BuildFailure {
                name: implementation.name.clone(),
                reason: format!("missing build artifact {}", artifact.display()),
            });
        }
    }

    println!("========== Starting Run ==========");

    let progress = if repetitions > 1 {
        let bar = ProgressBar::new(repetitions as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} runs ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    let mut durations = Vec::with_capacity(repetitions as usize);
    for _ in 0..repetitions {
        let start = Instant::now();
        implementation.lifecycle.run(args)?;
        durations.push(start.elapsed().as_secs_f64());
        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    println!("========== Finishing Run ==========");

    let result = RunResult::new(implementation.name.clone(), durations);
    report_timing(&result);
    Ok(result)
}

fn report_timing(result: &RunResult) {
    if result.repetitions == 1 {
        println!("Run time: {} seconds", result.mean());
    } else {
        println!(
            "{} repetitions - average run time: {} seconds",
            result.repetitions,
            result.mean()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbench_core::{Lifecycle, DESCRIPTOR_FILE};
    use tempfile::TempDir;

    fn write_impl(root: &std::path::Path, name: &str, run: &str) -> Implementation {
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
        let lifecycle = Lifecycle::load(name, &dir).unwrap();
        Implementation {
            name: name.to_string(),
            directory: dir,
            lifecycle,
        }
    }

    #[test]
    fn test_records_one_duration_per_repetition() {
        let tmp = TempDir::new().unwrap();
        let imp = write_impl(tmp.path(), "quick", "\"true\"");
        let result = run_lifecycle(&imp, &[], 3).unwrap();
        assert_eq!(result.repetitions, 3);
        assert_eq!(result.durations.len(), 3);
    }

    #[test]
    fn test_failing_run_is_reported() {
        let tmp = TempDir::new().unwrap();
        let imp = write_impl(tmp.path(), "broken", "\"false\"");
        let err = run_lifecycle(&imp, &[], 1).unwrap_err();
        assert!(matches!(err, HarnessError::RunFailure { .. }));
    }
}
