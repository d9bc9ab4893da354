//! Chart, table and JSON reporting operations
//!
//! Each reporting command runs a full comparison first, then persists a
//! set of artifacts into the results directory: an SVG chart, a PNG
//! snapshot of it, an HTML cross-tab and a JSON document. Persistence is
//! best-effort per artifact; all failures are reported together at the
//! end so a missing PNG converter never costs the JSON snapshot.

use crate::bench::{self, Comparison};
use crate::config::HarnessConfig;
use crate::CHECKSUM_ALGORITHMS;
use anyhow::bail;
use crossbench_core::Registry;
use crossbench_report::{
    comparison_document, render_bar_chart, render_box_chart, render_cross_tab, title_info,
    RenderOutcome, Reporter, RunMetadata, RunResult,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;

const CHART_TITLE: &str = "Checksum benchmark results";

/// Benchmark the selection and persist a mean-bar chart of the results.
pub fn plot(
    registry: &Registry,
    config: &HarnessConfig,
    names: &str,
    repetitions: u32,
    args: &[String],
) -> anyhow::Result<()> {
    let comparison = bench::compare(registry, names, repetitions, args, false)?;
    let metadata = RunMetadata::collect(
        "plot",
        comparison.keys().cloned().collect(),
        repetitions,
        args,
    );
    let subtitle = title_info(repetitions, args);

    // Fastest bar on top; failed implementations sink to the bottom.
    let mut entries: Vec<(String, Option<f64>)> = comparison
        .iter()
        .map(|(name, result)| (name.clone(), result.as_ref().map(RunResult::mean)))
        .collect();
    entries.sort_by(|a, b| {
        let av = a.1.unwrap_or(f64::INFINITY);
        let bv = b.1.unwrap_or(f64::INFINITY);
        av.total_cmp(&bv)
    });

    let svg = render_bar_chart(
        CHART_TITLE,
        &subtitle,
        &entries,
        config.visuals.width,
        config.visuals.height,
    );

    let rows: Vec<(String, Vec<Option<f64>>)> = entries
        .iter()
        .map(|(name, mean)| (name.clone(), vec![*mean]))
        .collect();
    let html = render_cross_tab(CHART_TITLE, &["mean (s)".to_string()], &rows);

    let document = comparison_document(mean_values(&comparison), &metadata)?;

    let reporter = Reporter::new(&config.output.directory, &config.output.png_converter);
    report_outcomes(reporter.persist_run(&svg, &html, &document))
}

/// Benchmark the selection and persist a box/whisker distribution chart.
pub fn boxplot(
    registry: &Registry,
    config: &HarnessConfig,
    names: &str,
    repetitions: u32,
    args: &[String],
) -> anyhow::Result<()> {
    let comparison = bench::compare(registry, names, repetitions, args, false)?;
    let metadata = RunMetadata::collect(
        "boxplot",
        comparison.keys().cloned().collect(),
        repetitions,
        args,
    );
    let subtitle = title_info(repetitions, args);

    let mut series: Vec<(String, Vec<f64>)> = comparison
        .iter()
        .map(|(name, result)| {
            let durations = result
                .as_ref()
                .map(|r| r.durations.clone())
                .unwrap_or_default();
            (name.clone(), durations)
        })
        .collect();
    series.sort_by(|a, b| {
        let av = mean_of(&a.1).unwrap_or(f64::INFINITY);
        let bv = mean_of(&b.1).unwrap_or(f64::INFINITY);
        av.total_cmp(&bv)
    });

    let svg = render_box_chart(
        CHART_TITLE,
        &subtitle,
        &series,
        config.visuals.width,
        config.visuals.height,
    );

    let columns = vec![
        "min (s)".to_string(),
        "median (s)".to_string(),
        "max (s)".to_string(),
    ];
    let rows: Vec<(String, Vec<Option<f64>>)> = series
        .iter()
        .map(|(name, durations)| {
            let mut sorted = durations.clone();
            sorted.sort_by(f64::total_cmp);
            let cells = if sorted.is_empty() {
                vec![None, None, None]
            } else {
                vec![
                    sorted.first().copied(),
                    Some(sorted[sorted.len() / 2]),
                    sorted.last().copied(),
                ]
            };
            (name.clone(), cells)
        })
        .collect();
    let html = render_cross_tab(CHART_TITLE, &columns, &rows);

    let document = comparison_document(duration_values(&comparison), &metadata)?;

    let reporter = Reporter::new(&config.output.directory, &config.output.png_converter);
    report_outcomes(reporter.persist_run(&svg, &html, &document))
}

/// Run a full cross-tab: every implementation against every checksum
/// algorithm, persisted as an HTML table and a JSON document.
///
/// Any `--` flags in the argument tail are stripped first; the table
/// injects one algorithm flag per comparison column itself.
pub fn table(
    registry: &Registry,
    config: &HarnessConfig,
    names: &str,
    repetitions: u32,
    args: &[String],
) -> anyhow::Result<()> {
    let mut base_args = Vec::new();
    for arg in args {
        if arg.starts_with("--") {
            println!("Removing argument '{arg}'");
        } else {
            base_args.push(arg.clone());
        }
    }

    let mut grid: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
    for algorithm in CHECKSUM_ALGORITHMS {
        println!();
        println!("===== Comparing with --{algorithm} =====");
        let mut algo_args = base_args.clone();
        algo_args.push(format!("--{algorithm}"));

        let comparison = bench::compare(registry, names, repetitions, &algo_args, false)?;
        for (name, result) in &comparison {
            grid.entry(name.clone())
                .or_insert_with(Vec::new)
                .push(result.as_ref().map(RunResult::mean));
        }
    }

    let languages: Vec<String> = grid.keys().cloned().collect();
    let metadata = RunMetadata::collect("table", languages, repetitions, &base_args);

    let columns: Vec<String> = CHECKSUM_ALGORITHMS
        .iter()
        .map(|a| a.to_string())
        .collect();
    let rows: Vec<(String, Vec<Option<f64>>)> = grid
        .iter()
        .map(|(name, cells)| (name.clone(), cells.clone()))
        .collect();
    let html = render_cross_tab(CHART_TITLE, &columns, &rows);

    let document = table_document(&grid, &metadata)?;

    let reporter = Reporter::new(&config.output.directory, &config.output.png_converter);
    report_outcomes(vec![
        reporter.persist_table(&html),
        reporter.persist_json(&document),
    ])
}

/// Assemble the JSON document for the cross-tab: per-implementation maps
/// of algorithm name to mean duration.
pub fn table_document(
    grid: &BTreeMap<String, Vec<Option<f64>>>,
    metadata: &RunMetadata,
) -> Result<BTreeMap<String, Value>, serde_json::Error> {
    let mut values = BTreeMap::new();
    for (name, cells) in grid {
        let mut per_algo = serde_json::Map::new();
        for (algorithm, cell) in CHECKSUM_ALGORITHMS.iter().zip(cells) {
            per_algo.insert(algorithm.to_string(), json!(cell));
        }
        values.insert(name.clone(), Value::Object(per_algo));
    }
    comparison_document(values, metadata)
}

fn mean_values(comparison: &Comparison) -> BTreeMap<String, Value> {
    comparison
        .iter()
        .map(|(name, result)| (name.clone(), json!(result.as_ref().map(RunResult::mean))))
        .collect()
}

fn duration_values(comparison: &Comparison) -> BTreeMap<String, Value> {
    comparison
        .iter()
        .map(|(name, result)| {
            let value = match result {
                Some(result) => json!(result.durations),
                None => Value::Null,
            };
            (name.clone(), value)
        })
        .collect()
}

fn mean_of(durations: &[f64]) -> Option<f64> {
    if durations.is_empty() {
        None
    } else {
        Some(durations.iter().sum::<f64>() / durations.len() as f64)
    }
}

fn report_outcomes(outcomes: Vec<RenderOutcome>) -> anyhow::Result<()> {
    println!();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(()) => println!("Saved {}: {}", outcome.kind, outcome.path.display()),
            Err(e) => failures.push(format!("{}: {}", outcome.kind, e)),
        }
    }

    if failures.is_empty() {
        println!("Done");
        Ok(())
    } else {
        for failure in &failures {
            eprintln!("Failed to save {failure}");
        }
        bail!("{} artifact(s) could not be saved", failures.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_document_keys_are_sorted() {
        let mut grid = BTreeMap::new();
        grid.insert("rust".to_string(), vec![Some(0.5); 5]);
        grid.insert("c".to_string(), vec![Some(0.4); 5]);
        let metadata = RunMetadata::collect("table", vec!["c".into(), "rust".into()], 5, &[]);

        let document = table_document(&grid, &metadata).unwrap();
        let keys: Vec<&String> = document.keys().collect();
        assert_eq!(keys, vec!["_metadata", "c", "rust"]);
        assert_eq!(document["_metadata"]["repetitions"], json!(5));
    }

    #[test]
    fn test_table_document_marks_failures_null() {
        let mut grid = BTreeMap::new();
        grid.insert("zig".to_string(), vec![Some(0.1), None, Some(0.3)]);
        let metadata = RunMetadata::collect("table", vec!["zig".into()], 1, &[]);

        let document = table_document(&grid, &metadata).unwrap();
        let zig = &document["zig"];
        assert_eq!(zig["md5"], json!(0.1));
        assert_eq!(zig["sha1"], Value::Null);
        assert_eq!(zig["sha256"], json!(0.3));
    }

    #[test]
    fn test_mean_of_empty_is_none() {
        assert_eq!(mean_of(&[]), None);
        assert_eq!(mean_of(&[2.0, 4.0]), Some(3.0));
    }
}
