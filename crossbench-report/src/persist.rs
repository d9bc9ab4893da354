//! Best-effort artifact persistence.
//!
//! Each output format is an independent task producing a
//! [`RenderOutcome`]; callers aggregate the outcomes and report all
//! failures together instead of aborting on the first one.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Why a single artifact failed to persist.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The artifact file could not be written.
    #[error("could not write {path}: {source}")]
    Write {
        /// Target path.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The external SVG-to-PNG converter failed or is unavailable.
    #[error("PNG converter '{converter}' failed: {reason}")]
    PngConvert {
        /// Converter program name.
        converter: String,
        /// Exit status or spawn error.
        reason: String,
    },

    /// The converter has no chart to work from.
    #[error("no chart was written, nothing to convert to PNG")]
    NoChart,

    /// JSON encoding failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// The artifact formats a run can persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// SVG chart (mean-bar or distribution).
    Chart,
    /// PNG snapshot of the chart.
    Png,
    /// HTML cross-tab table.
    Table,
    /// JSON document with sorted keys.
    Json,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ArtifactKind::Chart => "chart",
            ArtifactKind::Png => "PNG snapshot",
            ArtifactKind::Table => "results table",
            ArtifactKind::Json => "JSON data",
        };
        f.write_str(name)
    }
}

/// Result of one independent persistence attempt.
#[derive(Debug)]
pub struct RenderOutcome {
    /// Which format was attempted.
    pub kind: ArtifactKind,
    /// Where the artifact was (or would have been) written.
    pub path: PathBuf,
    /// Success, or why this format failed.
    pub result: Result<(), RenderError>,
}

/// Writes timestamp-prefixed artifacts into the results directory.
pub struct Reporter {
    results_dir: PathBuf,
    timestamp: String,
    png_converter: String,
}

impl Reporter {
    /// Reporter stamping artifacts with the current UTC time.
    pub fn new(results_dir: impl Into<PathBuf>, png_converter: impl Into<String>) -> Self {
        let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%S").to_string();
        Self::with_timestamp(results_dir, png_converter, timestamp)
    }

    /// Reporter with an explicit timestamp (tests).
    pub fn with_timestamp(
        results_dir: impl Into<PathBuf>,
        png_converter: impl Into<String>,
        timestamp: String,
    ) -> Self {
        Self {
            results_dir: results_dir.into(),
            timestamp,
            png_converter: png_converter.into(),
        }
    }

    fn artifact_path(&self, extension: &str) -> PathBuf {
        self.results_dir
            .join(format!("{}-Results.{}", self.timestamp, extension))
    }

    fn write_artifact(&self, kind: ArtifactKind, extension: &str, content: &str) -> RenderOutcome {
        let path = self.artifact_path(extension);
        let result = std::fs::create_dir_all(&self.results_dir)
            .and_then(|_| std::fs::write(&path, content))
            .map_err(|source| RenderError::Write {
                path: path.display().to_string(),
                source,
            });
        tracing::debug!(%kind, path = %path.display(), ok = result.is_ok(), "artifact persisted");
        RenderOutcome { kind, path, result }
    }

    /// Persist the SVG chart.
    pub fn persist_chart(&self, svg: &str) -> RenderOutcome {
        self.write_artifact(ArtifactKind::Chart, "svg", svg)
    }

    /// Persist the HTML cross-tab table.
    pub fn persist_table(&self, html: &str) -> RenderOutcome {
        self.write_artifact(ArtifactKind::Table, "html", html)
    }

    /// Persist the JSON snapshot.
    pub fn persist_json(&self, document: &BTreeMap<String, Value>) -> RenderOutcome {
        match crate::json::render_json(document) {
            Ok(rendered) => self.write_artifact(ArtifactKind::Json, "json", &rendered),
            Err(e) => RenderOutcome {
                kind: ArtifactKind::Json,
                path: self.artifact_path("json"),
                result: Err(RenderError::Json(e)),
            },
        }
    }

    /// Convert the persisted SVG chart to PNG via the external converter.
    ///
    /// Expected to fail gracefully where the converter is not installed;
    /// the outcome records the failure and siblings are unaffected.
    pub fn persist_png(&self) -> RenderOutcome {
        let svg_path = self.artifact_path("svg");
        let png_path = self.artifact_path("png");
        let result = convert_png(&self.png_converter, &svg_path, &png_path);
        RenderOutcome {
            kind: ArtifactKind::Png,
            path: png_path,
            result,
        }
    }

    /// Persist the full artifact set for one chart-bearing run:
    /// chart, PNG snapshot, HTML table, JSON snapshot — each attempted
    /// independently.
    pub fn persist_run(
        &self,
        svg: &str,
        html: &str,
        document: &BTreeMap<String, Value>,
    ) -> Vec<RenderOutcome> {
        vec![
            self.persist_chart(svg),
            self.persist_png(),
            self.persist_table(html),
            self.persist_json(document),
        ]
    }
}

fn convert_png(converter: &str, svg_path: &Path, png_path: &Path) -> Result<(), RenderError> {
    if !svg_path.exists() {
        return Err(RenderError::NoChart);
    }

    let output = Command::new(converter)
        .arg(svg_path)
        .arg("--output")
        .arg(png_path)
        .output()
        .map_err(|e| RenderError::PngConvert {
            converter: converter.to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(RenderError::PngConvert {
            converter: converter.to_string(),
            reason: format!(
                "exit status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::RunMetadata;
    use serde_json::json;

    fn reporter(dir: &Path) -> Reporter {
        Reporter::with_timestamp(dir, "definitely-missing-converter", "20240101T120000".into())
    }

    #[test]
    fn artifacts_are_timestamp_prefixed() {
        let tmp = tempfile::tempdir().unwrap();
        let reporter = reporter(tmp.path());

        let outcome = reporter.persist_chart("<svg></svg>");
        assert!(outcome.result.is_ok());
        assert!(tmp.path().join("20240101T120000-Results.svg").exists());
    }

    #[test]
    fn png_failure_does_not_block_siblings() {
        let tmp = tempfile::tempdir().unwrap();
        let reporter = reporter(tmp.path());

        let mut values = BTreeMap::new();
        values.insert("c".to_string(), json!(0.25));
        let metadata = RunMetadata::collect("plot", vec!["c".into()], 1, &[]);
        let document = crate::json::comparison_document(values, &metadata).unwrap();

        let outcomes = reporter.persist_run("<svg></svg>", "<html></html>", &document);
        assert_eq!(outcomes.len(), 4);

        let failures: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();
        assert_eq!(failures.len(), 1, "only the PNG conversion should fail");
        assert_eq!(failures[0].kind, ArtifactKind::Png);

        assert!(tmp.path().join("20240101T120000-Results.html").exists());
        assert!(tmp.path().join("20240101T120000-Results.json").exists());
    }

    #[test]
    fn results_directory_is_created_on_demand() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("Results");
        let reporter = reporter(&nested);

        assert!(reporter.persist_table("<html></html>").result.is_ok());
        assert!(nested.exists());
    }
}
