#![warn(missing_docs)]
//! Crossbench Report - Result Model & Persisted Artifacts
//!
//! Turns an aggregated comparison into persisted artifacts:
//! - SVG chart (horizontal mean-bar or box/whisker distribution)
//! - PNG snapshot (best-effort, via an external converter)
//! - HTML cross-tab table
//! - JSON document with sorted keys and a `_metadata` provenance block
//!
//! Every persistence step is an independent task producing a
//! [`RenderOutcome`]; one failed format never blocks its siblings.

mod chart;
mod json;
mod metadata;
mod persist;
mod result;
mod table;

pub use chart::{render_bar_chart, render_box_chart};
pub use json::{comparison_document, render_json};
pub use metadata::{collect_dir_stats, human_size, title_info, DirStats, RunMetadata};
pub use persist::{ArtifactKind, RenderError, RenderOutcome, Reporter};
pub use result::{round3, RunResult};
pub use table::render_cross_tab;
