//! Output equivalence checking
//!
//! A candidate implementation is verified by running it and the baseline
//! implementation over the same inputs, then diffing the report files
//! each one wrote into its own directory. The reports are expected to
//! match except for a bounded amount of known noise: up to two
//! conflicting lines, all of which must start with the report header
//! token (the header carries a timestamp), and up to two inserted lines,
//! all of which must be blank (trailing-newline differences).

use crate::config::VerifyConfig;
use crate::engine;
use crossbench_core::{HarnessError, Registry};
use similar::{ChangeTag, DiffTag, TextDiff};
use tracing::debug;

/// Run the baseline and the candidate, then diff their report files.
pub fn verify(
    registry: &Registry,
    config: &VerifyConfig,
    name: &str,
    args: &[String],
) -> Result<(), HarnessError> {
    let baseline = registry.load(&config.baseline)?;
    let candidate = registry.load(name)?;

    println!("Running baseline implementation '{}'", baseline.name);
    engine::run_lifecycle(&baseline, args, 1)?;
    println!();
    println!("Running candidate implementation '{}'", candidate.name);
    engine::run_lifecycle(&candidate, args, 1)?;

    let baseline_report = baseline.directory.join(&config.artifact);
    let candidate_report = candidate.directory.join(&config.artifact);
    let baseline_text = std::fs::read_to_string(&baseline_report)?;
    let candidate_text = std::fs::read_to_string(&candidate_report)?;

    check_equivalence(name, &baseline_text, &candidate_text, &config.header_token)?;

    println!();
    println!("'{name}' meets the implementation criteria");
    Ok(())
}

/// Classify the diff between two report files and apply the tolerance
/// policy.
pub fn check_equivalence(
    name: &str,
    baseline: &str,
    candidate: &str,
    header_token: &str,
) -> Result<(), HarnessError> {
    let diff = TextDiff::from_lines(baseline, candidate);

    // Only the trailing newline is stripped: a whitespace-only added
    // line is a content difference, not a blank line.
    let strip_newline = |line: &str| line.strip_suffix('\n').unwrap_or(line).to_string();

    let mut conflicting: Vec<String> = Vec::new();
    let mut added: Vec<String> = Vec::new();

    for op in diff.ops() {
        match op.tag() {
            DiffTag::Replace => {
                for change in diff.iter_changes(op) {
                    if change.tag() != ChangeTag::Equal {
                        conflicting.push(strip_newline(change.value()));
                    }
                }
            }
            DiffTag::Insert => {
                for change in diff.iter_changes(op) {
                    if change.tag() == ChangeTag::Insert {
                        added.push(strip_newline(change.value()));
                    }
                }
            }
            DiffTag::Delete | DiffTag::Equal => {}
        }
    }

    debug!(
        implementation = %name,
        conflicting = conflicting.len(),
        added = added.len(),
        "diff classified"
    );

    let mut reasons = Vec::new();
    if conflicting.len() > 2 || conflicting.iter().any(|l| !l.starts_with(header_token)) {
        reasons.push("more than one conflicting line found (other than the report header)");
    }
    if added.len() > 2 || added.iter().any(|l| !l.is_empty()) {
        reasons.push("additional lines of difference are not newlines");
    }

    if reasons.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::VerificationFailure {
            name: name.to_string(),
            reason: reasons.join("; "),
        })
    }
}
