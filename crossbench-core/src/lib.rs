#![warn(missing_docs)]
//! Crossbench Core - Implementation Registry & Lifecycle
//!
//! This crate provides the discovery and binding layer of the harness:
//! - `Registry` locates implementations by filesystem convention
//! - `Lifecycle` binds the setup/build/run capability triplet from a
//!   `lifecycle.toml` descriptor
//! - scaffolding (`init`) and setup-marker maintenance (`clean`)
//! - the shared `HarnessError` taxonomy

mod error;
mod lifecycle;
mod registry;
mod scaffold;

pub use error::{HarnessError, Phase};
pub use lifecycle::{Lifecycle, DESCRIPTOR_FILE, SETUP_MARKER};
pub use registry::{Registry, WILDCARD};
pub use scaffold::{init, remove_setup_marker};

use std::path::PathBuf;

/// A discovered implementation bound to its lifecycle.
///
/// Uniquely identified by name within one command invocation; the
/// directory is the sole source of truth for capability resolution.
/// Immutable after discovery.
#[derive(Debug, Clone)]
pub struct Implementation {
    /// Registry name (relative directory path).
    pub name: String,
    /// Directory every lifecycle phase executes in.
    pub directory: PathBuf,
    /// The bound setup/build/run triplet.
    pub lifecycle: Lifecycle,
}
