//! Lifecycle descriptor loading and phase invocation.
//!
//! Every implementation directory carries a `lifecycle.toml` declaring its
//! setup/build/run commands as argv arrays:
//!
//! ```toml
//! [lifecycle]
//! setup = ["sh", "provision.sh"]
//! build = ["make", "release"]
//! run   = ["./checksum"]
//! artifact = "checksum"
//! ```
//!
//! An empty argv means the phase has not been implemented; loading such a
//! descriptor fails so an un-filled-in scaffold is visibly inert rather
//! than a silent no-op. Commands always execute with the implementation
//! directory as their working directory, passed explicitly to the child
//! process — the harness never mutates its own working directory.

use crate::error::{HarnessError, Phase};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Descriptor file name every implementation directory must carry.
pub const DESCRIPTOR_FILE: &str = "lifecycle.toml";

/// Idempotency marker: its presence means setup already completed.
pub const SETUP_MARKER: &str = "setup.log";

#[derive(Debug, Deserialize)]
struct Descriptor {
    #[serde(default)]
    lifecycle: PhaseTable,
}

#[derive(Debug, Default, Deserialize)]
struct PhaseTable {
    #[serde(default)]
    setup: Vec<String>,
    #[serde(default)]
    build: Vec<String>,
    #[serde(default)]
    run: Vec<String>,
    #[serde(default)]
    artifact: Option<String>,
}

/// The bound setup/build/run capability triplet of one implementation.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    name: String,
    directory: PathBuf,
    setup: Vec<String>,
    build: Vec<String>,
    run: Vec<String>,
    artifact: Option<String>,
}

impl Lifecycle {
    /// Load and validate the descriptor in `directory`.
    ///
    /// Fails with [`HarnessError::LifecycleNotImplemented`] if any phase
    /// is still the empty scaffold default.
    pub fn load(name: &str, directory: &Path) -> Result<Self, HarnessError> {
        let path = directory.join(DESCRIPTOR_FILE);
        let content = std::fs::read_to_string(&path)?;
        let descriptor: Descriptor =
            toml::from_str(&content).map_err(|e| HarnessError::BadDescriptor {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let table = descriptor.lifecycle;
        for (phase, argv) in [
            (Phase::Setup, &table.setup),
            (Phase::Build, &table.build),
            (Phase::Run, &table.run),
        ] {
            if argv.is_empty() {
                return Err(HarnessError::LifecycleNotImplemented {
                    name: name.to_string(),
                    phase,
                });
            }
        }

        Ok(Self {
            name: name.to_string(),
            directory: directory.to_path_buf(),
            setup: table.setup,
            build: table.build,
            run: table.run,
            artifact: table.artifact,
        })
    }

    /// Declared build artifact, relative to the implementation directory.
    pub fn artifact(&self) -> Option<&str> {
        self.artifact.as_deref()
    }

    /// Absolute path of the declared build artifact, if any.
    pub fn artifact_path(&self) -> Option<PathBuf> {
        self.artifact.as_ref().map(|a| self.directory.join(a))
    }

    /// Path of the setup marker for this implementation.
    pub fn marker_path(&self) -> PathBuf {
        self.directory.join(SETUP_MARKER)
    }

    /// Provision the environment, once.
    ///
    /// Skipped while the setup marker exists; on success a dated marker
    /// is written so the next invocation is a no-op.
    pub fn setup(&self) -> Result<(), HarnessError> {
        let marker = self.marker_path();
        if marker.exists() {
            tracing::debug!(name = %self.name, "setup marker present, skipping provision");
            return Ok(());
        }

        self.invoke(Phase::Setup, &self.setup, &[])?;

        let stamp = format!("setup completed {}\n", chrono::Utc::now().to_rfc3339());
        std::fs::write(&marker, stamp).map_err(|e| HarnessError::SetupFailure {
            name: self.name.clone(),
            reason: format!("could not write {}: {}", marker.display(), e),
        })?;
        Ok(())
    }

    /// Compile the implementation.
    ///
    /// Artifact presence is checked by the execution engine before the
    /// first run, not here: `do_setup`-style callers never build.
    pub fn build(&self) -> Result<(), HarnessError> {
        self.invoke(Phase::Build, &self.build, &[])
    }

    /// Launch the checksum program once with the caller's argument tail.
    pub fn run(&self, args: &[String]) -> Result<(), HarnessError> {
        self.invoke(Phase::Run, &self.run, args)
    }

    fn invoke(&self, phase: Phase, argv: &[String], extra: &[String]) -> Result<(), HarnessError> {
        let (program, rest) = argv
            .split_first()
            .ok_or_else(|| HarnessError::LifecycleNotImplemented {
                name: self.name.clone(),
                phase,
            })?;

        tracing::debug!(name = %self.name, %phase, %program, "invoking lifecycle phase");

        let status = Command::new(program)
            .args(rest)
            .args(extra)
            .current_dir(&self.directory)
            .status()
            .map_err(|e| self.phase_error(phase, format!("could not spawn '{}': {}", program, e)))?;

        if !status.success() {
            return Err(self.phase_error(phase, format!("exit status {}", status)));
        }
        Ok(())
    }

    fn phase_error(&self, phase: Phase, reason: String) -> HarnessError {
        let name = self.name.clone();
        match phase {
            Phase::Setup => HarnessError::SetupFailure { name, reason },
            Phase::Build => HarnessError::BuildFailure { name, reason },
            Phase::Run => HarnessError::RunFailure { name, reason },
        }
    }
}
