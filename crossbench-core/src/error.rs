//! Harness error taxonomy.

use thiserror::Error;

/// The three lifecycle phases every implementation must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Environment provisioning, guarded by the setup marker.
    Setup,
    /// Compilation; expected to leave a build artifact.
    Build,
    /// One timed invocation of the checksum program.
    Run,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Build => "build",
            Phase::Run => "run",
        };
        f.write_str(name)
    }
}

/// Everything that can go wrong inside the harness.
///
/// Single-target commands let these bubble up to the dispatcher, which
/// prints the diagnostic followed by the help banner. Batch commands
/// (`do_setup`, `compare`, `plot`, `boxplot`, `table`) catch them at the
/// per-implementation boundary and record a null entry instead.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// No directory with a lifecycle descriptor under that name.
    #[error("'{0}' is not a valid implementation")]
    ImplementationNotFound(String),

    /// The scaffold has not been filled in for this phase.
    #[error("'{name}' does not implement '{phase}'; fill in its lifecycle.toml")]
    LifecycleNotImplemented {
        /// Implementation name.
        name: String,
        /// The missing phase.
        phase: Phase,
    },

    /// Implementation names feed comma-separated lists, so they may not
    /// contain commas themselves.
    #[error("cannot have ',' in the implementation name '{0}'")]
    InvalidName(String),

    /// `init` refuses to clobber an existing descriptor.
    #[error("'{0}' already has a lifecycle.toml")]
    AlreadyScaffolded(String),

    /// The descriptor exists but could not be parsed.
    #[error("invalid lifecycle descriptor for '{name}': {reason}")]
    BadDescriptor {
        /// Implementation name.
        name: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The setup child process failed or could not be spawned.
    #[error("setup failed for '{name}': {reason}")]
    SetupFailure {
        /// Implementation name.
        name: String,
        /// Exit status or spawn error.
        reason: String,
    },

    /// The build child process failed, or left no artifact behind.
    #[error("build failed for '{name}': {reason}")]
    BuildFailure {
        /// Implementation name.
        name: String,
        /// Exit status, spawn error, or missing-artifact note.
        reason: String,
    },

    /// A run repetition exited non-zero (or could not be spawned).
    #[error("run failed for '{name}': {reason}")]
    RunFailure {
        /// Implementation name.
        name: String,
        /// Exit status or spawn error.
        reason: String,
    },

    /// The tolerant-diff oracle rejected the candidate's output.
    #[error("'{name}' verification failure: {reason}")]
    VerificationFailure {
        /// Candidate implementation name.
        name: String,
        /// Which diff category exceeded tolerance.
        reason: String,
    },

    /// Filesystem-level failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
