//! Scaffolding new implementations and resetting setup state.

use crate::error::HarnessError;
use crate::lifecycle::{DESCRIPTOR_FILE, SETUP_MARKER};
use std::path::{Path, PathBuf};

const SCAFFOLD: &str = r#"# Lifecycle descriptor for a crossbench implementation.
#
# Each phase is an argv array executed inside this directory. All three
# phases must be filled in before the harness will run this
# implementation.

[lifecycle]
# Provision toolchains and dependencies. Runs once; skipped while
# setup.log exists (`crossbench clean <name>` forces re-provisioning).
setup = []

# Compile the implementation. Declare `artifact` below so the harness
# can confirm the build produced something runnable.
build = []

# Launch the checksum program. The harness appends the run arguments.
run = []

# artifact = "path/to/binary"
"#;

/// Scaffold a new implementation directory with an inert descriptor.
///
/// The scaffold's phases are all empty, so loading it fails with
/// `LifecycleNotImplemented` until each one is filled in. Refuses to
/// overwrite an existing descriptor and rejects names containing `,`
/// (they would break comma-separated selection lists).
pub fn init(root: &Path, name: &str) -> Result<PathBuf, HarnessError> {
    if name.contains(',') {
        return Err(HarnessError::InvalidName(name.to_string()));
    }

    let directory = root.join(name);
    std::fs::create_dir_all(&directory)?;

    let descriptor = directory.join(DESCRIPTOR_FILE);
    if descriptor.exists() {
        return Err(HarnessError::AlreadyScaffolded(name.to_string()));
    }

    std::fs::write(&descriptor, SCAFFOLD)?;
    Ok(descriptor)
}

/// Remove the setup marker from `directory`, forcing re-setup.
///
/// Returns whether a marker was actually present; a missing marker is
/// reported, never an error.
pub fn remove_setup_marker(directory: &Path) -> Result<bool, HarnessError> {
    let marker = directory.join(SETUP_MARKER);
    if marker.exists() {
        std::fs::remove_file(&marker)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Lifecycle;
    use crate::error::Phase;

    #[test]
    fn scaffold_is_visibly_inert() {
        let tmp = tempfile::tempdir().unwrap();
        init(tmp.path(), "foo").unwrap();

        let err = Lifecycle::load("foo", &tmp.path().join("foo")).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::LifecycleNotImplemented {
                phase: Phase::Setup,
                ..
            }
        ));
    }

    #[test]
    fn init_refuses_commas_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();

        assert!(matches!(
            init(tmp.path(), "a,b").unwrap_err(),
            HarnessError::InvalidName(_)
        ));

        init(tmp.path(), "foo").unwrap();
        assert!(matches!(
            init(tmp.path(), "foo").unwrap_err(),
            HarnessError::AlreadyScaffolded(_)
        ));
    }

    #[test]
    fn marker_removal_reports_presence() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(SETUP_MARKER), "setup completed\n").unwrap();

        assert!(remove_setup_marker(tmp.path()).unwrap());
        assert!(!remove_setup_marker(tmp.path()).unwrap());
    }
}
