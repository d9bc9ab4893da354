//! Implementation discovery and name resolution.
//!
//! An implementation is any directory under the registry root containing
//! a `lifecycle.toml` descriptor. Discovery returns names sorted for
//! deterministic listing; execution order is the caller's concern.

use crate::error::HarnessError;
use crate::lifecycle::{Lifecycle, DESCRIPTOR_FILE};
use crate::Implementation;
use std::path::{Path, PathBuf};

/// Wildcard name expanding to every discovered implementation.
pub const WILDCARD: &str = "all";

/// Resolves implementation names to directories under one root.
#[derive(Debug, Clone)]
pub struct Registry {
    root: PathBuf,
}

impl Registry {
    /// Registry rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Registry rooted at the process working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// The registry root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and return every implementation name, sorted.
    ///
    /// Names are root-relative paths with `/` separators. Hidden
    /// directories are skipped.
    pub fn discover(&self) -> Vec<String> {
        let mut found = Vec::new();
        collect(&self.root, &self.root, &mut found);
        found.sort();
        found
    }

    /// Resolve a name to its directory.
    ///
    /// Fails with [`HarnessError::ImplementationNotFound`] before any
    /// child process is spawned.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, HarnessError> {
        let directory = self.root.join(name);
        if directory.join(DESCRIPTOR_FILE).is_file() {
            Ok(directory)
        } else {
            Err(HarnessError::ImplementationNotFound(name.to_string()))
        }
    }

    /// Resolve a name and bind its lifecycle.
    pub fn load(&self, name: &str) -> Result<Implementation, HarnessError> {
        let directory = self.resolve(name)?;
        let lifecycle = Lifecycle::load(name, &directory)?;
        Ok(Implementation {
            name: name.to_string(),
            directory,
            lifecycle,
        })
    }

    /// Expand a comma-separated name list, or the `all` wildcard.
    ///
    /// Explicit names are validated up front so an unknown name fails
    /// the whole selection before anything runs; the valid set is
    /// printed alongside the error so the user sees what they could
    /// have asked for. The wildcard trusts discovery. Returns names in
    /// the order supplied (discovery order for `all`) along with
    /// whether the wildcard was used.
    pub fn select(&self, names: &str) -> Result<(Vec<String>, bool), HarnessError> {
        let requested: Vec<String> = names.split(',').map(|s| s.trim().to_string()).collect();
        if requested.len() == 1 && requested[0] == WILDCARD {
            return Ok((self.discover(), true));
        }

        for name in &requested {
            if let Err(e) = self.resolve(name) {
                eprintln!("{}", self.listing());
                return Err(e);
            }
        }
        Ok((requested, false))
    }

    /// One-line listing of every valid implementation, shown when an
    /// explicit selection names an unknown one.
    fn listing(&self) -> String {
        format!("Languages: {}", self.discover().join(", "))
    }
}

fn collect(dir: &Path, root: &Path, found: &mut Vec<String>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name.starts_with('.') {
            continue;
        }

        if path.join(DESCRIPTOR_FILE).is_file() {
            if let Ok(relative) = path.strip_prefix(root) {
                let name = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                found.push(name);
            }
        }
        collect(&path, root, found);
    }
}
