//! Classpath manifest resolution and verification.
//!
//! The manifest is injected from configuration so the shim does not
//! hard-code jar versions. Resolution joins relative entries onto the
//! installation root; verification checks every entry exists before any
//! process is launched.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use transform_core::config::tool::ToolConfig;

use crate::error::ConversionError;

/// Ordered, de-duplicated list of required libraries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClasspathManifest {
    entries: Vec<PathBuf>,
}

impl ClasspathManifest {
    /// Build a manifest. Duplicate entries are dropped, keeping the first.
    pub fn new<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut unique: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.into();
            if !unique.contains(&entry) {
                unique.push(entry);
            }
        }
        Self { entries: unique }
    }

    /// Manifest entries as configured.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Resolve against an installation root.
    pub fn resolve(&self, root: &Path) -> Classpath {
        Classpath {
            entries: self.entries.iter().map(|e| root.join(e)).collect(),
        }
    }
}

impl From<&ToolConfig> for ClasspathManifest {
    fn from(config: &ToolConfig) -> Self {
        Self::new(config.classpath.iter().cloned())
    }
}

/// A manifest resolved to concrete filesystem paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classpath {
    entries: Vec<PathBuf>,
}

impl Classpath {
    /// Resolved library paths, in manifest order.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Every entry that does not exist on disk.
    pub fn missing(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter(|p| !p.exists())
            .cloned()
            .collect()
    }

    /// Fail with every missing library if any entry is absent.
    pub fn verify(&self) -> Result<(), ConversionError> {
        let missing = self.missing();
        if missing.is_empty() {
            debug!(count = self.entries.len(), "Classpath verified");
            return Ok(());
        }

        for path in &missing {
            warn!(path = %path.display(), "Classpath library not found");
        }
        Err(ConversionError::MissingDependencies { missing })
    }

    /// Join entries with the platform path separator.
    pub fn joined(&self) -> Result<OsString, ConversionError> {
        std::env::join_paths(&self.entries).map_err(|_| {
            let path = self
                .entries
                .iter()
                .find(|p| std::env::join_paths([p]).is_err())
                .cloned()
                .unwrap_or_default();
            ConversionError::InvalidClasspathEntry { path }
        })
    }
}
