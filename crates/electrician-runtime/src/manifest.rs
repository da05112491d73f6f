//! # System Manifest
//!
//! JSON description of a system of echo components.
//!
//! ```json
//! {
//!   "components": [
//!     { "name": "A" },
//!     { "name": "B", "depends_on": ["A", "C"] },
//!     { "name": "C", "depends_on": ["A"], "fail_on_stop": "disk full" }
//!   ]
//! }
//! ```
//!
//! Unknown dependency names and cycles are not checked here; they surface
//! from the orchestrator when the system starts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest loading errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Component at position {index} has an empty name")]
    EmptyName { index: usize },

    #[error("Component {name} is declared more than once")]
    DuplicateName { name: String },
}

/// One component entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentSpec {
    pub name: String,

    /// Dependencies injected into start, in order.
    #[serde(default)]
    pub depends_on: Vec<String>,

    /// Whether the component has a start operation.
    #[serde(default = "enabled")]
    pub start: bool,

    /// Whether the component has a stop operation.
    #[serde(default = "enabled")]
    pub stop: bool,

    /// Simulated start latency.
    #[serde(default)]
    pub start_delay_ms: u64,

    /// Make start fail with this message.
    #[serde(default)]
    pub fail_on_start: Option<String>,

    /// Make stop fail with this message.
    #[serde(default)]
    pub fail_on_stop: Option<String>,
}

fn enabled() -> bool {
    true
}

impl ComponentSpec {
    /// Component with start and stop and no dependencies.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depends_on: Vec::new(),
            start: true,
            stop: true,
            start_delay_ms: 0,
            fail_on_start: None,
            fail_on_stop: None,
        }
    }

    pub fn depends_on<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = dependencies.into_iter().map(Into::into).collect();
        self
    }
}

/// A whole system, components in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemManifest {
    pub components: Vec<ComponentSpec>,
}

impl SystemManifest {
    /// Parse and validate a manifest.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read, parse and validate a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check that names are non-empty and unique.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::with_capacity(self.components.len());
        for (index, component) in self.components.iter().enumerate() {
            if component.name.trim().is_empty() {
                return Err(ManifestError::EmptyName { index });
            }
            if !seen.insert(component.name.as_str()) {
                return Err(ManifestError::DuplicateName {
                    name: component.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// The four-component example: B needs A and C, C needs A, D needs C.
    pub fn basic() -> Self {
        Self {
            components: vec![
                ComponentSpec::new("A"),
                ComponentSpec::new("B").depends_on(["A", "C"]),
                ComponentSpec::new("C").depends_on(["A"]),
                ComponentSpec::new("D").depends_on(["C"]),
            ],
        }
    }
}
