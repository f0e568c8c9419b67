//! Industry presets: named signal catalogs stored as `<name>.json` files.

use crate::signals::SignalCatalog;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const PRESET_EXTENSION: &str = "json";

/// A named, self-describing signal configuration for one industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default = "unknown_industry")]
    pub industry: String,
    #[serde(default)]
    pub description: String,
    pub signals: SignalCatalog,
    #[serde(default)]
    pub example_companies: Vec<String>,
    #[serde(default)]
    pub typical_use_case: String,
}

fn unknown_industry() -> String {
    "Unknown".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetInfo {
    pub name: String,
    pub industry: String,
    pub description: String,
    pub signal_count: usize,
    pub example_companies: Vec<String>,
    pub typical_use_case: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetSummary {
    pub name: String,
    pub industry: String,
    pub signals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetComparison {
    pub first: PresetSummary,
    pub second: PresetSummary,
}

impl PresetComparison {
    /// Signal groups defined by both presets, in the first preset's order.
    pub fn shared_signals(&self) -> Vec<&str> {
        self.first
            .signals
            .iter()
            .filter(|name| self.second.signals.contains(name))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("preset '{name}' not found. Available presets: {}", .available.join(", "))]
    NotFound { name: String, available: Vec<String> },
    #[error("failed to read presets from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("preset '{name}' is malformed: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads presets from a directory. Each load yields an independent value;
/// nothing is cached or shared between runs.
#[derive(Debug, Clone)]
pub struct PresetLoader {
    dir: PathBuf,
}

impl PresetLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Sorted preset names (file stems). A missing directory has no presets.
    pub fn list(&self) -> Result<Vec<String>, PresetError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PresetError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| PresetError::Io {
                    path: self.dir.clone(),
                    source,
                })?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PRESET_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    /// Loads `name` (with or without a trailing `.json`).
    pub fn load(&self, name: &str) -> Result<Preset, PresetError> {
        let stem = name.strip_suffix(".json").unwrap_or(name);
        let path = self.dir.join(format!("{stem}.{PRESET_EXTENSION}"));

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(PresetError::NotFound {
                    name: stem.to_string(),
                    available: self.list()?,
                })
            }
            Err(source) => return Err(PresetError::Io { path, source }),
        };

        let preset: Preset =
            serde_json::from_str(&raw).map_err(|source| PresetError::Malformed {
                name: stem.to_string(),
                source,
            })?;

        debug!(
            preset = stem,
            industry = %preset.industry,
            signals = preset.signals.len(),
            "loaded preset"
        );
        Ok(preset)
    }

    pub fn info(&self, name: &str) -> Result<PresetInfo, PresetError> {
        let preset = self.load(name)?;
        Ok(PresetInfo {
            name: name.strip_suffix(".json").unwrap_or(name).to_string(),
            industry: preset.industry,
            description: preset.description,
            signal_count: preset.signals.len(),
            example_companies: preset.example_companies,
            typical_use_case: preset.typical_use_case,
        })
    }

    pub fn compare(&self, first: &str, second: &str) -> Result<PresetComparison, PresetError> {
        Ok(PresetComparison {
            first: self.summary(first)?,
            second: self.summary(second)?,
        })
    }

    fn summary(&self, name: &str) -> Result<PresetSummary, PresetError> {
        let preset = self.load(name)?;
        Ok(PresetSummary {
            name: name.strip_suffix(".json").unwrap_or(name).to_string(),
            industry: preset.industry,
            signals: preset
                .signals
                .groups()
                .iter()
                .map(|group| group.name.clone())
                .collect(),
        })
    }
}
