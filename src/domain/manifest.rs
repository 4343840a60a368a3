use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use crate::domain::AppError;

/// Well-known manifest name, both remotely and for the static fallback.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Mapping from configuration filename to destination directory.
///
/// Exactly one manifest governs a run's configuration sync: the dynamic one
/// found under the configuration location, or the static fallback bundled at
/// `~/manifest.json`. Content is trusted as-is; the only validation is that
/// it parses as a JSON object of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Manifest(BTreeMap<String, String>);

impl Manifest {
    /// Parse from an already-fetched JSON document.
    pub fn from_value(value: serde_json::Value) -> Result<Self, AppError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse from a local reader (the static fallback file).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AppError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// (filename, directory) pairs in deterministic order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(file, dir)| (file.as_str(), dir.as_str()))
    }
}
