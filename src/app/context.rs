use std::path::{Path, PathBuf};

use crate::domain::{AppError, MANIFEST_FILE, RemoteLocation};
use crate::ports::ObjectStore;

const MAPS_DIR: &str = "maps";

/// Per-run context: the two optional source locations, local directories,
/// and the object-store client shared read-only by every phase.
///
/// Built once at startup from parsed arguments; nothing here changes for the
/// rest of the run and nothing persists across runs.
pub struct RuntimeContext<S: ObjectStore> {
    map_location: Option<RemoteLocation>,
    config_location: Option<RemoteLocation>,
    working_dir: PathBuf,
    home_dir: PathBuf,
    store: S,
}

impl<S: ObjectStore> RuntimeContext<S> {
    /// Create a context from the operator-supplied addresses.
    ///
    /// Unparsable or missing addresses yield an absent location, which the
    /// orchestrator reports as a skipped phase rather than a failure.
    pub fn from_addresses(
        maps: Option<&str>,
        config: Option<&str>,
        store: S,
    ) -> Result<Self, AppError> {
        let working_dir = std::env::current_dir()?;
        let home_dir = dirs::home_dir()
            .ok_or_else(|| AppError::config_error("Could not determine home directory"))?;

        Ok(Self::new(
            maps.and_then(RemoteLocation::parse),
            config.and_then(RemoteLocation::parse),
            working_dir,
            home_dir,
            store,
        ))
    }

    pub fn new(
        map_location: Option<RemoteLocation>,
        config_location: Option<RemoteLocation>,
        working_dir: PathBuf,
        home_dir: PathBuf,
        store: S,
    ) -> Self {
        Self { map_location, config_location, working_dir, home_dir, store }
    }

    pub fn map_location(&self) -> Option<&RemoteLocation> {
        self.map_location.as_ref()
    }

    pub fn config_location(&self) -> Option<&RemoteLocation> {
        self.config_location.as_ref()
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `<working-dir>/maps`, the decompressed map destination.
    pub fn map_dir(&self) -> PathBuf {
        self.working_dir.join(MAPS_DIR)
    }

    /// `~/manifest.json`, the static fallback manifest shipped with the
    /// deployment.
    pub fn static_manifest_path(&self) -> PathBuf {
        self.home_dir.join(MANIFEST_FILE)
    }
}
