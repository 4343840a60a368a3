//! Configuration phase: manifest resolution and verbatim file downloads.

use std::fs::File;
use std::path::Path;

use crate::domain::{AppError, MANIFEST_FILE, Manifest, RemoteLocation};
use crate::ports::ObjectStore;

/// Decide which manifest governs this run.
///
/// Probes `<config-source>/manifest.json`; when it exists the remote document
/// is fetched and used verbatim, otherwise the static fallback file is read.
/// Only a true not-found steers to the fallback — any other probe failure,
/// and any failure reading either manifest, is fatal. There is no third
/// fallback.
pub fn resolve_manifest<S: ObjectStore>(
    store: &S,
    config_location: &RemoteLocation,
    static_manifest: &Path,
) -> Result<Manifest, AppError> {
    let dynamic = config_location.child(&[MANIFEST_FILE]);

    if store.exists(&dynamic)? {
        return Manifest::from_value(store.fetch_json(&dynamic)?);
    }

    Manifest::from_reader(File::open(static_manifest)?)
}

/// Fetch one configuration file into `<working-dir>/<directory>/<filename>`.
///
/// Files transfer verbatim; the destination directory must already exist.
pub fn download_file<S: ObjectStore>(
    store: &S,
    config_location: &RemoteLocation,
    filename: &str,
    directory: &str,
    working_dir: &Path,
) -> Result<(), AppError> {
    let target = working_dir.join(directory).join(filename);
    let source = config_location.child(&[filename]);

    let mut out = File::create(&target)?;
    store.fetch(&source, &mut out)?;

    Ok(())
}

/// Download every manifest entry. The first failure aborts the rest.
pub fn sync_all<S: ObjectStore>(
    store: &S,
    manifest: &Manifest,
    config_location: &RemoteLocation,
    working_dir: &Path,
) -> Result<(), AppError> {
    for (filename, directory) in manifest.entries() {
        download_file(store, config_location, filename, directory, working_dir)?;
    }

    Ok(())
}
