//! Maps phase: enumerate remote map archives, download, decompress.

use std::fs::File;
use std::io;
use std::path::Path;

use bzip2::read::BzDecoder;

use crate::domain::{AppError, RemoteLocation, RemoteObject};
use crate::ports::ObjectStore;

/// Suffix selecting map archives out of a listing.
pub const MAP_ARCHIVE_SUFFIX: &str = ".bsp.bz2";

const ARCHIVE_EXTENSION: &str = ".bz2";

/// Lazily enumerate the map archives under the location's prefix.
///
/// Pagination stays inside the listing; this only filters. Errors from the
/// listing pass through so the caller aborts on them.
pub fn enumerate<'a, S: ObjectStore>(
    store: &'a S,
    location: &RemoteLocation,
) -> impl Iterator<Item = Result<RemoteObject, AppError>> + 'a {
    store.list(location).filter(|entry| {
        entry.as_ref().map(|object| object.key().ends_with(MAP_ARCHIVE_SUFFIX)).unwrap_or(true)
    })
}

/// Download one archive into the scratch area, then decompress it into the
/// map directory, stripping the `.bz2` suffix (`a.bsp` from `a.bsp.bz2`).
///
/// Existing files of the same name are overwritten.
pub fn download<S: ObjectStore>(
    store: &S,
    object: &RemoteObject,
    scratch_dir: &Path,
    map_dir: &Path,
) -> Result<(), AppError> {
    let archive_name = object.base_name();
    let archive_path = scratch_dir.join(archive_name);
    let map_name = archive_name.strip_suffix(ARCHIVE_EXTENSION).unwrap_or(archive_name);
    let map_path = map_dir.join(map_name);

    {
        let mut archive = File::create(&archive_path)?;
        store.fetch(&object.location(), &mut archive)?;
    }

    let mut decoder = BzDecoder::new(File::open(&archive_path)?);
    let mut map_file = File::create(&map_path)?;
    io::copy(&mut decoder, &mut map_file).map_err(|e| AppError::Decompress {
        archive: archive_name.to_string(),
        details: e.to_string(),
    })?;

    Ok(())
}

/// Sequentially download every map archive under the location.
///
/// The scratch area lives for exactly this phase; `TempDir` removes it and
/// everything in it on every exit path, including a failure mid-loop. The
/// first failure aborts the run.
pub fn sync_all<S: ObjectStore>(
    store: &S,
    location: &RemoteLocation,
    map_dir: &Path,
) -> Result<(), AppError> {
    sync_all_in(store, location, map_dir, &std::env::temp_dir())
}

fn sync_all_in<S: ObjectStore>(
    store: &S,
    location: &RemoteLocation,
    map_dir: &Path,
    scratch_parent: &Path,
) -> Result<(), AppError> {
    let scratch = tempfile::tempdir_in(scratch_parent)?;

    for entry in enumerate(store, location) {
        download(store, &entry?, scratch.path(), map_dir)?;
    }

    Ok(())
}
