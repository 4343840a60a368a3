//! srcds-sync: prepare a game server's filesystem before launch by syncing
//! custom maps and configuration files from object storage.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use app::RuntimeContext;
use app::commands::run;
use services::HttpObjectStore;

pub use domain::AppError;

/// Run one configuration pass: maps phase, then configuration phase.
///
/// Each address is optional; an absent or unparsable address skips the
/// corresponding phase. On `Ok` the caller is expected to launch the server
/// process.
pub fn configure(maps: Option<&str>, config: Option<&str>) -> Result<(), AppError> {
    let store = HttpObjectStore::from_env()?;
    let ctx = RuntimeContext::from_addresses(maps, config, store)?;

    run::execute(&ctx)
}
