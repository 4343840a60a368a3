//! Orchestrates one configuration run: maps phase, then config phase.

use crate::app::RuntimeContext;
use crate::app::commands::{config, maps};
use crate::domain::AppError;
use crate::ports::ObjectStore;

/// Run both sync phases in order, narrating progress to the operator.
///
/// A phase with no source address is skipped with a notice; the first fatal
/// error anywhere aborts the run, leaving any partially-synced files in
/// place for the operator to diagnose and re-run. On success the caller is
/// expected to hand off to the server process.
pub fn execute<S: ObjectStore>(ctx: &RuntimeContext<S>) -> Result<(), AppError> {
    match ctx.map_location() {
        Some(location) => {
            println!("Downloading custom maps from repository: {}", location.url());
            maps::sync_all(ctx.store(), location, &ctx.map_dir())?;
        }
        None => println!("Skipping custom map download - no map repository provided"),
    }

    match ctx.config_location() {
        Some(location) => {
            println!("Downloading dynamic configuration from repository: {}", location.url());
            let manifest =
                config::resolve_manifest(ctx.store(), location, &ctx.static_manifest_path())?;
            config::sync_all(ctx.store(), &manifest, location, ctx.working_dir())?;
        }
        None => println!("Skipping dynamic configuration - no configuration repository provided"),
    }

    println!("Server configuration successful - starting SRCDS...");
    Ok(())
}
