//! Object store port definition.

use std::io::Write;

use crate::domain::{AppError, RemoteLocation, RemoteObject};

/// Lazy, single-pass stream of listing results.
///
/// Pagination is the producer's concern; consumers see one flat sequence.
/// The stream is not restartable — iterating again means a fresh listing.
pub type ObjectListing<'a> = Box<dyn Iterator<Item = Result<RemoteObject, AppError>> + 'a>;

/// Port for object-store operations.
///
/// The core never reimplements storage concerns: authentication, transport
/// retries and pagination mechanics all live behind this trait.
pub trait ObjectStore {
    /// List every object under the location's key prefix, across all pages.
    fn list<'a>(&'a self, prefix: &RemoteLocation) -> ObjectListing<'a>;

    /// Stream an object's body into the given writer.
    fn fetch(&self, object: &RemoteLocation, out: &mut dyn Write) -> Result<(), AppError>;

    /// Whether an object exists at the exact key.
    ///
    /// A true not-found is the one negative result reported as `Ok(false)`;
    /// every other failure surfaces as an error.
    fn exists(&self, object: &RemoteLocation) -> Result<bool, AppError>;

    /// Fetch an object's body and parse it as a JSON document.
    fn fetch_json(&self, object: &RemoteLocation) -> Result<serde_json::Value, AppError>;
}
