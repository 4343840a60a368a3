mod error;
mod manifest;
mod remote_location;

pub use error::AppError;
pub use manifest::{MANIFEST_FILE, Manifest};
pub use remote_location::{OBJECT_STORE_SCHEME, RemoteLocation, RemoteObject};
