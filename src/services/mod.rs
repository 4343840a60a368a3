mod object_store_http;

pub use object_store_http::{ENDPOINT_ENV, HttpObjectStore};
