mod fake_object_store;

#[allow(unused_imports)]
pub use fake_object_store::{Counters, FakeObjectStore};
