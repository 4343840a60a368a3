use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, RemoteLocation, RemoteObject};
use crate::ports::{ObjectListing, ObjectStore};

/// Per-operation call counts, for asserting which remote calls a run made.
#[derive(Debug, Clone, Copy, Default)]
pub struct Counters {
    pub list_calls: usize,
    pub fetch_calls: usize,
    pub exists_calls: usize,
    pub fetch_json_calls: usize,
}

/// In-memory object store for tests.
#[derive(Clone, Default)]
pub struct FakeObjectStore {
    objects: BTreeMap<(String, String), Vec<u8>>,
    fail_listing: bool,
    fail_probe: bool,
    counters: Arc<Mutex<Counters>>,
}

impl FakeObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(
        mut self,
        bucket: impl Into<String>,
        key: impl Into<String>,
        body: Vec<u8>,
    ) -> Self {
        self.objects.insert((bucket.into(), key.into()), body);
        self
    }

    /// Every listing yields a single error.
    pub fn with_listing_failure(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Every existence probe fails with a non-404 store error.
    pub fn with_probe_failure(mut self) -> Self {
        self.fail_probe = true;
        self
    }

    pub fn counters(&self) -> Counters {
        *self.counters.lock().unwrap()
    }

    fn body(&self, object: &RemoteLocation) -> Option<&Vec<u8>> {
        let key = object.key().trim_start_matches('/').to_string();
        self.objects.get(&(object.bucket().to_string(), key))
    }
}

impl ObjectStore for FakeObjectStore {
    fn list<'a>(&'a self, prefix: &RemoteLocation) -> ObjectListing<'a> {
        self.counters.lock().unwrap().list_calls += 1;

        if self.fail_listing {
            return Box::new(std::iter::once(Err(AppError::store_error(
                "listing failed",
                Some(500),
            ))));
        }

        let bucket = prefix.bucket().to_string();
        let key_prefix = prefix.key().trim_start_matches('/').to_string();
        let matches: Vec<RemoteObject> = self
            .objects
            .keys()
            .filter(|(b, k)| *b == bucket && k.starts_with(&key_prefix))
            .map(|(b, k)| RemoteObject::new(b.clone(), k.clone()))
            .collect();

        Box::new(matches.into_iter().map(Ok))
    }

    fn fetch(&self, object: &RemoteLocation, out: &mut dyn Write) -> Result<(), AppError> {
        self.counters.lock().unwrap().fetch_calls += 1;

        let body = self
            .body(object)
            .ok_or_else(|| AppError::store_error(format!("no object at {}", object.url()), Some(404)))?;
        out.write_all(body)?;
        Ok(())
    }

    fn exists(&self, object: &RemoteLocation) -> Result<bool, AppError> {
        self.counters.lock().unwrap().exists_calls += 1;

        if self.fail_probe {
            return Err(AppError::store_error("probe failed", Some(500)));
        }

        Ok(self.body(object).is_some())
    }

    fn fetch_json(&self, object: &RemoteLocation) -> Result<serde_json::Value, AppError> {
        self.counters.lock().unwrap().fetch_json_calls += 1;

        let body = self
            .body(object)
            .ok_or_else(|| AppError::store_error(format!("no object at {}", object.url()), Some(404)))?;
        Ok(serde_json::from_slice(body)?)
    }
}
