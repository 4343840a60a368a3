use url::Url;

/// URL scheme recognized for object-store addresses.
pub const OBJECT_STORE_SCHEME: &str = "s3";

/// A parsed object-store location: container (bucket) plus key prefix.
///
/// Constructed once from an operator-supplied address and immutable for the
/// rest of the run. Purely a value type; all I/O against a location goes
/// through the [`ObjectStore`](crate::ports::ObjectStore) port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLocation {
    bucket: String,
    key: String,
}

impl RemoteLocation {
    /// Parse an `s3://bucket/prefix` address.
    ///
    /// Returns `None` for empty strings, malformed URLs, or any other scheme.
    /// Absence is the designed "not configured" signal, not an error.
    pub fn parse(address: &str) -> Option<Self> {
        let url = Url::parse(address).ok()?;

        if url.scheme() != OBJECT_STORE_SCHEME {
            return None;
        }

        let bucket = url.host_str().filter(|host| !host.is_empty())?.to_string();
        Some(Self { bucket, key: url.path().to_string() })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Last path segment of the key.
    pub fn base_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }

    /// New location with the given segments appended to this key, re-rooted
    /// with a leading separator. Never mutates the receiver.
    pub fn child(&self, segments: &[&str]) -> Self {
        let mut parts: Vec<&str> = self.key.split('/').filter(|s| !s.is_empty()).collect();
        parts.extend_from_slice(segments);

        Self { bucket: self.bucket.clone(), key: format!("/{}", parts.join("/")) }
    }

    /// Canonical address string, for operator-facing status lines.
    pub fn url(&self) -> String {
        format!("{}://{}{}", OBJECT_STORE_SCHEME, self.bucket, self.key)
    }
}

/// An entry discovered while listing a [`RemoteLocation`]'s contents.
///
/// Only produced by the object store's listing; never constructed by the
/// orchestrator directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    bucket: String,
    key: String,
}

impl RemoteObject {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self { bucket: bucket.into(), key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Last path segment of the key.
    pub fn base_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }

    /// Addressable location of this object, for fetching its body.
    pub fn location(&self) -> RemoteLocation {
        RemoteLocation { bucket: self.bucket.clone(), key: self.key.clone() }
    }
}
