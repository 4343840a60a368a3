//! Object store adapter speaking the S3 REST protocol over reqwest.

use std::io::Write;

use reqwest::blocking::Client;
use url::Url;

use crate::domain::{AppError, RemoteLocation, RemoteObject};
use crate::ports::{ObjectListing, ObjectStore};

/// Environment variable overriding the object-store endpoint.
pub const ENDPOINT_ENV: &str = "OBJECT_STORE_ENDPOINT";

const DEFAULT_ENDPOINT: &str = "https://s3.amazonaws.com";

/// HTTP transport for the object store.
///
/// One client per run; every component borrows it read-only. Listing issues
/// ListObjectsV2 requests and follows continuation tokens transparently;
/// existence probes use HEAD so no body is transferred. Authentication and
/// transport retries are the store's own concern (map repositories are
/// public-read fastdl buckets).
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    endpoint: Url,
    client: Client,
}

impl HttpObjectStore {
    /// Create a client against the given endpoint.
    pub fn new(endpoint: Url) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::store_error(format!("Failed to create HTTP client: {e}"), None))?;

        Ok(Self { endpoint, client })
    }

    /// Create a client from `OBJECT_STORE_ENDPOINT`, defaulting to the public
    /// S3 endpoint.
    pub fn from_env() -> Result<Self, AppError> {
        let raw = std::env::var(ENDPOINT_ENV).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&raw)
            .map_err(|e| AppError::config_error(format!("Invalid object-store endpoint '{raw}': {e}")))?;

        Self::new(endpoint)
    }

    fn object_url(&self, location: &RemoteLocation) -> Result<Url, AppError> {
        let address = format!(
            "{}/{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            location.bucket(),
            location.key().trim_start_matches('/'),
        );

        Url::parse(&address)
            .map_err(|e| AppError::store_error(format!("Invalid object URL '{address}': {e}"), None))
    }

    fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        token: Option<&str>,
    ) -> Result<ListPage, AppError> {
        let address = format!("{}/{}", self.endpoint.as_str().trim_end_matches('/'), bucket);
        let mut url = Url::parse(&address)
            .map_err(|e| AppError::store_error(format!("Invalid listing URL '{address}': {e}"), None))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("list-type", "2");
            query.append_pair("prefix", prefix);
            if let Some(token) = token {
                query.append_pair("continuation-token", token);
            }
        }

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::store_error(format!("Listing request failed: {e}"), None))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::store_error(
                format!("Listing s3://{}/{} failed", bucket, prefix),
                Some(status.as_u16()),
            ));
        }

        let body = response
            .text()
            .map_err(|e| AppError::store_error(format!("Failed to read listing body: {e}"), None))?;

        parse_list_page(&body)
    }
}

impl ObjectStore for HttpObjectStore {
    fn list<'a>(&'a self, prefix: &RemoteLocation) -> ObjectListing<'a> {
        Box::new(Listing {
            store: self,
            bucket: prefix.bucket().to_string(),
            prefix: prefix.key().trim_start_matches('/').to_string(),
            token: None,
            buffered: Vec::new().into_iter(),
            done: false,
        })
    }

    fn fetch(&self, object: &RemoteLocation, out: &mut dyn Write) -> Result<(), AppError> {
        let url = self.object_url(object)?;
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::store_error(format!("Fetch request failed: {e}"), None))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::store_error(
                format!("Fetching {} failed", object.url()),
                Some(status.as_u16()),
            ));
        }

        response
            .copy_to(out)
            .map_err(|e| AppError::store_error(format!("Failed to stream {}: {e}", object.url()), None))?;

        Ok(())
    }

    fn exists(&self, object: &RemoteLocation) -> Result<bool, AppError> {
        let url = self.object_url(object)?;
        let response = self
            .client
            .head(url)
            .send()
            .map_err(|e| AppError::store_error(format!("Existence probe failed: {e}"), None))?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }

        // A true not-found is the one negative result. Anything else (403,
        // 5xx) must surface rather than silently steer manifest fallback.
        if status.as_u16() == 404 {
            return Ok(false);
        }

        Err(AppError::store_error(
            format!("Existence probe for {} failed", object.url()),
            Some(status.as_u16()),
        ))
    }

    fn fetch_json(&self, object: &RemoteLocation) -> Result<serde_json::Value, AppError> {
        let url = self.object_url(object)?;
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::store_error(format!("Fetch request failed: {e}"), None))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::store_error(
                format!("Fetching {} failed", object.url()),
                Some(status.as_u16()),
            ));
        }

        let body = response
            .text()
            .map_err(|e| AppError::store_error(format!("Failed to read {}: {e}", object.url()), None))?;

        Ok(serde_json::from_str(&body)?)
    }
}

/// Pull-based pagination over ListObjectsV2 responses.
///
/// Single-pass and not restartable; a failed page poisons the stream after
/// yielding its error once.
struct Listing<'a> {
    store: &'a HttpObjectStore,
    bucket: String,
    prefix: String,
    token: Option<String>,
    buffered: std::vec::IntoIter<RemoteObject>,
    done: bool,
}

impl Iterator for Listing<'_> {
    type Item = Result<RemoteObject, AppError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(object) = self.buffered.next() {
                return Some(Ok(object));
            }

            if self.done {
                return None;
            }

            match self.store.list_page(&self.bucket, &self.prefix, self.token.as_deref()) {
                Ok(page) => {
                    self.token = page.next_token;
                    self.done = self.token.is_none();
                    let bucket = self.bucket.clone();
                    self.buffered = page
                        .keys
                        .into_iter()
                        .map(|key| RemoteObject::new(bucket.clone(), key))
                        .collect::<Vec<_>>()
                        .into_iter();
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

struct ListPage {
    keys: Vec<String>,
    next_token: Option<String>,
}

fn parse_list_page(body: &str) -> Result<ListPage, AppError> {
    if !body.contains("<ListBucketResult") {
        return Err(AppError::Listing("response is not a ListBucketResult document".into()));
    }

    let keys = tag_values(body, "Key").into_iter().map(unescape_xml).collect();

    let truncated =
        tag_values(body, "IsTruncated").first().map(|v| v == "true").unwrap_or(false);

    let next_token = if truncated {
        let token = tag_values(body, "NextContinuationToken").into_iter().next().ok_or_else(
            || AppError::Listing("truncated listing without a continuation token".into()),
        )?;
        Some(unescape_xml(token))
    } else {
        None
    };

    Ok(ListPage { keys, next_token })
}

/// Text content of every `<tag>...</tag>` occurrence, in document order.
fn tag_values(body: &str, tag: &str) -> Vec<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let mut values = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find(&open) {
        rest = &rest[start + open.len()..];
        match rest.find(&close) {
            Some(end) => {
                values.push(rest[..end].to_string());
                rest = &rest[end + close.len()..];
            }
            None => break,
        }
    }

    values
}

fn unescape_xml(value: String) -> String {
    if !value.contains('&') {
        return value;
    }

    // &amp; last, so freshly produced ampersands are not re-expanded.
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
