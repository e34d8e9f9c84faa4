//! Connection-level configuration and the remote-store factory.
//!
//! A [`Client`] owns the base URL, the default header set, and per-method
//! request options. It is cheap to clone and safe to share; many stores may
//! be built from one client. Stores read the client's header set at request
//! time, not at construction time, so [`Client::update_headers`] affects
//! every store already built from this client.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder};
use url::Url;

use satchel_core::{IndexMap, Record, Result, StoreError};

use crate::store::RemoteStore;

/// Options applied to every request of one HTTP method.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers for this method, overriding the client defaults on
    /// name collision.
    pub headers: HeaderMap,
    /// Per-request timeout. `None` defers to whatever the transport
    /// enforces by default.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    fn merged_with(&self, overrides: &RequestOptions) -> RequestOptions {
        let mut headers = self.headers.clone();
        for (name, value) in overrides.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        RequestOptions {
            headers,
            timeout: overrides.timeout.or(self.timeout),
        }
    }
}

/// Caller-supplied overrides merged into the client's built-in defaults at
/// construction.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Default headers sent with every request.
    pub headers: HeaderMap,
    /// Options for `GET` requests.
    pub get: RequestOptions,
    /// Options for `PUT` requests.
    pub put: RequestOptions,
    /// Options for `POST` requests.
    pub post: RequestOptions,
    /// Options for `DELETE` requests.
    pub delete: RequestOptions,
}

#[derive(Debug)]
struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    /// Default headers; mutable so `update_headers` reaches stores already
    /// built from this client.
    headers: RwLock<HeaderMap>,
    get: RequestOptions,
    put: RequestOptions,
    post: RequestOptions,
    delete: RequestOptions,
}

/// Factory for remote stores bound to one base URL and transport
/// configuration.
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Create a client for `base_url`, merging `config` into the built-in
    /// defaults (an `Accept: application/json` header, no per-method
    /// options).
    pub fn new(base_url: &str, config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| StoreError::Config(format!("invalid base URL: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Config(format!(
                "base URL '{base_url}' cannot carry path segments"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in config.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        let defaults = RequestOptions::default();
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| StoreError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                headers: RwLock::new(headers),
                get: defaults.merged_with(&config.get),
                put: defaults.merged_with(&config.put),
                post: defaults.merged_with(&config.post),
                delete: defaults.merged_with(&config.delete),
            }),
        })
    }

    /// Create a client with default configuration.
    pub fn connect(base_url: &str) -> Result<Self> {
        Self::new(base_url, ClientConfig::default())
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Merge new defaults into the client's header set.
    ///
    /// Visible to all stores subsequently issuing requests through this
    /// client, including ones built before the call.
    pub fn update_headers(&self, headers: HeaderMap) {
        let mut defaults = self.inner.headers.write().unwrap();
        for (name, value) in headers.iter() {
            defaults.insert(name.clone(), value.clone());
        }
    }

    /// Build a remote store bound to `endpoint`, with `index_map` supplying
    /// the query encoders for its indexes.
    pub fn store<T: Record>(&self, endpoint: &str, index_map: IndexMap) -> RemoteStore<T> {
        RemoteStore::new(self.clone(), endpoint, index_map)
    }

    /// Resolve path segments against the base URL, percent-encoding each
    /// segment.
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                StoreError::Config("base URL cannot carry path segments".to_string())
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    /// Start a request with the merged header set and per-method options.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let options = if method == Method::PUT {
            &self.inner.put
        } else if method == Method::POST {
            &self.inner.post
        } else if method == Method::DELETE {
            &self.inner.delete
        } else {
            &self.inner.get
        };

        let mut headers = self.inner.headers.read().unwrap().clone();
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        let mut builder = self.inner.http.request(method, url).headers(headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }
}
