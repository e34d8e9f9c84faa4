//! HTTP-backed implementation of the Store trait.
//!
//! Each operation is one HTTP call against the conventional URL scheme:
//!
//! | operation    | method | path                                   |
//! |--------------|--------|----------------------------------------|
//! | `find`       | GET    | `{endpoint}/items/{key}`               |
//! | `find_all`   | GET    | `{endpoint}/findAll/{index}?{field=v}` |
//! | `update`     | PUT    | `{endpoint}/items/{key}`               |
//! | `remove`     | DELETE | `{endpoint}/items/{key}`               |
//! | `remove_all` | DELETE | `{endpoint}/removeAll/{index}?{field=v}` |
//! | `bulk`       | POST   | `{endpoint}/bulk`                      |
//!
//! Status codes map back into the same error vocabulary the in-memory
//! backend raises; see [`crate::response`]. The only suspension points are
//! request dispatch and the response-body read; no operation spawns
//! concurrent sub-requests.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;
use url::Url;

use satchel_core::{Index, IndexMap, Patch, Record, Result};
use satchel_store::Store;

use crate::client::Client;
use crate::response::{expect_ok, read_json, transport};

/// A store whose collection lives behind an HTTP server.
///
/// Built by [`Client::store`]. Holds no connection state of its own; every
/// request picks up the client's current header set.
pub struct RemoteStore<T: Record> {
    client: Client,
    endpoint: String,
    index_map: IndexMap,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> RemoteStore<T> {
    pub(crate) fn new(client: Client, endpoint: &str, index_map: IndexMap) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_matches('/').to_string(),
            index_map,
            _marker: PhantomData,
        }
    }

    /// The endpoint this store is bound to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn item_url(&self, key: &T::Key) -> Result<Url> {
        self.client
            .endpoint_url(&[&self.endpoint, "items", &key.to_string()])
    }

    /// URL for the `findAll`/`removeAll` family; fails with `MissingIndex`
    /// if the store's `IndexMap` has no encoder for this index.
    fn query_url<V>(&self, verb: &str, index_name: &str, value: &V) -> Result<Url>
    where
        V: fmt::Display + ?Sized,
    {
        let fragment = self.index_map.encode(index_name, value)?;
        let mut url = self
            .client
            .endpoint_url(&[&self.endpoint, verb, index_name])?;
        url.set_query(Some(&fragment));
        Ok(url)
    }

    async fn dispatch(&self, method: Method, url: Url) -> Result<reqwest::Response> {
        debug!(method = %method, url = %url, "remote store request");
        self.client
            .request(method, url)
            .send()
            .await
            .map_err(transport)
    }
}

#[async_trait]
impl<T: Record> Store<T> for RemoteStore<T> {
    async fn find(&self, key: &T::Key) -> Result<T> {
        let url = self.item_url(key)?;
        let response = self.dispatch(Method::GET, url).await?;
        read_json(response, &key.to_string()).await
    }

    async fn find_all<V>(&self, index: &Index<T, V>, value: &V) -> Result<Vec<T>>
    where
        V: fmt::Display + Sync + ?Sized,
    {
        let url = self.query_url("findAll", index.name(), value)?;
        let response = self.dispatch(Method::GET, url).await?;
        read_json(response, &format!("{}={}", index.name(), value)).await
    }

    async fn update(&self, doc: T) -> Result<()> {
        let key = doc.key();
        let url = self.item_url(&key)?;
        debug!(method = "PUT", url = %url, "remote store request");
        let response = self
            .client
            .request(Method::PUT, url)
            .json(&doc)
            .send()
            .await
            .map_err(transport)?;
        expect_ok(response, &key.to_string())
    }

    async fn remove(&self, key: &T::Key) -> Result<bool> {
        let url = self.item_url(key)?;
        let response = self.dispatch(Method::DELETE, url).await?;
        expect_ok(response, &key.to_string())?;
        Ok(true)
    }

    async fn remove_all<V>(&self, index: &Index<T, V>, value: &V) -> Result<bool>
    where
        V: fmt::Display + Sync + ?Sized,
    {
        let url = self.query_url("removeAll", index.name(), value)?;
        let response = self.dispatch(Method::DELETE, url).await?;
        expect_ok(response, &format!("{}={}", index.name(), value))?;
        Ok(true)
    }

    async fn bulk(&self, patch: Patch<T>) -> Result<usize> {
        let url = self.client.endpoint_url(&[&self.endpoint, "bulk"])?;
        debug!(method = "POST", url = %url, entries = patch.len(), "remote store request");
        let response = self
            .client
            .request(Method::POST, url)
            .json(&patch)
            .send()
            .await
            .map_err(transport)?;
        expect_ok(response, &self.endpoint)?;
        Ok(patch.len())
    }
}
