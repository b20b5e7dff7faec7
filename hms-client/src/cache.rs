//! Query cache
//!
//! Responses keyed by path-like segment lists, e.g.
//! `["properties", "7", "rooms"]`. Mutations invalidate by prefix so every
//! list and detail under a resource is refetched on next read.

use std::future::Future;

use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ClientResult;

pub type CacheKey = Vec<String>;

/// Build a [`CacheKey`] from anything displayable
#[macro_export]
macro_rules! cache_key {
    ($($seg:expr),* $(,)?) => {
        vec![$($seg.to_string()),*]
    };
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: DashMap<CacheKey, Value>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &[String]) -> Option<T> {
        let value = self.entries.get(key)?;
        serde_json::from_value(value.value().clone()).ok()
    }

    pub fn insert<T: Serialize>(&self, key: CacheKey, value: &T) -> ClientResult<()> {
        self.entries.insert(key, serde_json::to_value(value)?);
        Ok(())
    }

    /// Cached value, or run `fetch` and cache its result
    ///
    /// Errors are returned as-is and leave the cache untouched.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: CacheKey, fetch: F) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        if let Some(hit) = self.get(&key) {
            tracing::trace!(?key, "cache hit");
            return Ok(hit);
        }

        let value = fetch().await?;
        self.insert(key, &value)?;
        Ok(value)
    }

    /// Drop every entry whose key starts with `prefix`
    pub fn invalidate(&self, prefix: &[String]) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
