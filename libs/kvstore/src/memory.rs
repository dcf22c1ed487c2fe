//! In-process adapter with Redis-compatible semantics for the commands the
//! port exposes: hashes and plain strings share one keyspace, an empty hash
//! does not exist, and touching a key with the wrong kind of command fails.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::{FieldMap, KvStore, Result, StoreError};

#[derive(Debug, Clone)]
enum Value {
    Plain(String),
    Hash(FieldMap),
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entries.get(key).as_deref() {
            None => Ok(None),
            Some(Value::Plain(v)) => Ok(Some(v.clone())),
            Some(Value::Hash(_)) => Err(StoreError::wrong_type(key)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .insert(key.to_string(), Value::Plain(value.to_string()));
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn hgetall(&self, key: &str) -> Result<FieldMap> {
        match self.entries.get(key).as_deref() {
            None => Ok(FieldMap::new()),
            Some(Value::Hash(map)) => Ok(map.clone()),
            Some(Value::Plain(_)) => Err(StoreError::wrong_type(key)),
        }
    }

    async fn hset_multiple(&self, key: &str, fields: &[(String, String)]) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Value::Hash(FieldMap::new()));
        match entry.value_mut() {
            Value::Hash(map) => {
                for (field, value) in fields {
                    map.insert(field.clone(), value.clone());
                }
                Ok(())
            }
            Value::Plain(_) => Err(StoreError::wrong_type(key)),
        }
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| e.key().clone())
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
