//! Redis adapter for the [`KvStore`] port.
//!
//! Wraps a `ConnectionManager`: one multiplexed connection that reconnects on
//! failure and is cheap to clone, so every call works on its own clone.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

use crate::{prefix_pattern, redact_credentials_in_url, FieldMap, KvStore, Result, StoreError};

#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Open the client and establish the managed connection.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| StoreError::InvalidUrl {
            url: redact_credentials_in_url(url),
            message: e.to_string(),
        })?;
        let conn = ConnectionManager::new(client).await?;
        tracing::info!(url = %redact_credentials_in_url(url), "connected to redis");
        Ok(Self { conn })
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn hgetall(&self, key: &str) -> Result<FieldMap> {
        let mut conn = self.conn.clone();
        let map: FieldMap = conn.hgetall(key).await?;
        Ok(map)
    }

    async fn hset_multiple(&self, key: &str, fields: &[(String, String)]) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        let _: () = conn.hset_multiple(key, fields).await?;
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys(prefix_pattern(prefix)).await?;
        Ok(keys)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        tracing::debug!(reply = %pong, "redis ping");
        check_pong(&pong)
    }
}

/// A server that answers PING with anything but PONG is not usable.
fn check_pong(reply: &str) -> Result<()> {
    if reply.eq_ignore_ascii_case("PONG") {
        Ok(())
    } else {
        Err(StoreError::Unavailable(format!(
            "unexpected PING reply: {reply}"
        )))
    }
}
