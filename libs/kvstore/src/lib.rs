//! Key-value store abstraction.
//!
//! Domain crates depend on the object-safe [`KvStore`] port only. Two adapters
//! ship with the crate:
//! - [`RedisStore`]: a multiplexed, auto-reconnecting Redis connection shared by all handlers
//! - [`MemoryStore`]: an in-process map with the same semantics, used by `--mock` and tests
//!
//! # Example
//! ```rust,no_run
//! # async fn demo() -> kvstore::Result<()> {
//! use kvstore::{KvStore, RedisStore};
//!
//! let store = RedisStore::connect("redis://127.0.0.1:6379").await?;
//! store
//!     .hset_multiple("patient:7", &[("firstname".into(), "Ada".into())])
//!     .await?;
//! let fields = store.hgetall("patient:7").await?;
//! assert_eq!(fields["firstname"], "Ada");
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;

pub mod error;
pub mod memory;
pub mod redis_store;

pub use error::{redact_credentials_in_url, StoreError};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Library-local result type.
pub type Result<T> = std::result::Result<T, StoreError>;

/// A field map as returned by `HGETALL`.
pub type FieldMap = HashMap<String, String>;

/// Port over the handful of key-value operations the services need.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Plain string value at `key`, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set `key` to a plain string value, replacing whatever was there.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Missing keys are not an error.
    async fn del(&self, key: &str) -> Result<()>;

    /// All fields of the hash at `key`; empty when the key does not exist.
    async fn hgetall(&self, key: &str) -> Result<FieldMap>;

    /// Write several hash fields in one atomic command. An empty slice is a no-op.
    async fn hset_multiple(&self, key: &str, fields: &[(String, String)]) -> Result<()>;

    /// Every key starting with `prefix`, in no particular order.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;

    /// Round-trip health probe.
    async fn ping(&self) -> Result<()>;
}

/// Escape glob metacharacters so a literal prefix can be used in a `KEYS`/`MATCH` pattern.
pub fn prefix_pattern(prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('*');
    out
}
